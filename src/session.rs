use async_trait::async_trait;

use crate::prelude::*;

/// Resolves a session token issued by the external auth provider to the
/// id of the user it belongs to.
#[async_trait]
pub trait SessionProvider: Send + Sync {
  async fn user_id(&self, token: &str) -> Option<String>;
}

/// Tokens handed out ahead of time and loaded from configuration.
pub struct StaticSessions {
  tokens: DashMap<String, String>,
}

impl StaticSessions {
  pub fn new(tokens: HashMap<String, String>) -> Self {
    Self { tokens: tokens.into_iter().collect() }
  }
}

#[async_trait]
impl SessionProvider for StaticSessions {
  async fn user_id(&self, token: &str) -> Option<String> {
    self.tokens.get(token).map(|user| user.value().clone())
  }
}
