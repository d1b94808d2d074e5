use std::sync::Arc;

use axum::{
  extract::FromRequestParts,
  http::{header::AUTHORIZATION, request::Parts},
};

use super::handlers::ApiError;
use crate::{error::Error, state::AppState};

/// The user behind the request's bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

fn bearer(parts: &Parts) -> Option<&str> {
  parts
    .headers
    .get(AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|token| !token.is_empty())
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    app: &Arc<AppState>,
  ) -> Result<Self, Self::Rejection> {
    let Some(token) = bearer(parts).map(str::to_string) else {
      return Err(Error::Unauthorized.into());
    };

    match app.sessions.user_id(&token).await {
      Some(user) => Ok(AuthUser(user)),
      None => Err(Error::Unauthorized.into()),
    }
  }
}
