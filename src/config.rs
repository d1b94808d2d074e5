use std::env;

use anyhow::{Context, bail};

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  /// Session token -> user id, as issued by the auth provider.
  pub auth_tokens: HashMap<String, String>,
  pub seed_demo: bool,
  pub rate_per_second: u64,
  pub rate_burst: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: "sqlite:invoices.db?mode=rwc".into(),
      port: 3000,
      auth_tokens: HashMap::new(),
      seed_demo: false,
      rate_per_second: 2,
      rate_burst: 100,
    }
  }
}

impl Config {
  /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
  /// up a `.env` file.
  pub fn from_env() -> anyhow::Result<Self> {
    let defaults = Self::default();

    let database_url =
      env::var("DATABASE_URL").unwrap_or(defaults.database_url);
    let port = parse_var("PORT")?.unwrap_or(defaults.port);
    let auth_tokens = match env::var("AUTH_TOKENS") {
      Ok(raw) => parse_tokens(&raw)?,
      Err(_) => HashMap::new(),
    };
    let seed_demo = env::var("SEED_DEMO")
      .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
      .unwrap_or(false);
    let rate_per_second =
      parse_var("RATE_PER_SECOND")?.unwrap_or(defaults.rate_per_second);
    let rate_burst = parse_var("RATE_BURST")?.unwrap_or(defaults.rate_burst);

    if auth_tokens.is_empty() {
      warn!("AUTH_TOKENS is empty, every API request will be rejected");
    }

    Ok(Self {
      database_url,
      port,
      auth_tokens,
      seed_demo,
      rate_per_second,
      rate_burst,
    })
  }
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
  T: std::str::FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  match env::var(name) {
    Ok(raw) => {
      let value =
        raw.trim().parse().with_context(|| format!("Invalid {name}"))?;
      Ok(Some(value))
    }
    Err(_) => Ok(None),
  }
}

/// Parses `token:user_id` pairs separated by commas.
pub fn parse_tokens(raw: &str) -> anyhow::Result<HashMap<String, String>> {
  raw
    .split(',')
    .filter(|pair| !pair.trim().is_empty())
    .map(|pair| {
      let Some((token, user)) = pair.trim().split_once(':') else {
        bail!("Invalid AUTH_TOKENS entry `{pair}`, expected token:user_id");
      };
      let (token, user) = (token.trim(), user.trim());
      if token.is_empty() || user.is_empty() {
        bail!("Invalid AUTH_TOKENS entry `{pair}`, expected token:user_id");
      }
      Ok((token.to_string(), user.to_string()))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_tokens() {
    let tokens = parse_tokens(" abc:user_0 , def:demo-user,,").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens["abc"], "user_0");
    assert_eq!(tokens["def"], "demo-user");
  }

  #[test]
  fn test_parse_tokens_rejects_malformed() {
    assert!(parse_tokens("abc").is_err());
    assert!(parse_tokens("abc:").is_err());
    assert!(parse_tokens(":user").is_err());
  }

  #[test]
  fn test_parse_tokens_empty() {
    assert!(parse_tokens("").unwrap().is_empty());
  }
}
