mod config;
mod entity;
mod error;
mod plugins;
mod prelude;
mod session;
mod state;
mod sv;
mod utils;

use anyhow::Context;
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  config::Config,
  plugins::{App, seed, server},
  prelude::*,
  session::StaticSessions,
  state::AppState,
  sv::Store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "invoice_chat=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env()?;

  info!("Starting Invoice Chat v{}", env!("CARGO_PKG_VERSION"));

  let store = Store::open(&config.database_url)
    .await
    .with_context(|| format!("Failed to open {}", config.database_url))?;
  let sessions = Arc::new(StaticSessions::new(config.auth_tokens.clone()));
  let app_state = Arc::new(AppState::new(store, sessions, config));

  let failed = App::new()
    .register(seed::Plugin)
    .register(server::Plugin)
    .run(app_state.clone())
    .await;

  if failed > 0 {
    app_state.store.close().await?;
    anyhow::bail!("{failed} plugin(s) failed to start");
  }

  tokio::signal::ctrl_c().await.context("Failed to listen for ctrl-c")?;

  info!("Shutting down");
  app_state.store.close().await?;

  Ok(())
}
