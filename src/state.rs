use crate::{config::Config, prelude::*, session::SessionProvider, sv::Store};

pub struct AppState {
  pub store: Store,
  pub sessions: Arc<dyn SessionProvider>,
  pub config: Config,
}

impl AppState {
  pub fn new(
    store: Store,
    sessions: Arc<dyn SessionProvider>,
    config: Config,
  ) -> Self {
    Self { store, sessions, config }
  }
}
