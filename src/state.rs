use std::sync::Arc;

use crate::{client::HiscoreLookup, config::Config};

/// Shared across all requests. The data client is authenticated once at
/// startup and supports concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: Arc<dyn HiscoreLookup>,
    pub dev: bool,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn HiscoreLookup>, dev: bool) -> Self {
        Self {
            config,
            client,
            dev,
        }
    }
}
