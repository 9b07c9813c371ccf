use crate::config::WebConfig;
use core_explorer::ConnectionProvider;
use std::sync::Arc;

/// Shared services handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<ConnectionProvider>,
    pub config: Arc<WebConfig>,
}

impl AppState {
    pub const fn new(provider: Arc<ConnectionProvider>, config: Arc<WebConfig>) -> Self {
        Self { provider, config }
    }
}
