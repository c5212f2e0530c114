/// Shared application state
use crate::config::ServerConfig;
use crate::services::AudioUpstream;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub upstream: Arc<dyn AudioUpstream>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>, upstream: Arc<dyn AudioUpstream>) -> Self {
        Self { config, upstream }
    }
}
