//! Shared application state for request handlers.

use std::sync::Arc;

use crate::advice::Advisor;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Everything here is read-only after startup, so handlers never lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub advisor: Arc<Advisor>,
}

impl AppState {
    /// Creates a new application state from the given configuration and advisor.
    pub fn new(config: AppConfig, advisor: Advisor) -> Self {
        Self {
            config: Arc::new(config),
            advisor: Arc::new(advisor),
        }
    }
}
