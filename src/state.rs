use std::sync::Arc;

use crate::config::Config;
use crate::utils::html::{AmmoniaSanitizer, HtmlSanitizer};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sanitizer: Arc<dyn HtmlSanitizer>,
}

impl AppState {
    /// State backed by the default `ammonia` sanitizer.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sanitizer: Arc::new(AmmoniaSanitizer),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn HtmlSanitizer> {
    fn from_ref(state: &AppState) -> Self {
        state.sanitizer.clone()
    }
}
