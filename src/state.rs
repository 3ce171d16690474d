// src/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::chatbot::ResponseSelector;
use crate::services::metrics_manager::MetricsManager;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub metrics: MetricsManager,
    pub selector: ResponseSelector,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_selector(config, ResponseSelector::new())
    }

    pub fn with_selector(config: AppConfig, selector: ResponseSelector) -> Self {
        Self {
            sessions: SessionManager::new(config.session_ttl),
            metrics: MetricsManager::new(),
            selector,
            config,
        }
    }
}
