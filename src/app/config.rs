// src/app/config.rs

use crate::error::AppResult;
use crate::events::DEFAULT_LOG_CAPACITY;
use crate::integrations::CatalogConfig;

/// Top-level configuration, built once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,

    /// Number of events kept in the bus log
    pub event_log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            event_log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            catalog: CatalogConfig::from_env()?,
            ..Self::default()
        })
    }
}
