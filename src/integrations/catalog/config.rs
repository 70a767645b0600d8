// src/integrations/catalog/config.rs
//
// Catalog endpoint configuration.
// Defaults can be overridden through environment variables.

use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_CATALOG_URL: &str = "https://eandata.com/feed/";

pub const ENV_CATALOG_URL: &str = "SHOPSCAN_CATALOG_URL";
pub const ENV_CATALOG_KEY: &str = "SHOPSCAN_CATALOG_KEY";
pub const ENV_LOOKUP_TIMEOUT_SECS: &str = "SHOPSCAN_LOOKUP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Endpoint queried with `?mode=json&keycode=<key>&find=<barcode>`
    pub base_url: String,

    /// API key sent as `keycode`
    pub keycode: String,

    /// Upper bound for a single lookup. `None` waits indefinitely.
    pub lookup_timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            keycode: String::new(),
            lookup_timeout: None,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by any key/value source
    pub fn from_source<F>(get: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = get(ENV_CATALOG_URL) {
            config.base_url = url;
        }
        if let Some(key) = get(ENV_CATALOG_KEY) {
            config.keycode = key;
        }
        if let Some(raw) = get(ENV_LOOKUP_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                AppError::Config(format!(
                    "{} must be a whole number of seconds: {}",
                    ENV_LOOKUP_TIMEOUT_SECS, e
                ))
            })?;
            config.lookup_timeout = (secs > 0).then_some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        reqwest::Url::parse(&self.base_url).map_err(|e| {
            AppError::Config(format!("Invalid catalog URL '{}': {}", self.base_url, e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_have_no_timeout() {
        let config = CatalogConfig::from_source(source(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert!(config.lookup_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CatalogConfig::from_source(source(&[
            (ENV_CATALOG_URL, "http://127.0.0.1:9000/feed"),
            (ENV_CATALOG_KEY, "ABC123"),
            (ENV_LOOKUP_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000/feed");
        assert_eq!(config.keycode, "ABC123");
        assert_eq!(config.lookup_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config =
            CatalogConfig::from_source(source(&[(ENV_LOOKUP_TIMEOUT_SECS, "0")])).unwrap();
        assert!(config.lookup_timeout.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(CatalogConfig::from_source(source(&[(ENV_LOOKUP_TIMEOUT_SECS, "soon")])).is_err());
        assert!(CatalogConfig::from_source(source(&[(ENV_CATALOG_URL, "not a url")])).is_err());
    }
}
