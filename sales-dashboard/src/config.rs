//! Dashboard configuration

use sales_client::ClientConfig;
use sales_client::config::DEFAULT_TIMEOUT_SECS;

use crate::error::{DashboardError, DashboardResult};
use crate::filter::StatsScope;

/// Dashboard configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SALES_API_URL | http://localhost:8000/api | API base URL |
/// | REQUEST_TIMEOUT_SECS | 30 | HTTP timeout |
/// | STATS_SCOPE | filtered | `filtered` or `all` |
/// | LOG_LEVEL | info | default log filter (`RUST_LOG` wins) |
/// | LOG_FORMAT | text | `text` or `json` |
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub stats_scope: StatsScope,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            stats_scope: StatsScope::default(),
            log_level: "info".into(),
            log_json: false,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|_| {
                DashboardError::Config(format!("REQUEST_TIMEOUT_SECS must be an integer, got '{}'", v))
            })?,
            None => defaults.request_timeout_secs,
        };

        let stats_scope = match get("STATS_SCOPE") {
            Some(v) => v.parse()?,
            None => defaults.stats_scope,
        };

        Ok(Self {
            api_url: get("SALES_API_URL").unwrap_or(defaults.api_url),
            request_timeout_secs,
            stats_scope,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: get("LOG_FORMAT").is_some_and(|v| v.trim().eq_ignore_ascii_case("json")),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.request_timeout_secs)
    }
}
