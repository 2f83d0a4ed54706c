//! Gateway configuration
//!
//! A fixed default base URL with env overrides, loaded dotenv-style at
//! startup. No CLI surface.

use std::env;
use std::time::Duration;

/// Default aggregation backend, matching the deployed dashboard.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the backend gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl GatewayConfig {
    /// Build from environment, falling back to defaults.
    ///
    /// `DASHBOARD_BACKEND_URL` overrides the base URL and
    /// `DASHBOARD_REQUEST_TIMEOUT_SECS` the request timeout.
    pub fn from_env() -> Self {
        let base_url = env::var("DASHBOARD_BACKEND_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = env::var("DASHBOARD_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        Self {
            base_url,
            request_timeout,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}
