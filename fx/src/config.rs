//! Rate provider configuration.

use std::time::Duration;

/// Default rates endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.vatcomply.com/rates";

/// Configuration for the HTTP rate provider.
#[derive(Debug, Clone)]
pub struct FxConfig {
    /// Rates endpoint; the base currency is appended as `?base=<CODE>`.
    pub endpoint: String,
    /// Optional per-request timeout. `None` leaves the request unbounded.
    pub request_timeout: Option<Duration>,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            user_agent: concat!("quickfx/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FxConfig {
    /// Config pointing at a different endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("Rates endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "Rates endpoint must be an http(s) URL: {}",
                self.endpoint
            ));
        }

        if matches!(self.request_timeout, Some(t) if t.is_zero()) {
            return Err("Request timeout cannot be zero".to_string());
        }

        Ok(())
    }
}
