//! HTTP rate provider.

use async_trait::async_trait;
use quickfx_common::Currency;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::FxConfig;
use crate::error::{FetchError, FxError, FxResult};
use crate::provider::RateProvider;
use crate::rates::RateTable;

/// Provider ID constant
const PROVIDER_ID: &str = "HTTP_RATES";

/// Fetches rate tables with `GET <endpoint>?base=<CODE>`.
///
/// Each call is one best-effort round trip: no retries and no caching.
pub struct HttpRateProvider {
    client: Client,
    config: FxConfig,
}

impl HttpRateProvider {
    /// Create a provider from validated configuration.
    pub fn new(config: FxConfig) -> FxResult<Self> {
        config.validate().map_err(FxError::InvalidConfig)?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FxError::InvalidConfig(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        PROVIDER_ID
    }

    #[instrument(skip(self), fields(base = %base, endpoint = %self.config.endpoint))]
    async fn fetch_rates(&self, base: &Currency) -> FxResult<RateTable> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("base", base.code())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Rates request failed");
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Rates API returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let table: RateTable = response.json().await.map_err(|e| {
            warn!(error = %e, "Rates payload could not be decoded");
            FetchError::Decode(e.to_string())
        })?;

        debug!(
            returned_base = %table.base,
            date = %table.date,
            count = table.rates.len(),
            "Fetched rate table"
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_config() {
        let result = HttpRateProvider::new(FxConfig::with_endpoint("not a url"));
        assert!(matches!(result, Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_endpoint() {
        let provider = HttpRateProvider::new(FxConfig::default()).unwrap();
        assert_eq!(provider.endpoint(), crate::config::DEFAULT_ENDPOINT);
        assert_eq!(provider.name(), PROVIDER_ID);
    }
}
