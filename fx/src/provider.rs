//! Rate provider trait and the in-memory test provider.

use async_trait::async_trait;
use quickfx_common::Currency;
use tracing::debug;

use crate::error::{FxError, FxResult};
use crate::rates::RateTable;

/// Source of exchange rate tables.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Fetch the full rate table for `base`.
    ///
    /// Membership of `base` in any local catalog is not checked; the remote
    /// service decides what it knows.
    async fn fetch_rates(&self, base: &Currency) -> FxResult<RateTable>;

    /// Convert `amount` from one currency to another.
    ///
    /// Identical currencies return `amount` unchanged without a fetch.
    async fn convert(&self, amount: f64, from: &Currency, to: &Currency) -> FxResult<f64> {
        if from == to {
            return Ok(amount);
        }

        let table = self.fetch_rates(from).await?;
        let rate = table
            .rate(to)
            .ok_or_else(|| FxError::RateNotFound(to.clone()))?;

        debug!(provider = self.name(), from = %from, to = %to, rate, "Applied rate");

        Ok(amount * rate)
    }
}

/// Mock rate provider for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateProvider {
    name: String,
    tables: dashmap::DashMap<Currency, RateTable>,
    failures: dashmap::DashMap<Currency, crate::error::FetchError>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateProvider {
    /// Create a new mock provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: dashmap::DashMap::new(),
            failures: dashmap::DashMap::new(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Serve `table` for its base currency.
    pub fn set_table(&self, table: RateTable) {
        self.failures.remove(&table.base);
        self.tables.insert(table.base.clone(), table);
    }

    /// Serve a single rate for `from` -> `to`, keeping other entries for `from`.
    pub fn set_rate(&self, from: Currency, to: Currency, rate: f64) {
        self.failures.remove(&from);
        self.tables
            .entry(from.clone())
            .or_insert_with(|| RateTable::new(from, "2024-01-05"))
            .rates
            .insert(to, rate);
    }

    /// Fail every fetch for `base` with `error`.
    pub fn fail_with(&self, base: Currency, error: crate::error::FetchError) {
        self.failures.insert(base, error);
    }

    /// Number of fetches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rates(&self, base: &Currency) -> FxResult<RateTable> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if let Some(error) = self.failures.get(base) {
            return Err(FxError::Fetch(error.clone()));
        }

        self.tables.get(base).map(|t| t.clone()).ok_or_else(|| {
            FxError::Fetch(crate::error::FetchError::Status {
                status: 422,
                reason: format!("Unknown base currency {}", base),
            })
        })
    }
}
