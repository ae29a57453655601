//! Rate tables returned by the rates API.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use quickfx_common::Currency;
use serde::{Deserialize, Serialize};

/// Rates for every listed currency relative to one base.
///
/// Wire form: `{ "base": "USD", "date": "2024-01-05", "rates": { "EUR": 0.91, ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Base currency echoed back by the API.
    pub base: Currency,
    /// As-of date reported by the API.
    pub date: String,
    /// 1 base = rate units of each listed currency.
    pub rates: BTreeMap<Currency, f64>,
}

impl RateTable {
    /// Create a rate table.
    pub fn new(base: Currency, date: impl Into<String>) -> Self {
        Self {
            base,
            date: date.into(),
            rates: BTreeMap::new(),
        }
    }

    /// Add a rate, builder style.
    pub fn with_rate(mut self, code: impl Into<Currency>, rate: f64) -> Self {
        self.rates.insert(code.into(), rate);
        self
    }

    /// Usable rate for `to`. Missing, zero, negative and non-finite entries are absent.
    pub fn rate(&self, to: &Currency) -> Option<f64> {
        self.rates
            .get(to)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
    }

    /// The as-of date, when the API reports it as `YYYY-MM-DD`.
    pub fn as_of(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}
