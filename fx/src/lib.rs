//! QuickFX Rate Fetcher
//!
//! Retrieves exchange rate tables from a remote rates API and derives
//! single-pair conversions from them.
//!
//! # Features
//!
//! - `RateProvider` trait with a provided `convert` operation
//! - HTTP provider speaking `GET <endpoint>?base=<CODE>`
//! - In-memory mock provider behind the `test-utils` feature
//!
//! # Example
//!
//! ```rust,ignore
//! use quickfx_common::Currency;
//! use quickfx_fx::{FxConfig, HttpRateProvider, RateProvider};
//!
//! let provider = HttpRateProvider::new(FxConfig::default())?;
//! let eur = provider.convert(100.0, &Currency::usd(), &Currency::eur()).await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod provider;
pub mod rates;

pub use config::FxConfig;
pub use error::{FetchError, FxError, FxResult};
pub use http::HttpRateProvider;
pub use provider::RateProvider;
pub use rates::RateTable;

#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockRateProvider;
