//! Rate fetcher error types.

use quickfx_common::Currency;
use thiserror::Error;

/// Why a single request to the rates API failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, TLS or timeout failure before a response arrived.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API request failed: {status} {reason}")]
    Status { status: u16, reason: String },

    /// The response body was not a rate table.
    #[error("Malformed rates payload: {0}")]
    Decode(String),
}

/// Errors that can occur while fetching or applying rates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FxError {
    /// The rates request failed.
    #[error("Rate request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The returned table has no usable rate for the target currency.
    #[error("Exchange rate not found for {0}")]
    RateNotFound(Currency),

    /// Provider could not be constructed.
    #[error("Invalid rate provider configuration: {0}")]
    InvalidConfig(String),
}

impl FxError {
    /// Check if this error came from the network round trip.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, FxError::Fetch(_))
    }
}

/// Result type for rate operations.
pub type FxResult<T> = Result<T, FxError>;
