//! Refresh error types.

use quickfx_fx::FxError;
use thiserror::Error;

/// Message shown when the amount does not parse as a non-negative number.
pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid positive number";

/// Message shown when the rate could not be obtained.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch exchange rate. Please try again.";

/// Why a rate refresh did not produce a rate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// Amount text is empty or not a non-negative number.
    #[error("Invalid amount")]
    InvalidAmount,

    /// Fetch failed or the table lacked the target currency.
    #[error(transparent)]
    Fx(#[from] FxError),
}

impl RefreshError {
    /// The message surfaced to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            RefreshError::InvalidAmount => INVALID_AMOUNT_MESSAGE,
            RefreshError::Fx(_) => FETCH_FAILED_MESSAGE,
        }
    }
}
