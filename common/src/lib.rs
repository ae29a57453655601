//! QuickFX Common Types
//!
//! Shared types used across the QuickFX conversion pipeline: currency codes and
//! pairs, the read-only currency catalog, and the amount text a user edits.

pub mod amount;
pub mod catalog;
pub mod currency;
pub mod error;

pub use amount::*;
pub use catalog::*;
pub use currency::*;
pub use error::*;
