//! Error types for shared QuickFX types.

use thiserror::Error;

/// Errors raised while building or loading a currency catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog has no entries.
    #[error("Currency catalog is empty")]
    Empty,

    /// The same code appears more than once.
    #[error("Duplicate currency code in catalog: {0}")]
    DuplicateCode(String),

    /// A code is blank.
    #[error("Currency code cannot be empty")]
    EmptyCode,

    /// Catalog JSON could not be parsed.
    #[error("Invalid catalog format: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    /// Catalog file could not be read.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
