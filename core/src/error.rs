//! Error types for the Product Lab core.

use thiserror::Error;

/// All possible errors from the core crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid product document: {0}")]
    InvalidProduct(String),

    #[error("invalid settings document: {0}")]
    InvalidSettings(String),

    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
