//! # Error Types
//!
//! Decoding errors for shared primitives.

use thiserror::Error;

/// Errors raised when converting raw values into shared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The raw code does not name a flight status.
    #[error("Unknown flight status code: {0}")]
    UnknownStatusCode(u8),
}
