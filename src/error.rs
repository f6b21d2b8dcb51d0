//! Error types for the Floodgate library.

use thiserror::Error;

/// Main error type for Floodgate operations.
#[derive(Error, Debug)]
pub enum FloodgateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backing counter store failed a read or write.
    ///
    /// This is distinct from a deny decision: a denied request is a normal
    /// outcome, an unavailable store is a failure the caller must map to a
    /// service error (fail-closed).
    #[error("Counter store unavailable: {0}")]
    StoreUnavailable(String),

    /// Strict mode was requested against a store that has no atomic
    /// increment-with-ceiling primitive.
    #[error("Counter store does not support atomic increment-with-ceiling")]
    StrictModeUnsupported,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Floodgate operations.
pub type Result<T> = std::result::Result<T, FloodgateError>;
