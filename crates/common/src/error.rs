//! Error types for signing operations.
//!
//! Errors are carried inside [`error_stack::Report`] so callers can attach
//! context while propagating with `?`.

use derive_more::Display;

/// Errors raised while building signatures or loading signing settings.
#[derive(Debug, Display)]
pub enum SigningError {
    /// Input was rejected before hashing.
    #[display("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Settings could not be loaded or failed validation.
    #[display("Configuration error: {message}")]
    Configuration { message: String },
}

impl core::error::Error for SigningError {}

impl SigningError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
