//! Canonical request string.
//!
//! The signed message is the method, the path (query string included) and
//! the expiry timestamp joined by `\n`:
//!
//! ```text
//! POST
//! /api/presigned/url/upload?bucket=test&key=test1241
//! 1700000000
//! ```
//!
//! Fields are passed through verbatim. A verifier must rebuild the exact
//! same bytes, so no case folding, trimming or percent-decoding happens here.

use core::fmt;

use error_stack::Report;

use crate::error::SigningError;

/// Separator between canonical fields.
pub const FIELD_SEPARATOR: char = '\n';

/// Method, path and expiry of a request about to be signed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalRequest {
    pub method: String,
    pub path: String,
    pub expires_at: i64,
}

impl CanonicalRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>, expires_at: i64) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            expires_at,
        }
    }

    /// Rejects fields that would blur the boundary between method and path.
    ///
    /// Empty method and path are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidArgument`] if `method` or `path`
    /// contains a newline.
    pub fn validate(&self) -> Result<(), Report<SigningError>> {
        if self.method.contains(FIELD_SEPARATOR) {
            return Err(Report::new(SigningError::invalid_argument(
                "method must not contain a newline",
            )));
        }
        if self.path.contains(FIELD_SEPARATOR) {
            return Err(Report::new(SigningError::invalid_argument(
                "path must not contain a newline",
            ))
            .attach(format!("path: {:?}", self.path)));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.method, self.path, self.expires_at
        )
    }
}
