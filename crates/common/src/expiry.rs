//! Expiry timestamps in unix seconds.

use std::time::Duration;

use error_stack::Report;

use crate::error::SigningError;

/// One hour.
pub const DEFAULT_TTL_SECS: u64 = 3600;

#[must_use]
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Returns `now + ttl_secs`.
///
/// # Errors
///
/// Returns [`SigningError::InvalidArgument`] if the result does not fit in
/// an `i64`.
pub fn expires_at_from(now: i64, ttl_secs: u64) -> Result<i64, Report<SigningError>> {
    i64::try_from(ttl_secs)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or_else(|| {
            Report::new(SigningError::invalid_argument(format!(
                "ttl of {ttl_secs}s overflows the expiry timestamp"
            )))
        })
}

/// Expiry `ttl` from now, truncated to whole seconds.
///
/// # Errors
///
/// See [`expires_at_from`].
pub fn expires_in(ttl: Duration) -> Result<i64, Report<SigningError>> {
    expires_at_from(now_unix(), ttl.as_secs())
}
