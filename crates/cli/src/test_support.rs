//! Testing utilities.

/// Variables the CLI reads settings and credentials from.
const PRESIGN_ENV_VARS: [&str; 5] = [
    "PRESIGN__SIGNING__SECRET_KEY",
    "PRESIGN__SIGNING__ACCESS_KEY",
    "PRESIGN__SIGNING__DEFAULT_TTL_SECS",
    "PRESIGN_SECRET_KEY",
    "PRESIGN_ACCESS_KEY",
];

/// Run `f` with every presign variable unset, holding temp-env's lock so
/// tests that set variables cannot interleave.
pub(crate) fn without_env<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars_unset(PRESIGN_ENV_VARS, f)
}
