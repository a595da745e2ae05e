//! Settings resolution for CLI commands.
//!
//! Settings come from the optional `--config` TOML file, merged with
//! environment variables prefixed with `PRESIGN__`. The `--secret-key` and
//! `--access-key` flags (or `PRESIGN_SECRET_KEY` / `PRESIGN_ACCESS_KEY`)
//! override both.

use presign_common::expiry::{expires_at_from, now_unix};
use presign_common::settings::{Overrides, Settings};

use crate::error::CliError;
use crate::{CredentialArgs, ExpiryArgs};

/// Load settings and apply command-line overrides.
pub(crate) fn load_settings(credentials: &CredentialArgs) -> Result<Settings, CliError> {
    if let Some(path) = &credentials.config {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }
    }

    let overrides = Overrides {
        secret_key: credentials.secret_key.clone(),
        access_key: credentials.access_key.clone(),
    };

    let settings = Settings::load(credentials.config.as_deref(), &overrides)?;
    log::debug!("Loaded settings: {:?}", settings);
    Ok(settings)
}

/// Resolve the expiry from `--expires`, `--ttl` or the configured default TTL.
pub(crate) fn resolve_expiry(settings: &Settings, expiry: &ExpiryArgs) -> Result<i64, CliError> {
    if let Some(expires) = expiry.expires {
        return Ok(expires);
    }

    let ttl = expiry.ttl.unwrap_or(settings.signing.default_ttl_secs);
    Ok(expires_at_from(now_unix(), ttl)?)
}
