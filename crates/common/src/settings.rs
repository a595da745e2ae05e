//! Signing settings.
//!
//! Settings are read from an optional TOML file and merged with environment
//! variables prefixed with `PRESIGN__`. For example,
//! `PRESIGN__SIGNING__SECRET_KEY` overrides `signing.secret_key`. Explicit
//! overrides (command-line flags) win over both.

use core::fmt;
use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SigningError;
use crate::expiry::DEFAULT_TTL_SECS;
use crate::signing::{Signer, SigningKey};

pub const ENVIRONMENT_PREFIX: &str = "PRESIGN";

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

/// Signing settings. The secret key is wiped on drop.
#[derive(Deserialize, Validate, Zeroize, ZeroizeOnDrop)]
pub struct Signing {
    /// Public identifier sent as `X-Access-Key`.
    #[serde(default)]
    #[zeroize(skip)]
    pub access_key: Option<String>,
    #[validate(length(min = 1, message = "secret_key must not be empty"))]
    pub secret_key: String,
    #[serde(default = "default_ttl_secs")]
    #[zeroize(skip)]
    #[validate(range(min = 1, message = "default_ttl_secs must be at least 1"))]
    pub default_ttl_secs: u64,
}

impl fmt::Debug for Signing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signing")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("default_ttl_secs", &self.default_ttl_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub signing: Signing,
}

/// Values that take precedence over the file and the environment.
#[derive(Debug, Default, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Overrides {
    pub secret_key: Option<String>,
    #[zeroize(skip)]
    pub access_key: Option<String>,
}

impl Settings {
    /// # Errors
    ///
    /// Returns [`SigningError::Configuration`] if the TOML cannot be parsed,
    /// required fields are missing, or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<SigningError>> {
        let builder =
            Config::builder().add_source(File::from_str(toml_str, FileFormat::Toml));
        Self::build(builder, &Overrides::default())
    }

    /// Loads settings from `path` (if any), the environment and `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Configuration`] if the file cannot be read,
    /// required fields are missing, or validation fails.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, Report<SigningError>> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            log::debug!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let source = path.map_or_else(|| "environment".to_string(), |p| p.display().to_string());
        Self::build(builder, overrides).attach(format!("settings source: {source}"))
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        overrides: &Overrides,
    ) -> Result<Self, Report<SigningError>> {
        let configuration_error = || SigningError::Configuration {
            message: "Failed to load settings".into(),
        };

        let environment = Environment::default()
            .prefix(ENVIRONMENT_PREFIX)
            .separator("__");

        let config = builder
            .add_source(environment)
            .set_override_option("signing.secret_key", overrides.secret_key.clone())
            .and_then(|b| {
                b.set_override_option("signing.access_key", overrides.access_key.clone())
            })
            .and_then(|b| b.build())
            .change_context(configuration_error())?;

        let settings: Settings = config
            .try_deserialize()
            .change_context(configuration_error())?;

        settings.validate().map_err(|e| {
            Report::new(SigningError::Configuration {
                message: format!("Settings validation failed: {e}"),
            })
        })?;

        Ok(settings)
    }

    #[must_use]
    pub fn signer(&self) -> Signer {
        Signer::new(SigningKey::from(self.signing.secret_key.as_str()))
    }

    #[must_use]
    pub fn access_key(&self) -> Option<&str> {
        self.signing.access_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        [signing]
        access_key = "3a0c876052f272deed948fe682e77dae"
        secret_key = "688fbfb6de25825153199abb7b9dbe41f1d7a6d949562351975ef590cd130024"
        "#;

    // Tests that read the environment hold temp-env's lock so that overrides
    // set by other tests cannot leak in.
    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset(
            [
                "PRESIGN__SIGNING__SECRET_KEY",
                "PRESIGN__SIGNING__ACCESS_KEY",
                "PRESIGN__SIGNING__DEFAULT_TTL_SECS",
            ],
            f,
        )
    }

    #[test]
    fn test_from_toml() {
        let settings = without_env(|| Settings::from_toml(TOML)).unwrap();
        assert_eq!(settings.access_key(), Some("3a0c876052f272deed948fe682e77dae"));
        assert_eq!(settings.signing.default_ttl_secs, DEFAULT_TTL_SECS);
        assert_eq!(
            settings.signer().sign("GET", "", 0).unwrap().to_hex(),
            "2a8f7845766487a12444a0b3c904d3f604dd7113731c1868eddc7820494948f1"
        );
    }

    #[test]
    fn test_missing_secret_key() {
        let err = without_env(|| Settings::from_toml("[signing]\naccess_key = \"abc\"\n"))
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            SigningError::Configuration { .. }
        ));
    }

    #[test]
    fn test_empty_secret_key_fails_validation() {
        let err = without_env(|| Settings::from_toml("[signing]\nsecret_key = \"\"\n"))
            .unwrap_err();
        assert!(err.current_context().to_string().contains("validation"));
    }

    #[test]
    fn test_zero_ttl_fails_validation() {
        let result = without_env(|| {
            Settings::from_toml("[signing]\nsecret_key = \"s\"\ndefault_ttl_secs = 0\n")
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_toml() {
        temp_env::with_var("PRESIGN__SIGNING__SECRET_KEY", Some("from-env"), || {
            let settings = Settings::from_toml(TOML).unwrap();
            assert_eq!(settings.signing.secret_key, "from-env");
        });
    }

    #[test]
    fn test_env_only() {
        temp_env::with_vars(
            [
                ("PRESIGN__SIGNING__SECRET_KEY", Some("env-secret")),
                ("PRESIGN__SIGNING__DEFAULT_TTL_SECS", Some("60")),
            ],
            || {
                let settings = Settings::load(None, &Overrides::default()).unwrap();
                assert_eq!(settings.signing.secret_key, "env-secret");
                assert_eq!(settings.signing.default_ttl_secs, 60);
                assert_eq!(settings.access_key(), None);
            },
        );
    }

    #[test]
    fn test_overrides_win_over_env() {
        temp_env::with_var("PRESIGN__SIGNING__SECRET_KEY", Some("env-secret"), || {
            let overrides = Overrides {
                secret_key: Some("flag-secret".into()),
                access_key: Some("flag-access".into()),
            };
            let settings = Settings::load(None, &overrides).unwrap();
            assert_eq!(settings.signing.secret_key, "flag-secret");
            assert_eq!(settings.access_key(), Some("flag-access"));
        });
    }

    #[test]
    fn test_secrets_zeroize_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<Signing>();
        assert_zeroize_on_drop::<Overrides>();

        let mut settings = without_env(|| Settings::from_toml(TOML)).unwrap();
        settings.signing.zeroize();
        assert!(settings.signing.secret_key.is_empty());
        assert_eq!(
            settings.access_key(),
            Some("3a0c876052f272deed948fe682e77dae")
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let settings = without_env(|| Settings::from_toml(TOML)).unwrap();
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("688fbfb6de"));
        assert!(rendered.contains("<redacted>"));
    }
}
