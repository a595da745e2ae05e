//! HMAC-SHA256 request signing.
//!
//! A request is signed by running HMAC-SHA256 over its canonical string
//! (see [`crate::canonical`]) and hex-encoding the 32-byte tag.

use core::fmt;

use base64::{engine::general_purpose, Engine};
use error_stack::{Report, ResultExt};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::canonical::CanonicalRequest;
use crate::error::SigningError;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes.
pub const SIGNATURE_LEN: usize = 32;

/// Shared secret used to key the MAC.
///
/// The bytes are never printed; `Debug` output is redacted. They are wiped
/// when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn ensure_non_empty(&self) -> Result<(), Report<SigningError>> {
        if self.is_empty() {
            log::warn!("Refusing to sign with an empty secret key");
            return Err(Report::new(SigningError::invalid_argument(
                "secret key must not be empty",
            )));
        }
        Ok(())
    }
}

impl From<&str> for SigningKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<String> for SigningKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&[u8]> for SigningKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// A 32-byte HMAC-SHA256 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Lowercase hex, 64 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// URL-safe base64 with padding.
    #[must_use]
    pub fn to_base64_url(&self) -> String {
        general_purpose::URL_SAFE.encode(self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub(crate) fn hmac_sha256(key: &SigningKey, message: &[u8]) -> Signature {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    let tag = mac.finalize().into_bytes();

    let mut bytes = [0u8; SIGNATURE_LEN];
    bytes.copy_from_slice(&tag);
    Signature(bytes)
}

/// Signs a canonical request without validating it.
///
/// Any input is accepted, including an empty key or fields containing a
/// newline. The output matches clients that join the fields naively, so
/// this is only appropriate where every field is trusted.
#[must_use]
pub fn sign_unchecked(key: &SigningKey, request: &CanonicalRequest) -> Signature {
    let canonical = request.to_canonical_string();
    log::debug!("Signing canonical request: {:?}", canonical);
    hmac_sha256(key, canonical.as_bytes())
}

/// Signs `method`, `path` and `expires_at` with `key`.
///
/// The method is used exactly as given (no case normalization) and the path
/// must already contain any query parameters that should be covered.
/// `expires_at` is not checked against the current time.
///
/// # Errors
///
/// Returns [`SigningError::InvalidArgument`] if the key is empty or if
/// `method` or `path` contains a newline.
pub fn sign(
    key: &SigningKey,
    method: &str,
    path: &str,
    expires_at: i64,
) -> Result<Signature, Report<SigningError>> {
    sign_request(key, &CanonicalRequest::new(method, path, expires_at))
}

/// Validating variant of [`sign_unchecked`].
///
/// # Errors
///
/// Same as [`sign`].
pub fn sign_request(
    key: &SigningKey,
    request: &CanonicalRequest,
) -> Result<Signature, Report<SigningError>> {
    key.ensure_non_empty()?;
    request
        .validate()
        .attach(format!("method: {:?}", request.method))?;
    Ok(sign_unchecked(key, request))
}

/// Holds a signing key and signs requests with it.
///
/// A `Signer` is cheap to share across threads; it holds no mutable state.
#[derive(Debug, Clone)]
pub struct Signer {
    key: SigningKey,
}

impl Signer {
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    pub(crate) fn key(&self) -> &SigningKey {
        &self.key
    }

    /// # Errors
    ///
    /// See [`sign`].
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        expires_at: i64,
    ) -> Result<Signature, Report<SigningError>> {
        sign(&self.key, method, path, expires_at)
    }

    /// # Errors
    ///
    /// See [`sign`].
    pub fn sign_request(
        &self,
        request: &CanonicalRequest,
    ) -> Result<Signature, Report<SigningError>> {
        sign_request(&self.key, request)
    }
}
