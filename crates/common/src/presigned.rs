//! Presigned object URLs.
//!
//! A presigned URL grants one operation on one object until its expiry. The
//! signature covers the colon-joined message
//! `bucket:key:operation:expires_at:version_id` and is sent as URL-safe
//! base64 in the `sig` query parameter.

use core::fmt;

use error_stack::Report;

use crate::error::SigningError;
use crate::signing::{hmac_sha256, Signature, Signer};

const MESSAGE_SEPARATOR: char = ':';

/// The action a presigned URL authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Upload,
    Download,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Upload => "upload",
            Operation::Download => "download",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object and operation a URL is being presigned for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedObject {
    pub bucket: String,
    pub key: String,
    pub operation: Operation,
    pub expires_at: i64,
    pub version_id: Option<String>,
}

impl PresignedObject {
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        operation: Operation,
        expires_at: i64,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            operation,
            expires_at,
            version_id: None,
        }
    }

    #[must_use]
    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    fn version_id(&self) -> &str {
        self.version_id.as_deref().unwrap_or_default()
    }

    /// The string the signature is computed over.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.bucket,
            self.key,
            self.operation,
            self.expires_at,
            self.version_id()
        )
    }

    /// Checks that the message can be split back into its fields.
    ///
    /// Only the key may contain `:`; the bucket is bounded on the left by the
    /// start of the message and the version id on the right by its end.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidArgument`] if the bucket or key is
    /// empty, or if the bucket or version id contains `:`.
    pub fn validate(&self) -> Result<(), Report<SigningError>> {
        if self.bucket.is_empty() || self.key.is_empty() {
            return Err(Report::new(SigningError::invalid_argument(
                "bucket and key are required",
            )));
        }
        if self.bucket.contains(MESSAGE_SEPARATOR) {
            return Err(Report::new(SigningError::invalid_argument(
                "bucket must not contain ':'",
            ))
            .attach(format!("bucket: {:?}", self.bucket)));
        }
        if self.version_id().contains(MESSAGE_SEPARATOR) {
            return Err(Report::new(SigningError::invalid_argument(
                "version id must not contain ':'",
            )));
        }
        Ok(())
    }
}

/// A signed object URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    pub signature: Signature,
    pub expires_at: i64,
    pub url: String,
}

impl fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Signer {
    /// Builds a presigned URL for `object`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidArgument`] if the secret key is empty or
    /// if `object` fails [`PresignedObject::validate`].
    pub fn presign(&self, object: &PresignedObject) -> Result<PresignedUrl, Report<SigningError>> {
        if self.key().is_empty() {
            return Err(Report::new(SigningError::invalid_argument(
                "secret key must not be empty",
            )));
        }
        object.validate()?;

        let signature = hmac_sha256(self.key(), object.message().as_bytes());

        let mut url = format!(
            "/object/{}?bucket={}&key={}&expires={}&sig={}",
            object.operation,
            urlencoding::encode(&object.bucket),
            urlencoding::encode(&object.key),
            object.expires_at,
            urlencoding::encode(&signature.to_base64_url()),
        );
        if let Some(version_id) = object.version_id.as_deref().filter(|v| !v.is_empty()) {
            url.push_str("&versionID=");
            url.push_str(&urlencoding::encode(version_id));
        }

        log::debug!(
            "Presigned {} URL for {}/{} expiring at {}",
            object.operation,
            object.bucket,
            object.key,
            object.expires_at
        );

        Ok(PresignedUrl {
            signature,
            expires_at: object.expires_at,
            url,
        })
    }
}
