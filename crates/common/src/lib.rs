//! HMAC-SHA256 request signing.
//!
//! This crate signs API calls and object URLs with a shared secret so that a
//! server holding the same secret can authenticate them.
//!
//! # Modules
//!
//! - [`canonical`]: The `METHOD\nPATH\nEXPIRES` string a request is signed over
//! - [`error`]: Error types and error handling utilities
//! - [`expiry`]: Unix-seconds expiry arithmetic
//! - [`headers`]: `X-Access-Key` / `X-Signature` / `X-Expires` authentication headers
//! - [`presigned`]: Presigned upload and download URLs
//! - [`settings`]: Configuration management and validation
//! - [`signing`]: Signing keys, signatures and the [`Signer`]
//!
//! # Example
//!
//! ```
//! use presign_common::{Signer, SigningKey};
//!
//! let signer = Signer::new(SigningKey::from("secret"));
//! let signature = signer.sign("GET", "/buckets?limit=10", 1700000000).unwrap();
//! assert_eq!(signature.to_hex().len(), 64);
//! ```

pub mod canonical;
pub mod error;
pub mod expiry;
pub mod headers;
pub mod presigned;
pub mod settings;
pub mod signing;

pub use canonical::CanonicalRequest;
pub use error::SigningError;
pub use headers::SignedHeaders;
pub use presigned::{Operation, PresignedObject, PresignedUrl};
pub use settings::Settings;
pub use signing::{sign, sign_request, sign_unchecked, Signature, Signer, SigningKey};
