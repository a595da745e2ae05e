//! Authentication headers for signed API calls.
//!
//! A signed call carries the caller's access key, the hex signature and the
//! expiry it was computed over.

use error_stack::{Report, ResultExt};
use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::SigningError;
use crate::signing::{Signature, Signer};

pub const HEADER_ACCESS_KEY: HeaderName = HeaderName::from_static("x-access-key");
pub const HEADER_SIGNATURE: HeaderName = HeaderName::from_static("x-signature");
pub const HEADER_EXPIRES: HeaderName = HeaderName::from_static("x-expires");

/// The `X-Access-Key`, `X-Signature` and `X-Expires` values for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub access_key: String,
    pub signature: Signature,
    pub expires_at: i64,
}

impl SignedHeaders {
    /// Header name/value pairs in the order they are sent.
    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, String)> {
        [
            (HEADER_ACCESS_KEY, self.access_key.clone()),
            (HEADER_SIGNATURE, self.signature.to_hex()),
            (HEADER_EXPIRES, self.expires_at.to_string()),
        ]
        .into_iter()
    }

    /// Inserts the headers into `headers`, replacing any existing values.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidArgument`] if the access key is not a
    /// valid header value.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<(), Report<SigningError>> {
        for (name, value) in self.iter() {
            let value = HeaderValue::from_str(&value)
                .change_context(SigningError::invalid_argument(format!(
                    "invalid value for header {name}"
                )))?;
            headers.insert(name, value);
        }
        Ok(())
    }
}

impl Signer {
    /// Signs a request and packages the result as authentication headers.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidArgument`] if `access_key` is empty or
    /// if signing fails (see [`crate::signing::sign`]).
    pub fn sign_headers(
        &self,
        access_key: &str,
        method: &str,
        path: &str,
        expires_at: i64,
    ) -> Result<SignedHeaders, Report<SigningError>> {
        if access_key.is_empty() {
            return Err(Report::new(SigningError::invalid_argument(
                "access key must not be empty",
            )));
        }

        let signature = self.sign(method, path, expires_at)?;
        log::debug!("Signed {} {} for access key {}", method, path, access_key);

        Ok(SignedHeaders {
            access_key: access_key.to_string(),
            signature,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::SigningKey;

    const ACCESS_KEY: &str = "3a0c876052f272deed948fe682e77dae";

    fn signer() -> Signer {
        Signer::new(SigningKey::from(
            "688fbfb6de25825153199abb7b9dbe41f1d7a6d949562351975ef590cd130024",
        ))
    }

    #[test]
    fn test_sign_headers_values() {
        let signed = signer()
            .sign_headers(
                ACCESS_KEY,
                "POST",
                "/api/presigned/url/upload?bucket=test&key=test1241",
                1700000000,
            )
            .unwrap();

        let pairs: Vec<(HeaderName, String)> = signed.iter().collect();
        assert_eq!(pairs[0], (HEADER_ACCESS_KEY, ACCESS_KEY.to_string()));
        assert_eq!(
            pairs[1],
            (
                HEADER_SIGNATURE,
                "25c6b012262a372b7228e87400171423eaf4cc3d25dc0447780d64591e5b4de5".to_string()
            )
        );
        assert_eq!(pairs[2], (HEADER_EXPIRES, "1700000000".to_string()));
    }

    #[test]
    fn test_apply_replaces_existing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_EXPIRES, HeaderValue::from_static("1"));

        let signed = signer()
            .sign_headers(ACCESS_KEY, "GET", "/buckets", 1700000000)
            .unwrap();
        signed.apply(&mut headers).unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("X-Expires").unwrap(), "1700000000");
        assert_eq!(headers.get("X-Access-Key").unwrap(), ACCESS_KEY);
        assert_eq!(
            headers.get("X-Signature").unwrap().to_str().unwrap(),
            signed.signature.to_hex()
        );
    }

    #[test]
    fn test_sign_headers_rejects_empty_access_key() {
        let err = signer().sign_headers("", "GET", "/", 0).unwrap_err();
        assert!(matches!(
            err.current_context(),
            SigningError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_apply_rejects_unprintable_access_key() {
        let signed = signer()
            .sign_headers("bad\u{7f}key", "GET", "/", 0)
            .unwrap();
        let err = signed.apply(&mut HeaderMap::new()).unwrap_err();
        assert!(matches!(
            err.current_context(),
            SigningError::InvalidArgument { .. }
        ));
    }
}
