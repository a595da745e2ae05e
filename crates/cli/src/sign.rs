//! Request signing commands.

use std::io::Write;

use presign_common::Settings;

use crate::config::resolve_expiry;
use crate::error::CliError;
use crate::{OutputFormat, RequestArgs};

/// Sign a request and write `<signature> <expires>` (or JSON) to `out`.
pub(crate) fn sign(
    settings: &Settings,
    request: &RequestArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let expires = resolve_expiry(settings, &request.expiry)?;
    let signature = settings
        .signer()
        .sign(&request.method, &request.path, expires)?;

    match format {
        OutputFormat::Text => {
            writeln!(out, "{} {}", signature, expires)?;
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "signature": signature.to_hex(),
                "expires": expires,
                "method": request.method,
                "path": request.path,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    Ok(())
}

/// Write the authentication headers for a request to `out`, one per line.
pub(crate) fn headers(
    settings: &Settings,
    request: &RequestArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let access_key = settings.access_key().ok_or_else(|| {
        CliError::Config(
            "An access key is required; pass --access-key or set signing.access_key".into(),
        )
    })?;

    let expires = resolve_expiry(settings, &request.expiry)?;
    let signed = settings
        .signer()
        .sign_headers(access_key, &request.method, &request.path, expires)?;

    for (name, value) in signed.iter() {
        writeln!(out, "{}: {}", canonical_header_name(name.as_str()), value)?;
    }

    Ok(())
}

/// `x-access-key` -> `X-Access-Key`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
