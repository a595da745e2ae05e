//! Presigned URL command.

use std::io::Write;

use presign_common::{Operation, PresignedObject, Settings};

use crate::config::resolve_expiry;
use crate::error::CliError;
use crate::ExpiryArgs;

pub(crate) struct UrlArgs {
    pub bucket: String,
    pub key: String,
    pub operation: Operation,
    pub version_id: Option<String>,
}

/// Generate a presigned URL and write it to `out`.
pub(crate) fn presign(
    settings: &Settings,
    args: UrlArgs,
    expiry: &ExpiryArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let expires = resolve_expiry(settings, expiry)?;

    let mut object = PresignedObject::new(args.bucket, args.key, args.operation, expires);
    if let Some(version_id) = args.version_id {
        if args.operation == Operation::Upload {
            log::warn!("Version id is ignored by servers for upload URLs");
        }
        object = object.with_version_id(version_id);
    }

    let presigned = settings.signer().presign(&object)?;
    writeln!(out, "{}", presigned)?;

    Ok(())
}
