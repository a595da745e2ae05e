//! CLI error types.

use std::fmt;

use error_stack::Report;
use presign_common::SigningError;

#[derive(Debug)]
pub enum CliError {
    /// Settings could not be loaded
    Config(String),
    /// Input rejected by the signer
    Signing(String),
    /// IO error
    Io(std::io::Error),
    /// JSON serialization error
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Signing(msg) => write!(f, "Signing error: {}", msg),
            CliError::Io(err) => write!(f, "IO error: {}", err),
            CliError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

impl From<Report<SigningError>> for CliError {
    fn from(report: Report<SigningError>) -> Self {
        log::debug!("{:?}", report);
        match report.current_context() {
            SigningError::Configuration { .. } => CliError::Config(format!("{report:#}")),
            SigningError::InvalidArgument { message } => CliError::Signing(message.clone()),
        }
    }
}
