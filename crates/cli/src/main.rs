//! Presign CLI for signing API requests.
//!
//! This tool provides commands for:
//! - Signing a request and printing the signature with its expiry
//! - Printing the authentication headers for a request
//! - Generating presigned upload and download URLs

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use presign_common::Operation;

mod config;
mod error;
mod logging;
mod sign;
#[cfg(test)]
mod test_support;
mod url;

use error::CliError;

#[derive(Parser)]
#[command(name = "presign")]
#[command(about = "Sign API requests and object URLs with HMAC-SHA256")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    credentials: CredentialArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug, Default)]
pub struct CredentialArgs {
    /// Path to a TOML settings file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Secret key used to sign
    #[arg(long, global = true, env = "PRESIGN_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Access key sent alongside the signature
    #[arg(long, global = true, env = "PRESIGN_ACCESS_KEY")]
    pub access_key: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ExpiryArgs {
    /// Absolute expiry as a unix timestamp
    #[arg(long, conflicts_with = "ttl", allow_hyphen_values = true)]
    pub expires: Option<i64>,

    /// Seconds from now until expiry (defaults to the configured TTL)
    #[arg(long)]
    pub ttl: Option<u64>,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method, used exactly as given
    #[arg(long, short)]
    pub method: String,

    /// Request path including the query string
    #[arg(long, short)]
    pub path: String,

    #[command(flatten)]
    pub expiry: ExpiryArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the signature and expiry for a request
    Sign {
        #[command(flatten)]
        request: RequestArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print X-Access-Key, X-Signature and X-Expires headers for a request
    Headers {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Generate a presigned object URL
    Url {
        /// Bucket name
        #[arg(long, short)]
        bucket: String,

        /// Object key
        #[arg(long, short)]
        key: String,

        /// Operation the URL authorizes
        #[arg(long, value_enum)]
        operation: OperationArg,

        /// Object version (download only)
        #[arg(long)]
        version_id: Option<String>,

        #[command(flatten)]
        expiry: ExpiryArgs,
    },
}

#[derive(Clone, ValueEnum, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum OperationArg {
    Upload,
    Download,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Upload => Operation::Upload,
            OperationArg::Download => Operation::Download,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if let Err(e) = run(cli, &mut std::io::stdout().lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let settings = config::load_settings(&cli.credentials)?;

    match cli.command {
        Commands::Sign { request, format } => sign::sign(&settings, &request, &format, out),
        Commands::Headers { request } => sign::headers(&settings, &request, out),
        Commands::Url {
            bucket,
            key,
            operation,
            version_id,
            expiry,
        } => url::presign(
            &settings,
            url::UrlArgs {
                bucket,
                key,
                operation: operation.into(),
                version_id,
            },
            &expiry,
            out,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::without_env;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sign_command() {
        let cli = without_env(|| {
            Cli::try_parse_from([
                "presign",
                "sign",
                "--method",
                "POST",
                "--path",
                "/api/presigned/url/upload?bucket=test&key=test1241",
                "--expires",
                "1700000000",
                "--secret-key",
                "s",
            ])
        })
        .unwrap();

        assert_eq!(cli.credentials.secret_key.as_deref(), Some("s"));
        match cli.command {
            Commands::Sign { request, format } => {
                assert_eq!(request.method, "POST");
                assert_eq!(request.expiry.expires, Some(1700000000));
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("Expected sign command"),
        }
    }

    #[test]
    fn test_expires_conflicts_with_ttl() {
        let result = without_env(|| {
            Cli::try_parse_from([
                "presign", "sign", "-m", "GET", "-p", "/", "--expires", "1", "--ttl", "60",
            ])
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_run_sign_end_to_end() {
        let cli = without_env(|| {
            Cli::try_parse_from([
                "presign",
                "--secret-key",
                "688fbfb6de25825153199abb7b9dbe41f1d7a6d949562351975ef590cd130024",
                "sign",
                "-m",
                "GET",
                "-p",
                "",
                "--expires",
                "0",
            ])
        })
        .unwrap();

        let mut out = Vec::new();
        without_env(|| run(cli, &mut out)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2a8f7845766487a12444a0b3c904d3f604dd7113731c1868eddc7820494948f1 0\n"
        );
    }
}
