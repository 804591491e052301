use thiserror::Error;

use crate::{exit_codes::OdExitCode, http_utils::TransportError};

/// Error raised by a single API round-trip
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Transport(#[from] TransportError),
    /// The service answered with something other than 200
    #[error("got HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    /// A 200 response whose body is not the expected JSON document
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// A 200 response lacking a field the client needs
    #[error("{endpoint} response has no {field}")]
    MissingField { endpoint: String, field: String },
    /// The endpoint path could not be joined onto the base URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The liveness check failed or no session is held
    #[error("not logged in")]
    NotLoggedIn,
}

/// Error raised while uploading a file
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("local file {0} is not a regular file")]
    NotAFile(String),
    #[error("remote directory {0} could not be resolved")]
    UnresolvedDirectory(String),
}

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error related to configuration loading or credential resolution
    #[error("{0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),
    /// Error when the HTTP client cannot be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientError(#[from] TransportError),
    /// Error when the service rejects the credentials
    #[error("Login failed")]
    LoginFailed,
    /// Error when a file reference cannot be turned into an ID
    #[error("Could not resolve {0}")]
    UnresolvedReference(String),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// Error when an API operation reports failure
    #[error("Operation '{0}' failed")]
    OperationFailed(String),
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand")]
    UnsupportedSubcommand(String),
}

impl CliError {
    /// Get the exit code for this error. Every failure maps to the same code.
    pub fn exit_code(&self) -> OdExitCode {
        OdExitCode::Failure
    }
}
