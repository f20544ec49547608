//! CLI error types with miette diagnostics.
//!
//! Maps `pecron_api::Error` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes emitted by the binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const COMMAND: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the cloud API")]
    #[diagnostic(
        code(pecron::connection_failed),
        help(
            "Check your network connection and region (--region / $PECRON_REGION).\n\
             Valid regions: CN, EU, US"
        )
    )]
    Connection {
        #[source]
        source: pecron_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Login failed: {message}")]
    #[diagnostic(
        code(pecron::auth_failed),
        help(
            "Verify your email, password, and region.\n\
             Accounts only authenticate against the region they were registered in."
        )
    )]
    AuthFailed { message: String },

    #[error("{name} is required")]
    #[diagnostic(
        code(pecron::missing_credential),
        help("Pass --{flag}, set ${env}, or run from an interactive terminal.")
    )]
    MissingCredential {
        name: String,
        flag: String,
        env: String,
    },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Device not found: {message}")]
    #[diagnostic(
        code(pecron::device_not_found),
        help("Run: pecron devices to see the devices bound to this account")
    )]
    DeviceNotFound { message: String },

    #[error("No device matching '{filter}' found")]
    #[diagnostic(code(pecron::no_match), help("Available devices: {available}"))]
    NoDeviceMatch { filter: String, available: String },

    // ── Commands ─────────────────────────────────────────────────────

    #[error("Command rejected: {message}")]
    #[diagnostic(code(pecron::command_rejected))]
    CommandRejected { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(pecron::api_error))]
    Api { code: i64, message: String },

    #[error("Unexpected response from the cloud API")]
    #[diagnostic(
        code(pecron::bad_response),
        help("Re-run with -vv to log the failing request.")
    )]
    BadResponse {
        #[source]
        source: pecron_api::Error,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pecron::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::MissingCredential { .. } => exit_code::AUTH,
            Self::DeviceNotFound { .. } | Self::NoDeviceMatch { .. } => exit_code::NOT_FOUND,
            Self::CommandRejected { .. } => exit_code::COMMAND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── pecron_api::Error → CliError mapping ─────────────────────────────

impl From<pecron_api::Error> for CliError {
    fn from(err: pecron_api::Error) -> Self {
        use pecron_api::Error as ApiError;
        match err {
            ApiError::Authentication { message, .. } => Self::AuthFailed { message },
            ApiError::DeviceNotFound { message, .. } => Self::DeviceNotFound { message },
            ApiError::Command { message, .. } => Self::CommandRejected { message },
            ApiError::Api { code, message } => Self::Api { code, message },
            other @ (ApiError::Transport(_) | ApiError::InvalidUrl(_)) => {
                Self::Connection { source: other }
            }
            other => Self::BadResponse { source: other },
        }
    }
}
