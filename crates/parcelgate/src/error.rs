//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use parcelgate_config::ConfigError;
use parcelgate_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REJECTED: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the FedEx gateway: {message}")]
    #[diagnostic(
        code(parcelgate::connection_failed),
        help(
            "Check your network connection and the profile's endpoint.\n\
             Transient failures (HTTP 5xx, timeouts) can be retried."
        )
    )]
    ConnectionFailed { message: String },

    #[error("The gateway sent a reply that is not XML: {message}")]
    #[diagnostic(
        code(parcelgate::malformed_reply),
        help("Run with -vv to log the raw reply body.")
    )]
    MalformedReply { message: String },

    // ── Carrier ──────────────────────────────────────────────────────
    #[error("FedEx rejected the {operation} request: {message}")]
    #[diagnostic(
        code(parcelgate::rejected),
        help("The message above is the gateway's own notification.")
    )]
    Rejected { operation: String, message: String },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(parcelgate::no_credentials),
        help(
            "Add csp_key and csp_password to the profile in the config file,\n\
             or set PARCELGATE_CSP_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    #[error("Invalid carrier configuration: {message}")]
    #[diagnostic(code(parcelgate::invalid_config))]
    InvalidConfig { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(parcelgate::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(parcelgate::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Add a [profiles.{name}] table to the config file."
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(parcelgate::no_config),
        help(
            "Create one with a [profiles.default] table holding csp_key and csp_password.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(parcelgate::config))]
    Config { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {message}")]
    #[diagnostic(code(parcelgate::internal))]
    Internal { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(parcelgate::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(parcelgate::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::MalformedReply { .. } => exit_code::CONNECTION,
            Self::NoCredentials { .. } | Self::InvalidConfig { .. } => exit_code::AUTH,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => CliError::InvalidConfig { message },
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            CoreError::MalformedReply { message, .. } => CliError::MalformedReply { message },
            CoreError::Transport { message, .. } => CliError::ConnectionFailed { message },
            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_rejection_has_its_own_exit_code() {
        let err = CliError::Rejected {
            operation: "rate".into(),
            message: "ERROR - 1000: Authentication Failed".into(),
        };
        assert_eq!(err.exit_code(), exit_code::REJECTED);
    }

    #[test]
    fn transport_errors_map_to_connection_failures() {
        let err = CliError::from(CoreError::Transport {
            message: "gateway returned HTTP 503".into(),
            status: Some(503),
            transient: true,
        });
        assert!(matches!(err, CliError::ConnectionFailed { .. }));
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn missing_profile_credentials_map_to_auth_exit_code() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "default".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
