//! CLI error types with miette diagnostics.
//!
//! Maps `beeswax_api::Error` and `beeswax_config::ConfigError` into
//! user-facing errors with actionable help text and exit codes.

use miette::Diagnostic;
use thiserror::Error;

use beeswax_api::Error as ApiError;
use beeswax_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Beeswax API")]
    #[diagnostic(
        code(beeswax::connection_failed),
        help(
            "Check the endpoint and your network.\n\
             Current endpoint: {endpoint}\n\
             Try: beeswax config show"
        )
    )]
    ConnectionFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(beeswax::auth_failed),
        help(
            "Verify your username and password.\n\
             Store new ones with: beeswax credentials set"
        )
    )]
    AuthFailed { message: String },

    #[error("Credential store error: {message}")]
    #[diagnostic(
        code(beeswax::keyring),
        help(
            "The OS keyring is unavailable or locked.\n\
             Set BEESWAX_USERNAME and BEESWAX_PASSWORD instead."
        )
    )]
    Keyring { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(beeswax::not_found),
        help("Run a list call, e.g. `beeswax call get {path}`, to see what exists")
    )]
    NotFound { path: String, message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(beeswax::api_error))]
    Api { message: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(beeswax::validation))]
    Validation { field: String, reason: String },

    #[error("No Beeswax endpoint configured")]
    #[diagnostic(
        code(beeswax::no_endpoint),
        help(
            "Set one with: beeswax config set-endpoint https://<buzz-key>.api.beeswax.com/rest/\n\
             Or pass --endpoint / set BEESWAX_ENDPOINT.\n\
             Config file: {path}"
        )
    )]
    NoEndpoint { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(beeswax::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(beeswax::json), help("Check the JSON text and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::Keyring { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoEndpoint { .. } | Self::Config { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Treat a protocol failure as a rejected login.
    ///
    /// Used where the failing request was the authentication call itself.
    pub fn into_auth_failure(self) -> Self {
        match self {
            Self::Api { message } => Self::AuthFailed { message },
            other => other,
        }
    }

    pub(crate) fn prompt(e: impl std::fmt::Display) -> Self {
        Self::Validation {
            field: "interactive".into(),
            reason: format!("prompt failed: {e}"),
        }
    }
}

// ── Library errors → CliError ────────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if let ApiError::Credentials { message } = err {
            return CliError::Keyring { message };
        }
        match err.normalize() {
            ApiError::Configuration { message } => CliError::Config { message },
            ApiError::Transport(source) => CliError::ConnectionFailed {
                endpoint: source
                    .url()
                    .map_or_else(|| "(unknown)".into(), |u| u.origin().ascii_serialization()),
                source: Box::new(source),
            },
            ApiError::NotFound { path, key, value } => CliError::NotFound {
                message: format!("No {path} record matches {key}={value}"),
                path,
            },
            ApiError::Protocol { message } => CliError::Api { message },
            other => CliError::Api {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoEndpoint => CliError::NoEndpoint {
                path: beeswax_config::config_path().display().to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Keyring(e) => CliError::Keyring {
                message: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => {
                CliError::Config {
                    message: other.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_exit_codes() {
        let not_found: CliError = ApiError::NotFound {
            path: "campaign".into(),
            key: "campaign_id".into(),
            value: "62".into(),
        }
        .into();
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);

        let protocol: CliError = ApiError::Protocol {
            message: "invalid id".into(),
        }
        .into();
        assert_eq!(protocol.exit_code(), exit_code::GENERAL);
        assert_eq!(protocol.into_auth_failure().exit_code(), exit_code::AUTH);

        let missing = ApiError::MissingField {
            path: "campaign".into(),
            field: "campaign_name".into(),
        };
        assert!(matches!(CliError::from(missing), CliError::Api { .. }));
    }

    #[test]
    fn config_errors_map_to_usage() {
        assert_eq!(CliError::from(ConfigError::NoEndpoint).exit_code(), exit_code::USAGE);
    }
}
