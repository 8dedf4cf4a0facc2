//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use panelbridge_config::ConfigError;
use panelbridge_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(panelbridge::auth_failed),
        help(
            "The panel rejected the API token.\n\
             Re-pair with: panelbridge profile pair '<pairing string>'\n\
             Or set the PANELBRIDGE_TOKEN environment variable."
        )
    )]
    AuthFailed { message: String },

    #[error("Panel API error: {message}")]
    #[diagnostic(code(panelbridge::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(panelbridge::validation))]
    Validation { field: String, reason: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(panelbridge::no_token),
        help(
            "Pair with: panelbridge profile pair '<pairing string>'\n\
             Or set the PANELBRIDGE_TOKEN environment variable."
        )
    )]
    NoToken { profile: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(panelbridge::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: panelbridge profile pair '<pairing string>'"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No panel configured")]
    #[diagnostic(
        code(panelbridge::no_config),
        help(
            "Pass --host and --token, or create a profile with:\n\
             panelbridge profile pair '<pairing string>'\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(panelbridge::config))]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NoToken { .. } => exit_code::AUTH,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationRequired { message } => Self::AuthFailed { message },
            CoreError::Api { message, status } => Self::ApiError { message, status },
            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

impl From<panelbridge_api::Error> for CliError {
    fn from(err: panelbridge_api::Error) -> Self {
        Self::from(CoreError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoToken { profile } => Self::NoToken { profile },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
