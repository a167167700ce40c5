//! CLI error types with miette diagnostics.
//!
//! Maps `porkbun_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text. The "already gone" policy for deletes lives here
//! too: the client reports every API error verbatim and the CLI decides
//! which messages mean the target is missing.

use miette::Diagnostic;
use thiserror::Error;

use porkbun_api::Error as ApiError;
use porkbun_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

/// Server messages meaning the record, glue host or domain does not exist.
const NOT_FOUND_MESSAGES: &[&str] = &[
    "record not found",
    "Domain not found",
    "Domain does not exist",
    "Could not find glue record",
];

/// `true` if the API rejected the call because its target is gone.
pub fn is_not_found(err: &ApiError) -> bool {
    err.api_message()
        .is_some_and(|msg| NOT_FOUND_MESSAGES.iter().any(|needle| msg.contains(needle)))
}

fn is_auth_failure(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("api key") || lower.contains("not authorized")
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Porkbun API")]
    #[diagnostic(
        code(porkbun::connection_failed),
        help("Check your network connection, or the --base-url override if one is set.")
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(porkbun::timeout),
        help("Increase the timeout with --timeout or retry later.")
    )]
    Timeout,

    #[error("Interrupted")]
    #[diagnostic(code(porkbun::cancelled))]
    Cancelled,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(porkbun::auth_failed),
        help(
            "Verify both keys and that API access is enabled for the domain.\n\
             Run: porkbun ping"
        )
    )]
    AuthFailed { message: String },

    #[error("No {secret} configured for profile '{profile}'")]
    #[diagnostic(
        code(porkbun::no_credentials),
        help(
            "Set PORKBUN_API_KEY and PORKBUN_SECRET_API_KEY, pass --api-key and\n\
             --secret-api-key, or run: porkbun config set-secret api-key"
        )
    )]
    NoCredentials { profile: String, secret: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(porkbun::not_found),
        help("Run: porkbun {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Porkbun API error: {message}")]
    #[diagnostic(code(porkbun::api_error))]
    Api { message: String },

    #[error("HTTP {status} from the Porkbun API")]
    #[diagnostic(code(porkbun::http_error), help("Response body: {body}"))]
    Http { status: u16, body: String },

    #[error("Unexpected response from the Porkbun API")]
    #[diagnostic(code(porkbun::protocol))]
    Protocol {
        #[source]
        source: ApiError,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(porkbun::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(porkbun::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(porkbun::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(porkbun::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Cancelled => exit_code::INTERRUPTED,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the resource being addressed to a client error, so a
    /// not-found message becomes [`CliError::NotFound`].
    pub fn for_resource(
        err: ApiError,
        resource_type: &str,
        identifier: &str,
        list_command: &str,
    ) -> Self {
        if is_not_found(&err) {
            return Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            };
        }
        err.into()
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if err.is_transport() {
            return match err {
                ApiError::Cancelled => Self::Cancelled,
                e if e.is_timeout() => Self::Timeout,
                e => Self::ConnectionFailed { source: e },
            };
        }
        match err {
            ApiError::Api { message } => {
                if is_auth_failure(&message) {
                    Self::AuthFailed { message }
                } else {
                    Self::Api { message }
                }
            }
            ApiError::Http { status, body } => Self::Http { status, body },
            ApiError::InvalidUrl(_) | ApiError::InvalidBaseUrl(_) => Self::Validation {
                field: "base-url".into(),
                reason: err.to_string(),
            },
            // Encoding and Decoding; transport variants returned above.
            _ => Self::Protocol { source: err },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile, secret } => Self::NoCredentials {
                profile,
                secret: secret.to_string(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Client(api) => api.into(),
            other => Self::Config(other),
        }
    }
}
