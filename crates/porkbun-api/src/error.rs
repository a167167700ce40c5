use thiserror::Error;

/// Top-level error type for the `porkbun-api` crate.
///
/// The three response-side failures are deliberately distinct: a non-200
/// status ([`Http`](Self::Http)), a 200 carrying `"status": "ERROR"`
/// ([`Api`](Self::Api)), and a 200 whose body is not the expected JSON
/// ([`Decoding`](Self::Decoding)). Nothing is retried or recovered inside
/// the client; callers decide policy from the variant and its payload.
#[derive(Debug, Error)]
pub enum Error {
    // ── Request ─────────────────────────────────────────────────────
    /// The outgoing body could not be serialized into a JSON object.
    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:` style URLs).
    #[error("Base URL cannot be used for API endpoints: {0}")]
    InvalidBaseUrl(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, TLS, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller's cancellation token fired before the call completed.
    #[error("Request cancelled")]
    Cancelled,

    // ── Response ────────────────────────────────────────────────────
    /// Non-200 response. `body` is the raw response text, never parsed.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// HTTP 200 with `"status": "ERROR"` in the envelope.
    #[error("Porkbun API error: {message}")]
    Api { message: String },

    /// A 200 response that could not be decoded, with the raw body for debugging.
    #[error("Failed to decode response: {source}")]
    Decoding {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl Error {
    /// The server-reported message, if this is an [`Api`](Self::Api) error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => Some(message),
            _ => None,
        }
    }

    /// The HTTP status code, if this is an [`Http`](Self::Http) error.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request never produced a response
    /// (connection failure, timeout, or cancellation).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Cancelled)
    }

    /// Returns `true` if the transport gave up waiting for the server.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
