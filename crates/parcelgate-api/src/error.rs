use thiserror::Error;

/// Top-level error type for the `parcelgate-api` crate.
///
/// Covers transport failures and replies that cannot be read as XML at
/// all. A reply that parses but reports an error severity is *not* an
/// error at this layer; `parcelgate-core` turns it into a response with
/// `success == false`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Gateway answered with a non-2xx status.
    #[error("Gateway returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// TLS handshake or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// The reply body is not well-formed XML. Carries the raw body so the
    /// caller can inspect what the gateway actually sent.
    #[error("Malformed XML reply: {message}")]
    MalformedDocument { message: String, body: String },

    /// Writing a request document failed.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The raw reply body attached to this error, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } | Self::MalformedDocument { body, .. } => Some(body),
            _ => None,
        }
    }
}
