// ── Core error types ──
//
// Errors the carrier facade can raise. A reply that parses but reports a
// failure severity is NOT an error: it comes back as a response with
// `success == false`. The `From<parcelgate_api::Error>` impl translates
// transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Reply errors ─────────────────────────────────────────────────
    /// The gateway answered with something that is not XML.
    #[error("Malformed reply from gateway: {message}")]
    MalformedReply { message: String, body: String },

    // ── Transport errors (wrapped, not exposed raw) ──────────────────
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        /// HTTP status code (if the gateway answered at all).
        status: Option<u16>,
        /// Whether resubmitting may succeed.
        transient: bool,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The raw reply body for malformed replies.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::MalformedReply { body, .. } => Some(body),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<parcelgate_api::Error> for CoreError {
    fn from(err: parcelgate_api::Error) -> Self {
        let transient = err.is_transient();
        match err {
            parcelgate_api::Error::MalformedDocument { message, body } => {
                Self::MalformedReply { message, body }
            }
            parcelgate_api::Error::Serialization(message) => Self::Internal(message),
            parcelgate_api::Error::HttpStatus { status, body } => Self::Transport {
                message: format!(
                    "gateway returned HTTP {status}: {}",
                    body.chars().take(200).collect::<String>()
                ),
                status: Some(status),
                transient,
            },
            other => Self::Transport {
                message: other.to_string(),
                status: None,
                transient,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_keeps_code_and_retry_hint() {
        let err = CoreError::from(parcelgate_api::Error::HttpStatus {
            status: 503,
            body: "busy".into(),
        });
        let (message, status, transient) = match err {
            CoreError::Transport {
                message,
                status,
                transient,
            } => (message, status, transient),
            other => panic!("expected a transport error, got {other:?}"),
        };
        assert_eq!(status, Some(503));
        assert!(transient);
        assert!(message.contains("HTTP 503: busy"));
    }

    #[test]
    fn unreadable_reply_keeps_its_body() {
        let err = CoreError::from(parcelgate_api::Error::MalformedDocument {
            message: "no root".into(),
            body: "oops".into(),
        });
        assert_eq!(err.raw_body(), Some("oops"));
        assert!(matches!(
            CoreError::from(parcelgate_api::Error::Tls("pem".into())),
            CoreError::Transport {
                status: None,
                transient: false,
                ..
            }
        ));
    }
}
