use thiserror::Error;

/// Top-level error type for the `beeswax-api` crate.
///
/// The four kinds callers act on are [`Configuration`](Self::Configuration),
/// [`Transport`](Self::Transport), [`Protocol`](Self::Protocol) and
/// [`NotFound`](Self::NotFound). The remaining variants describe local
/// failures; resource accessors fold them into `Protocol` before they reach
/// the caller (see [`Error::normalize`]).
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// No usable base endpoint (unset, empty, or not a valid URL once joined).
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The platform answered with `success: false`.
    #[error("Beeswax API error: {message}")]
    Protocol { message: String },

    /// A retrieve-style call matched no records.
    #[error("No {path} record matches {key}={value}")]
    NotFound {
        path: String,
        key: String,
        value: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body was not a valid envelope, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A required request field was not supplied.
    #[error("Missing required field '{field}' for {path}")]
    MissingField { path: String, field: String },

    // ── Local ───────────────────────────────────────────────────────
    /// The credential store could not be read or written.
    #[error("Credential store error: {message}")]
    Credentials { message: String },

    /// Reading an upload file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Returns `true` if this error may be cured by re-authenticating the
    /// session and issuing the same request once more.
    ///
    /// An expired session surfaces either as a dropped connection or as a
    /// well-formed `success: false` envelope, so both qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Protocol { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Fold local failures into the protocol kind.
    ///
    /// Configuration, transport, protocol and not-found errors keep their
    /// kind; everything else becomes `Protocol` carrying the original message.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Configuration { .. }
            | Self::Transport(_)
            | Self::Protocol { .. }
            | Self::NotFound { .. } => self,
            other => Self::Protocol {
                message: other.to_string(),
            },
        }
    }
}
