use thiserror::Error;

/// Errors returned by the Naver clients.
#[derive(Debug, Error)]
pub enum NaverError {
    /// Missing or unusable credentials, or a client that cannot be built.
    #[error("configuration error: {0}")]
    Config(String),

    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    UpstreamStatus { endpoint: String, status: u16 },

    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body is not the JSON we expected.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON parsed but a field is missing or has an unusable value.
    #[error("unexpected response shape for {context}: {reason}")]
    DataShape { context: String, reason: String },
}

/// Coarse failure classes callers branch on when deciding skip/continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Upstream,
    Transport,
    DataShape,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Upstream => write!(f, "upstream"),
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::DataShape => write!(f, "data-shape"),
        }
    }
}

impl NaverError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            NaverError::Config(_) => ErrorKind::Configuration,
            NaverError::UpstreamStatus { .. } => ErrorKind::Upstream,
            NaverError::Http(e) if e.is_decode() => ErrorKind::DataShape,
            NaverError::Http(_) => ErrorKind::Transport,
            NaverError::Deserialize { .. } | NaverError::DataShape { .. } => ErrorKind::DataShape,
        }
    }

    /// HTTP status for upstream failures, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            NaverError::UpstreamStatus { status, .. } => Some(*status),
            NaverError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn shape(context: impl Into<String>, reason: impl Into<String>) -> Self {
        NaverError::DataShape {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
