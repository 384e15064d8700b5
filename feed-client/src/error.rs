use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the `feed-client` library.
pub enum FeedClientError {
    /// HTTP transport error (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The client was constructed from invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// The resource already exists (e.g. a taken email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The request was rejected by validation or business rules.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result alias for `feed-client` operations.
pub type FeedClientResult<T> = Result<T, FeedClientError>;

impl FeedClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
