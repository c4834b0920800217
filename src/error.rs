use std::time::Duration;

/// Everything a profile fetch can fail with.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid username {0:?}: must not be empty")]
    InvalidUsername(String),

    #[error("invalid limit {0}: must be a positive integer")]
    InvalidLimit(u32),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("user {0:?} not found")]
    UserNotFound(String),

    #[error("LeetCode returned errors: {}", .0.join("; "))]
    Service(Vec<String>),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::MalformedResponse(what.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to reach LeetCode: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LeetCode returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Other(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
