use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemoteError>;

/// Failures talking to the remote content store
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Resource already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The resource changed since its revision was last read
    #[error("Revision conflict on {path}")]
    RevisionConflict { path: String },

    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success response, with the raw body for diagnostics
    #[error("Remote error (HTTP {status}): {body}")]
    Remote { status: u16, body: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl RemoteError {
    /// Only transport failures are worth retrying, and only by the caller
    pub fn is_retryable(&self) -> bool {
        matches!(self, RemoteError::Network(_))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::InvalidPayload(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}
