// Error types for folio.
// Covers GitHub API failures, local storage failures, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FolioError {
    /// Whether this error came from talking to the remote API.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FolioError::Api(_)
                | FolioError::Unauthorized
                | FolioError::NotFound(_)
                | FolioError::RateLimited { .. }
                | FolioError::Status { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
