//! Error types for the lead-generation client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Submission errors.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Configuration error (missing or invalid base URL)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, body unreadable)
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status the retry policy treats as transient
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Non-2xx status returned without retry (400, 404)
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 2xx response whose body is not the expected JSON
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Every attempt failed
    #[error("Failed to fetch after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last_error: Box<SubmissionError>,
    },
}

impl SubmissionError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } | Self::Rejected { status, .. } => Some(*status),
            Self::RetriesExhausted { last_error, .. } => last_error.status(),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::Json(_) => None,
        }
    }
}
