use std::path::PathBuf;
use thiserror::Error;

/// Failures detected before any output is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Invalid page range '{token}': {reason}")]
    MalformedRange { token: String, reason: &'static str },

    #[error("Page {page} is out of range (document has {total} pages)")]
    OutOfRange { page: usize, total: usize },

    #[error("Invalid angle {0}: must be 90, 180, 270, or -90")]
    InvalidAngle(i64),

    #[error("Invalid split count '{0}': must be a positive integer")]
    InvalidCount(String),

    #[error("Invalid insert position {0}: must be 0 or greater")]
    InvalidPosition(i64),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0}")]
    Usage(String),
}

impl PageError {
    pub(crate) fn malformed(token: &str, reason: &'static str) -> Self {
        PageError::MalformedRange {
            token: token.to_string(),
            reason,
        }
    }
}
