use thiserror::Error;

/// Main error type for cuttle operations
#[derive(Error, Debug)]
pub enum CuttleError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),
}

/// Result type alias for cuttle operations
pub type Result<T> = std::result::Result<T, CuttleError>;
