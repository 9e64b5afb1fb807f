#[derive(Debug, thiserror::Error)]
pub enum DsrError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("Offline mode: no cached rate for {0}")]
    Offline(String),
}

pub type Result<T> = std::result::Result<T, DsrError>;
