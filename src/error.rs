use thiserror::Error;

pub type Result<T> = std::result::Result<T, QrawlError>;

/// Crate-level errors.
///
/// Per-address problems are never reported here; they are data carried by
/// [`Outcome`](crate::tools::types::Outcome) inside the batch report.
#[derive(Debug, Error)]
pub enum QrawlError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl QrawlError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
