use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed envelope. Fatal for the invocation; the caller's own
    /// redelivery policy decides what happens next.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
