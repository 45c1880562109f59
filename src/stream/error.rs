use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("subscriber disconnected")]
    Disconnected,
    #[error("frame encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
