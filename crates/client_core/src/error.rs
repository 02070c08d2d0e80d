use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("successful simulate response carried no qualifying list")]
    MissingQualifiers,
}
