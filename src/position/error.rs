use thiserror::Error;

#[derive(Debug, Error)]
pub enum PositionError {
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for PositionError {
    fn from(err: serde_json::Error) -> Self {
        PositionError::Decode(err.to_string())
    }
}
