use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type SheetsResult<T> = Result<T, SheetsError>;
