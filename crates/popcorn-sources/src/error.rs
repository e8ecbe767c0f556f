use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The remote answered but reported no matching movie
    #[error("{0}")]
    NotFound(String),

    #[error("Request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}
