//! Feed error types.

/// Errors reading the approved-data feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The feed itself could not be read. Fatal for the current request;
    /// the previous graph snapshot stays live and callers retry later.
    #[error("approved data feed unavailable: {0}")]
    Unavailable(String),

    /// The feed was readable but not parseable.
    #[error("malformed feed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<std::io::Error> for FeedError {
    fn from(e: std::io::Error) -> Self {
        FeedError::Unavailable(e.to_string())
    }
}
