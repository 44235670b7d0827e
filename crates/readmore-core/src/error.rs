//! Error types for readmore-core

use thiserror::Error;

use crate::client::ApiError;
use crate::config::ConfigError;
use crate::domain::InvalidWorkId;
use crate::store::StoreError;

/// Result type alias for readmore operations
pub type Result<T> = std::result::Result<T, ReadMoreError>;

/// Top-level error for callers that drive the whole engine
#[derive(Error, Debug)]
pub enum ReadMoreError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    WorkId(#[from] InvalidWorkId),

    /// A book could not be found in any known listing
    #[error("Unknown book: {0}")]
    UnknownBook(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let err: ReadMoreError = ApiError::EmptyQuery.into();
        assert!(matches!(err, ReadMoreError::Api(_)));
        assert_eq!(err.to_string(), "API error: Empty search query");

        let err: ReadMoreError = ConfigError::OutOfRange("api.search_limit".to_string()).into();
        assert!(err.to_string().starts_with("Config error"));
    }
}
