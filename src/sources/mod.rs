//! Catalog sources that answer a search with Dublin Core records.
//!
//! This module defines the [`CatalogSource`] trait. The production
//! implementation is [`LibraryCloudSource`], which talks to the Harvard
//! LibraryCloud item API; [`MockSource`] returns canned payloads for tests.
//!
//! # Implementing a New Source
//!
//! 1. Create a struct that implements `CatalogSource`
//! 2. Implement `id`, `name` and `search`
//! 3. Map transport failures to [`SourceError::Network`], non-success
//!    statuses to [`SourceError::Api`] and undecodable bodies to
//!    [`SourceError::Parse`]

mod librarycloud;
pub mod mock;

pub use librarycloud::{LibraryCloudSource, DEFAULT_ENDPOINT, DEFAULT_QUERY_PARAM};
pub use mock::MockSource;

use crate::models::{ItemsPayload, SearchQuery};
use async_trait::async_trait;

/// A catalog that can be searched for bibliographic records.
#[async_trait]
pub trait CatalogSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "librarycloud")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Issue exactly one search request for `query`.
    async fn search(&self, query: &SearchQuery) -> Result<ItemsPayload, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("invalid endpoint URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SourceError::Api("LibraryCloud API returned status: 500".to_string()).to_string(),
            "API error: LibraryCloud API returned status: 500"
        );

        let json_err = serde_json::from_str::<ItemsPayload>("{").unwrap_err();
        let err = SourceError::from(json_err);
        assert!(matches!(err, SourceError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error: JSON:"));
    }

    #[test]
    fn test_url_error_is_invalid_request() {
        let err = SourceError::from(url::Url::parse("not a url").unwrap_err());
        assert!(matches!(err, SourceError::InvalidRequest(_)));
    }
}
