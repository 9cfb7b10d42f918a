//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{ItemsPayload, SearchQuery};
use crate::sources::{CatalogSource, SourceError};

#[derive(Debug, Clone)]
enum MockReply {
    Payload(ItemsPayload),
    Failure(String),
}

/// A mock source that returns a predefined payload or failure and records
/// every query it receives.
#[derive(Debug, Default)]
pub struct MockSource {
    reply: Mutex<Option<MockReply>>,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source that answers with an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers with `payload`.
    pub fn with_payload(payload: ItemsPayload) -> Self {
        let source = Self::new();
        source.set_payload(payload);
        source
    }

    /// Create a mock whose every search fails with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        let source = Self::new();
        source.set_failure(message);
        source
    }

    /// Set the payload to return.
    pub fn set_payload(&self, payload: ItemsPayload) {
        if let Ok(mut guard) = self.reply.lock() {
            *guard = Some(MockReply::Payload(payload));
        }
    }

    /// Make subsequent searches fail.
    pub fn set_failure(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.reply.lock() {
            *guard = Some(MockReply::Failure(message.into()));
        }
    }

    /// Number of searches issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Raw query strings received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, query: &SearchQuery) -> Result<ItemsPayload, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.queries.lock() {
            guard.push(query.as_str().to_string());
        }

        let reply = self
            .reply
            .lock()
            .map_err(|_| SourceError::Other("mock source lock poisoned".to_string()))?
            .clone();

        match reply {
            Some(MockReply::Payload(payload)) => Ok(payload),
            Some(MockReply::Failure(message)) => Err(SourceError::Network(message)),
            None => Ok(ItemsPayload::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DcRecord;

    #[tokio::test]
    async fn test_mock_records_queries() {
        let source = MockSource::with_payload(ItemsPayload::new(vec![DcRecord::new().title("T")]));
        let query = SearchQuery::from_field("walden").unwrap();

        let payload = source.search(&query).await.unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.queries(), vec!["walden".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let source = MockSource::failing("connection refused");
        let query = SearchQuery::from_field("walden").unwrap();

        let err = source.search(&query).await.unwrap_err();
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
