//! The search flow: guard the input, query the catalog, render the results.
//!
//! ```rust,no_run
//! use librarycloud_search::flow::SearchFlow;
//! use librarycloud_search::render::MemoryContainer;
//! use librarycloud_search::sources::LibraryCloudSource;
//! use librarycloud_search::ui::TerminalNotifier;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let flow = SearchFlow::new(
//!     Arc::new(LibraryCloudSource::new()?),
//!     Arc::new(TerminalNotifier::new()),
//! );
//! let mut container = MemoryContainer::new();
//! let outcome = flow.run("peanut butter", &mut container).await?;
//! println!("{} records", outcome.rendered);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::models::{GuardError, InputField, ResultSet, SearchQuery, EMPTY_QUERY_NOTICE};
use crate::render::{render_into, ResultSink};
use crate::sources::{CatalogSource, SourceError};
use crate::ui::Notifier;

/// Prefix of the notice shown when a request fails
pub const REQUEST_FAILED_PREFIX: &str = "Something went wrong: ";

/// Why a search produced no rendered output
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The field was empty; nothing was sent
    #[error("{}", EMPTY_QUERY_NOTICE)]
    EmptyQuery,

    /// Transport failure, non-success status, or undecodable body
    #[error("Search request failed: {0}")]
    RequestFailed(#[from] SourceError),

    /// The results container could not be written
    #[error("Failed to write results: {0}")]
    Output(#[from] std::io::Error),
}

impl From<GuardError> for SearchError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::EmptyQuery => SearchError::EmptyQuery,
        }
    }
}

/// Results of one completed search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub results: ResultSet,
    /// Fragments written to the container; zero when only fetched
    pub rendered: usize,
}

/// Guard → request → render, with one notice on rejection or failure.
///
/// Searches are not sequenced or cancelled. Two runs sharing a container
/// leave whichever response arrived last.
pub struct SearchFlow<N: Notifier + ?Sized> {
    source: Arc<dyn CatalogSource>,
    notifier: Arc<N>,
}

impl<N: Notifier + ?Sized> Clone for SearchFlow<N> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<N: Notifier + ?Sized> std::fmt::Debug for SearchFlow<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchFlow")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<N: Notifier + ?Sized> SearchFlow<N> {
    pub fn new(source: Arc<dyn CatalogSource>, notifier: Arc<N>) -> Self {
        Self { source, notifier }
    }

    pub fn source(&self) -> &Arc<dyn CatalogSource> {
        &self.source
    }

    /// Validate the field and fetch results without touching any container.
    pub async fn fetch<F>(&self, field: &F) -> Result<SearchOutcome, SearchError>
    where
        F: InputField + ?Sized,
    {
        let query = match SearchQuery::from_field(field.value()) {
            Ok(query) => query,
            Err(err) => {
                tracing::debug!("Search rejected: {}", err);
                self.notifier.alert(EMPTY_QUERY_NOTICE);
                return Err(err.into());
            }
        };

        tracing::info!("Searching {} for \"{}\"", self.source.name(), query);

        let payload = match self.source.search(&query).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!("Search on {} failed: {}", self.source.id(), err);
                self.notifier
                    .alert(&format!("{}{}", REQUEST_FAILED_PREFIX, err));
                return Err(SearchError::RequestFailed(err));
            }
        };

        let results = ResultSet::from_payload(&payload);
        tracing::info!("Received {} records", results.len());

        Ok(SearchOutcome {
            query,
            results,
            rendered: 0,
        })
    }

    /// Run a full search and replace `sink`'s content with the rendered results.
    ///
    /// On any error the sink is left exactly as it was.
    pub async fn run<F, S>(&self, field: &F, sink: &mut S) -> Result<SearchOutcome, SearchError>
    where
        F: InputField + ?Sized,
        S: ResultSink + ?Sized,
    {
        let mut outcome = self.fetch(field).await?;

        outcome.rendered = render_into(sink, &outcome.results).map_err(|err| {
            self.notifier
                .alert(&format!("{}{}", REQUEST_FAILED_PREFIX, err));
            SearchError::Output(err)
        })?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DcRecord, ItemsPayload};
    use crate::render::{MemoryContainer, SharedContainer};
    use crate::sources::MockSource;
    use crate::ui::RecordingNotifier;

    fn flow_with(source: Arc<MockSource>) -> (SearchFlow<RecordingNotifier>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (SearchFlow::new(source, Arc::clone(&notifier)), notifier)
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_request() {
        let source = Arc::new(MockSource::new());
        let (flow, notifier) = flow_with(Arc::clone(&source));
        let mut container = MemoryContainer::with_content("previous");

        let err = flow.run("", &mut container).await.unwrap_err();

        assert!(matches!(err, SearchError::EmptyQuery));
        assert_eq!(source.call_count(), 0);
        assert_eq!(notifier.messages(), vec!["Enter a search term"]);
        assert_eq!(container.content(), "previous");
    }

    #[tokio::test]
    async fn test_non_empty_input_issues_exactly_one_request() {
        let source = Arc::new(MockSource::with_payload(ItemsPayload::new(vec![
            DcRecord::new().creator("A").title("T"),
        ])));
        let (flow, notifier) = flow_with(Arc::clone(&source));
        let mut container = MemoryContainer::new();

        let outcome = flow.run(" raw term ", &mut container).await.unwrap();

        assert_eq!(source.call_count(), 1);
        assert_eq!(source.queries(), vec![" raw term ".to_string()]);
        assert_eq!(outcome.rendered, 1);
        assert!(notifier.is_empty());
        assert!(container
            .content()
            .contains("<span class='titleclass'>T</span>, by <span class='authorclass'>A</span>"));
    }

    #[tokio::test]
    async fn test_failure_leaves_container_untouched() {
        let source = Arc::new(MockSource::failing("connection reset"));
        let (flow, notifier) = flow_with(Arc::clone(&source));
        let mut container = MemoryContainer::with_content("<div>earlier results</div>");

        let err = flow.run("whales", &mut container).await.unwrap_err();

        assert!(matches!(err, SearchError::RequestFailed(_)));
        assert_eq!(container.content(), "<div>earlier results</div>");
        assert_eq!(
            notifier.messages(),
            vec!["Something went wrong: Network error: connection reset"]
        );
    }

    #[tokio::test]
    async fn test_fetch_does_not_render() {
        let source = Arc::new(MockSource::with_payload(ItemsPayload::new(vec![
            DcRecord::new().title("one"),
            DcRecord::new().title("two"),
        ])));
        let (flow, _notifier) = flow_with(source);

        let outcome = flow.fetch("anything").await.unwrap();
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.rendered, 0);
        assert_eq!(outcome.query.as_str(), "anything");
    }

    #[tokio::test]
    async fn test_later_search_replaces_earlier_output() {
        let source = Arc::new(MockSource::with_payload(ItemsPayload::new(vec![
            DcRecord::new().title("first search"),
            DcRecord::new().title("first search, again"),
        ])));
        let (flow, _notifier) = flow_with(Arc::clone(&source));
        let container = SharedContainer::new();

        flow.run("first", &mut container.clone()).await.unwrap();
        source.set_payload(ItemsPayload::new(vec![DcRecord::new().title("second search")]));
        flow.run("second", &mut container.clone()).await.unwrap();

        let content = container.content();
        assert!(!content.contains("first search"));
        assert_eq!(content.matches("<div class='oneresult'>").count(), 1);
    }
}
