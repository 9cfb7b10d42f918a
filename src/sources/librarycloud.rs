//! Harvard LibraryCloud item API source implementation.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::SearchConfig;
use crate::models::{ItemsPayload, SearchQuery};
use crate::sources::{CatalogSource, SourceError};
use crate::utils::HttpClient;

/// Dublin Core JSON flavor of the LibraryCloud item API
pub const DEFAULT_ENDPOINT: &str = "http://api.lib.harvard.edu/v2/items.dc.json";

/// Query string parameter carrying the search term
pub const DEFAULT_QUERY_PARAM: &str = "q";

/// LibraryCloud catalog source
///
/// Issues one `GET <endpoint>?q=<term>` per search and decodes the
/// `items.dc` record list. No retry, no paging.
#[derive(Debug, Clone)]
pub struct LibraryCloudSource {
    client: Arc<HttpClient>,
    endpoint: Url,
    query_param: String,
}

impl LibraryCloudSource {
    /// Source pointed at the public LibraryCloud endpoint
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&SearchConfig::default())
    }

    /// Source pointed at a custom endpoint (a mirror, or a mock server in tests)
    pub fn with_endpoint(endpoint: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::new()?),
            endpoint: Url::parse(endpoint)?,
            query_param: DEFAULT_QUERY_PARAM.to_string(),
        })
    }

    /// Build a source from the `[search]` configuration section
    pub fn from_config(config: &SearchConfig) -> Result<Self, SourceError> {
        let mut builder =
            HttpClient::builder().timeout(config.timeout_secs.map(Duration::from_secs));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        if config.query_param.is_empty() {
            return Err(SourceError::InvalidRequest(
                "query parameter name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            endpoint: Url::parse(&config.endpoint)?,
            query_param: config.query_param.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `query`, with the term percent-encoded
    pub fn request_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(&self.query_param, query.as_str());
        url
    }
}

#[async_trait]
impl CatalogSource for LibraryCloudSource {
    fn id(&self) -> &str {
        "librarycloud"
    }

    fn name(&self) -> &str {
        "Harvard LibraryCloud"
    }

    async fn search(&self, query: &SearchQuery) -> Result<ItemsPayload, SourceError> {
        let url = self.request_url(query);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search LibraryCloud: {}", e)))?;

        let status = response.status();
        tracing::debug!("LibraryCloud responded with {}", status);

        if !status.is_success() {
            return Err(SourceError::Api(format!(
                "LibraryCloud API returned status: {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response body: {}", e)))?;

        let payload: ItemsPayload = serde_json::from_str(&body)?;
        tracing::debug!("Decoded {} records", payload.len());

        Ok(payload)
    }
}
