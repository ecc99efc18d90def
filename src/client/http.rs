//! reqwest-backed client for the remote query API.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

use crate::client::QueryClient;
use crate::client::errors::{TransportError, TransportResult};
use crate::client::wire::{PaginatedDocs, QueryBody};
use crate::domain::collection::Collection;
use crate::domain::page::{Page, Record};
use crate::domain::query::{DetailRequest, Query};

/// Public SpaceX API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.spacexdata.com/v4";

/// Timeout ceiling applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT_VALUE: &str = concat!("spacexplorer/", env!("CARGO_PKG_VERSION"));

/// Issues queries against `{base_url}/{collection}/query`.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQueryClient {
    /// Creates a client for `base_url` (without trailing `/query` segments).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TransportResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query_url(&self, collection: Collection) -> String {
        format!("{}/{}/query", self.base_url, collection)
    }

    async fn post_query(
        &self,
        collection: Collection,
        body: &QueryBody,
    ) -> TransportResult<PaginatedDocs> {
        let url = self.query_url(collection);
        log::debug!("POST {url}");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            log::error!("Query against {url} failed with {status}");
            return Err(TransportError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let docs = serde_json::from_slice::<PaginatedDocs>(&bytes)?;
        Ok(docs)
    }
}

impl QueryClient for HttpQueryClient {
    async fn run_query(&self, query: &Query) -> TransportResult<Page<Record>> {
        let docs = self
            .post_query(query.collection, &QueryBody::from(query))
            .await?;
        docs.into_page(query)
    }

    async fn get_by_id(&self, request: &DetailRequest) -> TransportResult<Vec<Record>> {
        let docs = self
            .post_query(request.collection, &QueryBody::from(request))
            .await?;
        Ok(docs.docs.into_iter().take(1).collect())
    }
}
