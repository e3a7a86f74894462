//! Page source abstraction and the HTTP implementation.
//!
//! The remote listing protocol is `GET <base>/<name>/?page=<n>` returning a
//! JSON body with a `results` array of raw records and a nullable `next`
//! link; a null or absent `next` ends pagination.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::trace;

use holocron_core::{CollectionKind, Record};

use crate::error::FetchError;

/// Default per-page request timeout, matching the remote's historical
/// flakiness budget.
pub const DEFAULT_TIMEOUT_MS: u64 = 3500;

/// One page of a remote listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    /// Raw records on this page, in listing order
    #[serde(default)]
    pub results: Vec<Record>,

    /// Link to the next page; `None` ends pagination
    #[serde(default)]
    pub next: Option<String>,
}

impl Page {
    /// Whether a further page exists.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Where pages come from.
///
/// The seam between the gatherer and the network; tests substitute scripted
/// sources to exercise pagination without HTTP.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page (1-based) of a collection's listing.
    async fn fetch_page(&self, kind: CollectionKind, page: u32) -> Result<Page, FetchError>;
}

/// Page source backed by the remote HTTP API.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: String,
}

impl HttpPageSource {
    /// Create a source for `base_url` with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a source with the default timeout.
    pub fn with_default_timeout(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::new(base_url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_url(&self, kind: CollectionKind, page: u32) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/{}/?page={}", base, kind.remote_path(), page)
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, kind: CollectionKind, page: u32) -> Result<Page, FetchError> {
        let url = self.page_url(kind, page);
        trace!(collection = %kind, page, %url, "requesting page");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16()));
        }

        response
            .json::<Page>()
            .await
            .map_err(|e| FetchError::invalid_body(e.to_string()))
    }
}
