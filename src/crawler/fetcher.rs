use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::models::Result;

/// Query parameters for the directory search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub search_terms: String,
    pub geo_location_terms: String,
    pub page: u32,
}

/// Seam between the pipeline and the network, so tests can drive the
/// pipeline against canned HTML.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issues a GET for `url`, appending `query` as URL parameters when
    /// present, and returns the response body. Transport failures
    /// propagate to the caller unchanged; there is no retry or timeout.
    async fn fetch(&self, url: &str, query: Option<&SearchQuery>) -> Result<String>;
}

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; DirectoryScraper/1.0)")
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl Fetch for PageFetcher {
    async fn fetch(&self, url: &str, query: Option<&SearchQuery>) -> Result<String> {
        debug!("Fetching: {}", url);

        let mut request = self.client.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let body = request.send().await?.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
