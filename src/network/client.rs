//! HTTP client for the search backend

use crate::config::BackendSettings;
use crate::error::{Error, Result};
use crate::results::SearchResponse;
use crate::search::SearchQuery;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Anything that can answer a search query with a backend response
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}

/// reqwest-based client for `GET /api/search`
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: Url,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(&BackendSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &BackendSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .gzip(true)
            .build()?;

        let base = Url::parse(&settings.base_url)?;
        let endpoint = base.join(&settings.search_path)?;

        Ok(Self { client, endpoint })
    }

    /// Search endpoint without query parameters
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for a query.
    ///
    /// The query text is percent-encoded component-wise (spaces become `%20`).
    pub fn search_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "query={}&model={}",
            urlencoding::encode(&query.query),
            query.model.as_str()
        )));
        url
    }
}

#[async_trait]
impl SearchBackend for HttpClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = self.search_url(query);
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::request_failed(format!("HTTP {}", status.as_u16())));
        }

        let body = response.json::<SearchResponse>().await?;
        Ok(body)
    }
}
