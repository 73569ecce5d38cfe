//! Trend source adapters
//!
//! Every source implements [`TrendSource`] and returns a capped
//! [`TrendList`](crate::models::TrendList) or a [`FetchError`]. Sources share one
//! [`HttpClient`] but nothing else, and are run one after another by the dashboard.

pub mod hashtag;
pub mod page;
pub mod search_trends;

pub use hashtag::HashtagFetcher;
pub use page::PageScraper;
pub use search_trends::{RelatedQueries, SearchTrendsFetcher};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};

use crate::config::{Config, HttpConfig};
use crate::models::{SourceKind, TrendList};
use crate::utils::error::FetchError;

/// A single trend source
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Which source this adapter represents
    fn kind(&self) -> SourceKind;

    /// Fetch and extract the source's current trend list
    async fn fetch(&self) -> Result<TrendList, FetchError>;
}

/// Thin wrapper over a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .cookie_store(config.enable_cookies)
            .gzip(true);

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send a GET request and require a success status
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: HeaderMap,
    ) -> Result<Response, FetchError> {
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        tracing::debug!(url = %url, "Fetching URL");

        let mut request = self.client.get(url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(FetchError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        Ok(response)
    }

    /// Fetch and decode response body as text
    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        self.get_text_with_headers(url, query, HeaderMap::new()).await
    }

    /// Fetch with extra headers and decode the body as text
    pub async fn get_text_with_headers(
        &self,
        url: &str,
        query: &[(&str, &str)],
        headers: HeaderMap,
    ) -> Result<String, FetchError> {
        let response = self.get(url, query, headers).await?;
        response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Build the five sources in dashboard order
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created or a configured
/// selector does not compile
pub fn build_sources(config: &Config) -> Result<Vec<Box<dyn TrendSource>>, FetchError> {
    let client = HttpClient::new(&config.http)?;
    let sources = &config.sources;

    let mut built: Vec<Box<dyn TrendSource>> = Vec::with_capacity(SourceKind::ALL.len());
    built.push(Box::new(SearchTrendsFetcher::from_config(
        client.clone(),
        &sources.google_trends,
    )?));

    for (kind, page) in [
        (SourceKind::AliExpress, &sources.aliexpress),
        (SourceKind::AmazonMovers, &sources.amazon),
        (SourceKind::TikTok, &sources.tiktok),
    ] {
        built.push(Box::new(PageScraper::new(
            client.clone(),
            kind,
            &page.url,
            &page.selector,
        )?));
    }

    built.push(Box::new(HashtagFetcher::from_config(client, &sources.instagram)));
    Ok(built)
}
