//! Single-page scrapers for marketplace and video sites
//!
//! Each scraper issues one unauthenticated GET to a fixed page and keeps the first
//! ten elements matching its selector. A page that matches nothing (anti-bot
//! challenge, client-side rendering, renamed classes) yields an empty list, not an
//! error; only transport failures and non-success statuses are errors.

use async_trait::async_trait;

use super::{HttpClient, TrendSource};
use crate::models::{SourceKind, TrendList, MAX_TREND_ITEMS};
use crate::parser::TextExtractor;
use crate::utils::error::FetchError;

/// Fixed-URL, fixed-selector page scraper
pub struct PageScraper {
    client: HttpClient,
    kind: SourceKind,
    url: String,
    extractor: TextExtractor,
}

impl PageScraper {
    /// Create a scraper for one page
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Parse` if the selector does not compile
    pub fn new(
        client: HttpClient,
        kind: SourceKind,
        url: &str,
        selector: &str,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            kind,
            url: url.to_string(),
            extractor: TextExtractor::new(selector)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extract the capped list from an already fetched page
    pub fn extract(&self, html: &str) -> TrendList {
        TrendList::from_texts(self.kind, self.extractor.extract_first(html, MAX_TREND_ITEMS))
    }
}

#[async_trait]
impl TrendSource for PageScraper {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self) -> Result<TrendList, FetchError> {
        let html = self.client.get_text(&self.url, &[]).await?;
        let trends = self.extract(&html);

        if trends.is_empty() {
            tracing::debug!(
                source = %self.kind,
                selector = self.extractor.selector(),
                body_len = html.len(),
                "Selector matched nothing"
            );
        } else {
            tracing::debug!(source = %self.kind, items = trends.len(), "Extracted trends");
        }

        Ok(trends)
    }
}
