//! Instagram hashtag top-posts source
//!
//! Hashtags are walked in order as one lazy stream of post permalinks, and the
//! stream is cut at [`MAX_TREND_ITEMS`]. Once the cap is reached no further hashtag
//! is requested. The endpoint usually wants a logged-in session; unauthenticated
//! requests tend to get a login page or a 401, which surfaces as a `FetchError`.

use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::{HttpClient, TrendSource};
use crate::config::InstagramConfig;
use crate::models::{SourceKind, TrendList, MAX_TREND_ITEMS};
use crate::utils::error::{FetchError, ParseError};

const TAG_INFO_PATH: &str = "/api/v1/tags/web_info/";
const PERMALINK_BASE: &str = "https://www.instagram.com/p/";
const APP_ID_HEADER: &str = "x-ig-app-id";

/// Top-posts fetcher over a fixed list of hashtags
pub struct HashtagFetcher {
    client: HttpClient,
    base_url: String,
    hashtags: Vec<String>,
    app_id: String,
    limit: usize,
}

impl HashtagFetcher {
    /// Create a fetcher for `hashtags`, queried in the given order
    pub fn new(client: HttpClient, base_url: &str, hashtags: Vec<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            hashtags,
            app_id: InstagramConfig::default().app_id,
            limit: MAX_TREND_ITEMS,
        }
    }

    /// Create a fetcher from configuration
    pub fn from_config(client: HttpClient, config: &InstagramConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            ..Self::new(client, &config.base_url, config.hashtags.clone())
        }
    }

    pub fn hashtags(&self) -> &[String] {
        &self.hashtags
    }

    /// Fetch the top-post permalinks of a single hashtag
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failures, non-success statuses or a
    /// body that is not JSON
    pub async fn top_post_urls(&self, hashtag: &str) -> Result<Vec<String>, FetchError> {
        let tag = tag_name(hashtag);

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.app_id) {
            headers.insert(HeaderName::from_static(APP_ID_HEADER), value);
        }

        let body = self
            .client
            .get_text_with_headers(
                &format!("{}{TAG_INFO_PATH}", self.base_url),
                &[("tag_name", tag)],
                headers,
            )
            .await?;
        let data: Value = serde_json::from_str(&body).map_err(ParseError::from)?;

        let urls = top_post_permalinks(&data);
        tracing::debug!(hashtag = tag, posts = urls.len(), "Fetched top posts");
        Ok(urls)
    }
}

#[async_trait]
impl TrendSource for HashtagFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::Instagram
    }

    async fn fetch(&self) -> Result<TrendList, FetchError> {
        let urls: Vec<String> = stream::iter(self.hashtags.iter())
            .then(|hashtag| self.top_post_urls(hashtag))
            .map_ok(|urls| stream::iter(urls.into_iter().map(Ok::<String, FetchError>)))
            .try_flatten()
            .take(self.limit)
            .boxed()
            .try_collect()
            .await?;

        Ok(TrendList::from_texts(self.kind(), urls))
    }
}

/// Hashtag without its leading `#`
fn tag_name(hashtag: &str) -> &str {
    hashtag.trim().trim_start_matches('#')
}

/// Permalinks of the posts in the "top" sections, in response order
fn top_post_permalinks(data: &Value) -> Vec<String> {
    let Some(sections) = data.pointer("/data/top/sections").and_then(Value::as_array) else {
        return Vec::new();
    };

    sections
        .iter()
        .filter_map(|section| {
            section
                .pointer("/layout_content/medias")
                .and_then(Value::as_array)
        })
        .flatten()
        .filter_map(|media| media.pointer("/media/code").and_then(Value::as_str))
        .map(|code| format!("{PERMALINK_BASE}{code}/"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name("#dropshipping"), "dropshipping");
        assert_eq!(tag_name("viralproducts"), "viralproducts");
    }

    #[test]
    fn test_top_post_permalinks() {
        let data = json!({
            "data": {
                "top": {
                    "sections": [
                        { "layout_content": { "medias": [
                            { "media": { "code": "Cx1" } },
                            { "media": { "code": "Cx2" } }
                        ] } },
                        { "layout_content": { "one_by_two_item": {} } },
                        { "layout_content": { "medias": [ { "media": { "code": "Cx3" } } ] } }
                    ]
                }
            }
        });
        assert_eq!(
            top_post_permalinks(&data),
            vec![
                "https://www.instagram.com/p/Cx1/",
                "https://www.instagram.com/p/Cx2/",
                "https://www.instagram.com/p/Cx3/",
            ]
        );
    }

    #[test]
    fn test_missing_sections_is_empty() {
        assert!(top_post_permalinks(&json!({ "status": "ok" })).is_empty());
    }
}
