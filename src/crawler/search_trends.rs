//! Google Trends related-queries source
//!
//! Talks to the public (undocumented) Trends web API the same way the browser does:
//! - a bootstrap request to pick up session cookies
//! - an `explore` call that returns one widget per chart, each with a token
//! - one `relatedsearches` call per related-queries widget
//!
//! Every JSON body starts with an anti-XSSI guard that is stripped before parsing.
//! This source never fails: anything that goes wrong is logged and replaced by the
//! placeholder list.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::{HttpClient, TrendSource};
use crate::config::GoogleTrendsConfig;
use crate::models::{SourceKind, TrendList, TrendQuery};
use crate::utils::error::{FetchError, ParseError};
use crate::utils::strip_json_guard;

const EXPLORE_PATH: &str = "/trends/api/explore";
const RELATED_SEARCHES_PATH: &str = "/trends/api/widgetdata/relatedsearches";
const RELATED_QUERIES_WIDGET: &str = "RELATED_QUERIES";

/// Top and rising related queries for one keyword
///
/// A table the service returned empty, or did not return at all, is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedQueries {
    pub top: Option<Vec<String>>,
    pub rising: Option<Vec<String>>,
}

/// Related-queries fetcher for a fixed keyword comparison
pub struct SearchTrendsFetcher {
    client: HttpClient,
    base_url: String,
    query: TrendQuery,
    hl: String,
    tz: i32,
    geo: String,
}

impl SearchTrendsFetcher {
    /// Create a fetcher with the service's default locale settings
    pub fn new(client: HttpClient, base_url: &str, query: TrendQuery) -> Self {
        let defaults = GoogleTrendsConfig::default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            query,
            hl: defaults.hl,
            tz: defaults.tz,
            geo: defaults.geo,
        }
    }

    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidQuery` when no keyword is configured
    pub fn from_config(client: HttpClient, config: &GoogleTrendsConfig) -> Result<Self, FetchError> {
        let query = TrendQuery::new(config.keywords.iter().cloned(), config.timeframe.clone())
            .ok_or_else(|| FetchError::InvalidQuery("no keywords configured".to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query,
            hl: config.hl.clone(),
            tz: config.tz,
            geo: config.geo.clone(),
        })
    }

    pub fn query(&self) -> &TrendQuery {
        &self.query
    }

    /// Fetch related queries for every keyword of the comparison
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failures or when the explore response
    /// lacks the widget structure
    pub async fn related_queries(&self) -> Result<HashMap<String, RelatedQueries>, FetchError> {
        let tz = self.tz.to_string();

        // Session cookies; the body is irrelevant
        self.client
            .get_text(&format!("{}/", self.base_url), &[("geo", self.geo.as_str())])
            .await?;

        let payload = self.query.comparison_payload().to_string();
        let explore = self
            .client
            .get_text(
                &format!("{}{EXPLORE_PATH}", self.base_url),
                &[
                    ("hl", self.hl.as_str()),
                    ("tz", tz.as_str()),
                    ("req", payload.as_str()),
                ],
            )
            .await?;
        let explore = parse_guarded_json(&explore)?;

        let mut related = HashMap::new();
        for widget in related_query_widgets(&explore)? {
            let keyword = widget
                .pointer("/request/restriction/complexKeywordsRestriction/keyword/0/value")
                .and_then(Value::as_str)
                .ok_or_else(|| ParseError::MissingKey("widget keyword".to_string()))?;
            let token = widget
                .get("token")
                .and_then(Value::as_str)
                .ok_or_else(|| ParseError::MissingKey("widget token".to_string()))?;
            let request = widget
                .get("request")
                .ok_or_else(|| ParseError::MissingKey("widget request".to_string()))?
                .to_string();

            let body = self
                .client
                .get_text(
                    &format!("{}{RELATED_SEARCHES_PATH}", self.base_url),
                    &[
                        ("hl", self.hl.as_str()),
                        ("tz", tz.as_str()),
                        ("req", request.as_str()),
                        ("token", token),
                    ],
                )
                .await?;
            let data = parse_guarded_json(&body)?;

            tracing::debug!(keyword, "Fetched related queries");
            related.insert(
                keyword.to_string(),
                RelatedQueries {
                    top: ranked_keywords(&data, 0),
                    rising: ranked_keywords(&data, 1),
                },
            );
        }

        Ok(related)
    }
}

#[async_trait]
impl TrendSource for SearchTrendsFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::GoogleTrends
    }

    async fn fetch(&self) -> Result<TrendList, FetchError> {
        let primary = self.query.primary();

        match self.related_queries().await {
            Ok(related) => match related.get(primary).and_then(|r| r.top.as_ref()) {
                Some(top) => Ok(TrendList::from_texts(self.kind(), top.iter().cloned())),
                None => {
                    tracing::warn!(keyword = primary, "No top related queries returned");
                    Ok(TrendList::placeholder(self.kind()))
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching Google Trends");
                Ok(TrendList::placeholder(self.kind()))
            }
        }
    }
}

fn parse_guarded_json(body: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(strip_json_guard(body))?)
}

fn related_query_widgets(explore: &Value) -> Result<Vec<&Value>, ParseError> {
    let widgets = explore
        .get("widgets")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::MissingKey("widgets".to_string()))?;

    Ok(widgets
        .iter()
        .filter(|w| {
            w.get("id")
                .and_then(Value::as_str)
                .is_some_and(|id| id.contains(RELATED_QUERIES_WIDGET))
        })
        .collect())
}

/// Queries of ranked list `index` (0 = top, 1 = rising)
fn ranked_keywords(data: &Value, index: usize) -> Option<Vec<String>> {
    let queries: Vec<String> = data
        .pointer(&format!("/default/rankedList/{index}/rankedKeyword"))?
        .as_array()?
        .iter()
        .filter_map(|entry| entry.get("query").and_then(Value::as_str))
        .map(String::from)
        .collect();

    (!queries.is_empty()).then_some(queries)
}
