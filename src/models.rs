// Core data structures for the trend dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Maximum number of items kept per source
pub const MAX_TREND_ITEMS: usize = 10;

/// Sentinel shown when the search-trend service yields nothing usable
pub const NO_DATA_PLACEHOLDER: &str = "No trending data available";

/// Trend source enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    GoogleTrends,
    #[serde(rename = "aliexpress")]
    AliExpress,
    AmazonMovers,
    #[serde(rename = "tiktok")]
    TikTok,
    Instagram,
}

impl SourceKind {
    /// All sources in dashboard order
    pub const ALL: [SourceKind; 5] = [
        Self::GoogleTrends,
        Self::AliExpress,
        Self::AmazonMovers,
        Self::TikTok,
        Self::Instagram,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleTrends => "google_trends",
            Self::AliExpress => "aliexpress",
            Self::AmazonMovers => "amazon_movers",
            Self::TikTok => "tiktok",
            Self::Instagram => "instagram",
        }
    }

    /// Section heading on the dashboard
    pub fn heading(&self) -> &'static str {
        match self {
            Self::GoogleTrends => "Google Trends (Trending Searches)",
            Self::AliExpress => "AliExpress Trending Products",
            Self::AmazonMovers => "Amazon Movers & Shakers",
            Self::TikTok => "TikTok Trending Hashtags",
            Self::Instagram => "Instagram Trending Products",
        }
    }

    /// Table column label
    pub fn column_label(&self) -> &'static str {
        match self {
            Self::GoogleTrends => "Trending Searches",
            Self::AliExpress => "AliExpress Best Sellers",
            Self::AmazonMovers => "Amazon Trending Products",
            Self::TikTok => "TikTok Hashtags",
            Self::Instagram => "Instagram Reels Trends",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "google_trends" | "google" => Some(Self::GoogleTrends),
            "aliexpress" => Some(Self::AliExpress),
            "amazon_movers" | "amazon" => Some(Self::AmazonMovers),
            "tiktok" => Some(Self::TikTok),
            "instagram" => Some(Self::Instagram),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keyword comparison query for the search-trend service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendQuery {
    keywords: Vec<String>,
    timeframe: String,
}

impl TrendQuery {
    /// Create a query; returns `None` when no keyword is given
    pub fn new<I, S>(keywords: I, timeframe: impl Into<String>) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if keywords.is_empty() {
            return None;
        }
        Some(Self {
            keywords,
            timeframe: timeframe.into(),
        })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    /// The keyword whose related queries feed the dashboard
    pub fn primary(&self) -> &str {
        &self.keywords[0]
    }

    /// Comparison payload sent as the `req` parameter of the explore call
    pub fn comparison_payload(&self) -> serde_json::Value {
        let items: Vec<_> = self
            .keywords
            .iter()
            .map(|kw| json!({ "keyword": kw, "time": self.timeframe, "geo": "" }))
            .collect();
        json!({ "comparisonItem": items, "category": 0, "property": "" })
    }
}

/// A single extracted trend string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendItem {
    pub source: SourceKind,
    pub text: String,
}

/// Ordered, capped list of trend items from one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendList {
    source: SourceKind,
    items: Vec<TrendItem>,
}

impl TrendList {
    /// Build a list keeping the first `MAX_TREND_ITEMS` texts in order
    pub fn from_texts<I, S>(source: SourceKind, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = texts
            .into_iter()
            .take(MAX_TREND_ITEMS)
            .map(|text| TrendItem {
                source,
                text: text.into(),
            })
            .collect();
        Self { source, items }
    }

    /// Empty list for a source
    pub fn empty(source: SourceKind) -> Self {
        Self {
            source,
            items: Vec::new(),
        }
    }

    /// One-element list holding the no-data sentinel
    pub fn placeholder(source: SourceKind) -> Self {
        Self::from_texts(source, [NO_DATA_PLACEHOLDER])
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }

    pub fn items(&self) -> &[TrendItem] {
        &self.items
    }

    /// Item texts in extraction order
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this is the degraded sentinel list
    pub fn is_placeholder(&self) -> bool {
        self.items.len() == 1 && self.items[0].text == NO_DATA_PLACEHOLDER
    }
}

/// One day of the synthetic input series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One row of model output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Historical fit plus future projection, ordered by date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    rows: Vec<ForecastRow>,
    history_len: usize,
}

impl ForecastResult {
    /// Wrap rows where the first `history_len` cover observed dates
    pub fn new(rows: Vec<ForecastRow>, history_len: usize) -> Self {
        let history_len = history_len.min(rows.len());
        Self { rows, history_len }
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows covering the observed period
    pub fn history(&self) -> &[ForecastRow] {
        &self.rows[..self.history_len]
    }

    /// Rows beyond the last observation
    pub fn horizon(&self) -> &[ForecastRow] {
        &self.rows[self.history_len..]
    }
}

/// Outcome of one source for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Available { trends: TrendList },
    Unavailable { error: String },
}

/// A source together with its outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub source: SourceKind,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn available(trends: TrendList) -> Self {
        Self {
            source: trends.source(),
            status: SourceStatus::Available { trends },
        }
    }

    pub fn unavailable(source: SourceKind, error: impl Into<String>) -> Self {
        Self {
            source,
            status: SourceStatus::Unavailable {
                error: error.into(),
            },
        }
    }

    /// The list, if the source succeeded
    pub fn trends(&self) -> Option<&TrendList> {
        match &self.status {
            SourceStatus::Available { trends } => Some(trends),
            SourceStatus::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.status, SourceStatus::Available { .. })
    }
}
