//! Configuration management for trendcast
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files. Every default mirrors the fixed constants the dashboard was built
//! around, so an empty environment reproduces the stock behavior.

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::parser::selectors;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP client configuration
    pub http: HttpConfig,

    /// Trend source configuration
    pub sources: SourcesConfig,

    /// Forecast configuration
    pub forecast: ForecastConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds; `None` keeps the client default
    pub request_timeout_secs: Option<u64>,

    /// User agent string
    pub user_agent: String,

    /// Enable cookie persistence
    pub enable_cookies: bool,
}

/// Trend source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub google_trends: GoogleTrendsConfig,
    pub aliexpress: ScraperConfig,
    pub amazon: ScraperConfig,
    pub tiktok: ScraperConfig,
    pub instagram: InstagramConfig,
}

/// Search-trend service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleTrendsConfig {
    /// Service root
    pub base_url: String,

    /// Seed keywords; the first one feeds the dashboard
    pub keywords: Vec<String>,

    /// Relative time window
    pub timeframe: String,

    /// Host language
    pub hl: String,

    /// Timezone offset in minutes
    pub tz: i32,

    /// Geo used for the cookie bootstrap request
    pub geo: String,
}

/// Page scraper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Page to fetch
    pub url: String,

    /// CSS selector for the trend elements
    pub selector: String,
}

/// Hashtag source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramConfig {
    /// API root
    pub base_url: String,

    /// Hashtags, queried in order
    pub hashtags: Vec<String>,

    /// Public web application id sent with every request
    pub app_id: String,
}

/// Synthetic series and model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Generator seed
    pub seed: u64,

    /// First date of the synthetic series
    pub start_date: NaiveDate,

    /// Number of daily points in the synthetic series
    pub periods: usize,

    /// Days projected past the last observation
    pub horizon_days: usize,

    /// Seasonal period in days
    pub seasonal_period: usize,

    /// Probability mass covered by the bounds (0, 1)
    pub interval_width: f64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(secs) = env_parse::<u64>("TRENDCAST_REQUEST_TIMEOUT")? {
            config.http.request_timeout_secs = Some(secs);
        }

        if let Ok(user_agent) = std::env::var("TRENDCAST_USER_AGENT") {
            config.http.user_agent = user_agent;
        }

        if let Ok(keywords) = std::env::var("TRENDCAST_KEYWORDS") {
            config.sources.google_trends.keywords = split_list(&keywords);
        }

        if let Ok(timeframe) = std::env::var("TRENDCAST_TIMEFRAME") {
            config.sources.google_trends.timeframe = timeframe;
        }

        if let Ok(hashtags) = std::env::var("TRENDCAST_HASHTAGS") {
            config.sources.instagram.hashtags = split_list(&hashtags);
        }

        if let Some(seed) = env_parse::<u64>("TRENDCAST_SEED")? {
            config.forecast.seed = seed;
        }

        if let Some(horizon) = env_parse::<usize>("TRENDCAST_HORIZON_DAYS")? {
            config.forecast.horizon_days = horizon;
        }

        if let Ok(level) = std::env::var("TRENDCAST_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("TRENDCAST_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.sources.google_trends.keywords.is_empty() {
            anyhow::bail!("google_trends.keywords must not be empty");
        }

        for (name, scraper) in [
            ("aliexpress", &self.sources.aliexpress),
            ("amazon", &self.sources.amazon),
            ("tiktok", &self.sources.tiktok),
        ] {
            url::Url::parse(&scraper.url)
                .with_context(|| format!("{name}.url is not a valid URL: {}", scraper.url))?;
            if scraper.selector.trim().is_empty() {
                anyhow::bail!("{name}.selector must not be empty");
            }
        }

        url::Url::parse(&self.sources.google_trends.base_url)
            .context("google_trends.base_url is not a valid URL")?;
        url::Url::parse(&self.sources.instagram.base_url)
            .context("instagram.base_url is not a valid URL")?;

        if self.forecast.seasonal_period < 2 {
            anyhow::bail!("seasonal_period must be at least 2");
        }

        if self.forecast.periods < self.forecast.seasonal_period * 2 {
            anyhow::bail!("periods must cover at least two seasonal periods");
        }

        if !(self.forecast.interval_width > 0.0 && self.forecast.interval_width < 1.0) {
            anyhow::bail!("interval_width must be between 0 and 1");
        }

        let days = self
            .forecast
            .periods
            .checked_add(self.forecast.horizon_days)
            .and_then(|days| u64::try_from(days).ok());
        if days
            .and_then(|days| self.forecast.start_date.checked_add_days(Days::new(days)))
            .is_none()
        {
            anyhow::bail!(
                "forecast range from {} over {} + {} days exceeds the supported calendar",
                self.forecast.start_date,
                self.forecast.periods,
                self.forecast.horizon_days
            );
        }

        if self.http.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        Ok(())
    }
}

impl HttpConfig {
    /// Get request timeout as Duration, if one is configured
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Invalid value for {key}: {value}")),
        Err(_) => Ok(None),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: None,
            user_agent: format!("trendcast/{}", env!("CARGO_PKG_VERSION")),
            enable_cookies: true,
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            google_trends: GoogleTrendsConfig::default(),
            aliexpress: ScraperConfig {
                url: String::from(
                    "https://www.aliexpress.com/wholesale?SearchText=trending+products",
                ),
                selector: String::from(selectors::ALIEXPRESS_PRODUCT_TITLE),
            },
            amazon: ScraperConfig {
                url: String::from("https://www.amazon.com/gp/movers-and-shakers"),
                selector: String::from(selectors::AMAZON_MOVERS_TITLE),
            },
            tiktok: ScraperConfig {
                url: String::from("https://www.tiktok.com/tag/trending-products"),
                selector: String::from(selectors::TIKTOK_TAG_TITLE),
            },
            instagram: InstagramConfig::default(),
        }
    }
}

impl Default for GoogleTrendsConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://trends.google.com"),
            keywords: vec![
                String::from("best products"),
                String::from("trending items"),
                String::from("hot selling"),
            ],
            timeframe: String::from("now 7-d"),
            hl: String::from("en-US"),
            tz: 360,
            geo: String::from("US"),
        }
    }
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://www.instagram.com"),
            hashtags: vec![
                String::from("#trendingproducts"),
                String::from("#viralproducts"),
                String::from("#dropshipping"),
            ],
            app_id: String::from("936619743392459"),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            periods: 90,
            horizon_days: 30,
            seasonal_period: 7,
            interval_width: 0.8,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}
