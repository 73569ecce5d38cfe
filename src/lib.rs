//! trendcast - Trending product dashboard
//!
//! Pulls short lists of trending items from a search-trend service, three
//! marketplace/social pages and a hashtag feed, and pairs them with a 30-day
//! forecast of a synthetic daily series.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Source adapters and the shared HTTP client
//! - [`parser`] - HTML text extraction and scraping selectors
//! - [`analytics`] - Synthetic series generation and forecasting
//! - [`dashboard`] - Assembly and Markdown/JSON rendering
//! - [`models`] - Core data structures and types
//! - [`utils`] - Common utilities and domain errors
//!
//! # Example
//!
//! ```no_run
//! use trendcast::analytics::SyntheticForecast;
//! use trendcast::config::Config;
//! use trendcast::crawler::build_sources;
//! use trendcast::dashboard::{Dashboard, DashboardRenderer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let sources = build_sources(&config)?;
//!     let provider = SyntheticForecast::new(config.forecast.clone());
//!
//!     let dashboard = Dashboard::assemble(&sources, &provider).await?;
//!     println!("{}", DashboardRenderer::new()?.render_markdown(&dashboard)?);
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod crawler;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod parser;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{ForecastProvider, SyntheticForecast};
    pub use crate::config::Config;
    pub use crate::crawler::{build_sources, TrendSource};
    pub use crate::dashboard::{refresh_until, Dashboard, DashboardRenderer};
    pub use crate::error::{Error, ErrorCategory, Result, TrendcastErrorTrait};
    pub use crate::models::{
        ForecastResult, ForecastRow, SourceKind, SourceReport, SourceStatus, TrendList,
    };
}

// Direct re-exports for convenience
pub use models::{ForecastResult, SourceKind, TrendList};
