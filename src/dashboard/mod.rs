//! Dashboard assembly
//!
//! Runs every source once, in order, then asks the forecast provider for its
//! table. A failing source is recorded as unavailable and the run continues; a
//! failing forecast aborts the run. [`refresh_until`] repeats the assembly on a
//! fixed period until a shutdown future resolves.

pub mod render;

pub use render::{sparkline, DashboardRenderer};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::analytics::{ForecastError, ForecastProvider};
use crate::crawler::TrendSource;
use crate::error::{Error, TrendcastErrorTrait};
use crate::models::{ForecastResult, ForecastRow, SourceKind, SourceReport};

/// Everything the presentation layer shows for one refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
    pub forecast: ForecastResult,
    /// Caveat about the forecast input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_note: Option<String>,
    /// Seconds between refreshes; `None` for a single snapshot
    pub refresh_interval_secs: Option<u64>,
}

impl Dashboard {
    /// Run each source in turn, isolating failures
    pub async fn collect(sources: &[Box<dyn TrendSource>]) -> Vec<SourceReport> {
        let mut reports = Vec::with_capacity(sources.len());

        for source in sources {
            let kind = source.kind();
            tracing::info!(source = kind.as_str(), "Fetching source");

            let report = match source.fetch().await {
                Ok(trends) => {
                    tracing::info!(source = kind.as_str(), items = trends.len(), "Source fetched");
                    SourceReport::available(trends)
                }
                Err(e) => {
                    tracing::warn!(
                        source = kind.as_str(),
                        category = e.category().as_str(),
                        recoverable = e.is_recoverable(),
                        error = %e,
                        "Source unavailable"
                    );
                    SourceReport::unavailable(kind, e.to_string())
                }
            };
            reports.push(report);
        }

        reports
    }

    /// Collect every source, then compute the forecast
    ///
    /// # Errors
    ///
    /// Returns the provider's `ForecastError`; source failures never fail the
    /// dashboard
    pub async fn assemble(
        sources: &[Box<dyn TrendSource>],
        provider: &dyn ForecastProvider,
    ) -> Result<Self, ForecastError> {
        let reports = Self::collect(sources).await;
        let forecast = provider.forecast()?;

        Ok(Self {
            generated_at: Utc::now(),
            sources: reports,
            forecast,
            forecast_note: provider.input_note(),
            refresh_interval_secs: None,
        })
    }

    /// Mark the dashboard as part of a periodic refresh
    #[must_use]
    pub fn with_refresh(mut self, interval: Option<Duration>) -> Self {
        self.refresh_interval_secs = interval.map(|d| d.as_secs());
        self
    }

    pub fn report(&self, kind: SourceKind) -> Option<&SourceReport> {
        self.sources.iter().find(|r| r.source == kind)
    }

    /// Forecast rows past the last observation, used for charting
    pub fn forecast_horizon(&self) -> &[ForecastRow] {
        self.forecast.horizon()
    }

    pub fn unavailable_count(&self) -> usize {
        self.sources.iter().filter(|r| !r.is_available()).count()
    }
}

/// Assemble and publish a dashboard every `period` until `shutdown` resolves
///
/// The shutdown future is polled for the whole run, including while sources
/// are being fetched, so a slow source never delays it. Ticks missed during a
/// long refresh are delayed rather than replayed in a burst.
///
/// # Errors
///
/// Stops at the first forecast or publish failure
pub async fn refresh_until<S, P>(
    sources: &[Box<dyn TrendSource>],
    provider: &dyn ForecastProvider,
    period: Duration,
    shutdown: S,
    mut publish: P,
) -> Result<(), Error>
where
    S: Future<Output = ()>,
    P: FnMut(Dashboard) -> Result<(), Error>,
{
    tokio::select! {
        result = refresh_forever(sources, provider, period, &mut publish) => result,
        () = shutdown => {
            tracing::info!("Shutdown requested, stopping refresh loop");
            Ok(())
        }
    }
}

async fn refresh_forever<P>(
    sources: &[Box<dyn TrendSource>],
    provider: &dyn ForecastProvider,
    period: Duration,
    publish: &mut P,
) -> Result<(), Error>
where
    P: FnMut(Dashboard) -> Result<(), Error>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let dashboard = Dashboard::assemble(sources, provider)
            .await?
            .with_refresh(Some(period));
        publish(dashboard)?;
    }
}
