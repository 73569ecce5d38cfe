//! Synthetic series generation and forecasting

pub mod forecast;
pub mod synthetic;

pub use forecast::{AdditiveModel, FittedModel, ForecastError};
pub use synthetic::SyntheticSeries;

use crate::config::ForecastConfig;
use crate::models::ForecastResult;

/// Anything that can produce the dashboard's forecast table
pub trait ForecastProvider: Send + Sync {
    fn forecast(&self) -> Result<ForecastResult, ForecastError>;

    /// Caveat shown next to the forecast, if any
    fn input_note(&self) -> Option<String> {
        None
    }
}

/// Production provider: fits the additive model to the seeded synthetic series
///
/// The forecast is not derived from any scraped trend data.
#[derive(Debug, Clone)]
pub struct SyntheticForecast {
    config: ForecastConfig,
}

impl SyntheticForecast {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// The series the model is fitted to
    pub fn series(&self) -> Result<SyntheticSeries, ForecastError> {
        SyntheticSeries::generate(self.config.seed, self.config.start_date, self.config.periods)
    }
}

impl Default for SyntheticForecast {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl ForecastProvider for SyntheticForecast {
    fn forecast(&self) -> Result<ForecastResult, ForecastError> {
        let series = self.series()?;
        let model = AdditiveModel::new(self.config.seasonal_period, self.config.interval_width)?;
        let result = model.fit(&series)?.predict(self.config.horizon_days)?;

        tracing::info!(
            seed = self.config.seed,
            history = result.history().len(),
            horizon = result.horizon().len(),
            "Forecast computed from synthetic series"
        );
        Ok(result)
    }

    fn input_note(&self) -> Option<String> {
        Some(format!(
            "Forecast input is a synthetic random walk (seed {}), not scraped trend data.",
            self.config.seed
        ))
    }
}
