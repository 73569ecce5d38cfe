//! Additive trend + seasonality forecaster
//!
//! The model is `y(t) = intercept + slope * t + seasonal[t mod period] + noise`:
//! - trend: ordinary least squares on the day index
//! - seasonal: mean detrended value per period position, centered on zero
//! - noise: sample standard deviation of what remains
//!
//! Bounds are `point ± z * sigma * sqrt(1 + k / n)`, where `z` is the normal
//! quantile for the interval width and `k` counts days past the last observation.
//! Since `sigma >= 0`, every row satisfies `lower <= point <= upper`.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use super::synthetic::SyntheticSeries;
use crate::models::{ForecastResult, ForecastRow};

/// Errors that can occur while fitting or projecting the model
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Insufficient data points: need at least {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Non-finite value at index {0}")]
    NonFiniteValue(usize),

    #[error("Dates are not contiguous daily steps at index {0}")]
    NonContiguousDates(usize),

    #[error("Interval width must be in (0, 1), got {0}")]
    InvalidIntervalWidth(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Date range exceeds the supported calendar")]
    DateOverflow,

    #[error("Model fit is degenerate: {0}")]
    DegenerateFit(String),
}

/// Result type for forecasting operations
pub type ForecastOutcome<T> = Result<T, ForecastError>;

/// Unfitted model parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdditiveModel {
    seasonal_period: usize,
    interval_width: f64,
}

impl Default for AdditiveModel {
    fn default() -> Self {
        Self {
            seasonal_period: 7,
            interval_width: 0.8,
        }
    }
}

impl AdditiveModel {
    /// Create a model
    ///
    /// # Errors
    ///
    /// Rejects a period below 2 or an interval width outside (0, 1)
    pub fn new(seasonal_period: usize, interval_width: f64) -> ForecastOutcome<Self> {
        if seasonal_period < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {seasonal_period}"
            )));
        }
        if !(interval_width > 0.0 && interval_width < 1.0) {
            return Err(ForecastError::InvalidIntervalWidth(interval_width));
        }
        Ok(Self {
            seasonal_period,
            interval_width,
        })
    }

    /// Fit the model to a daily series
    ///
    /// # Errors
    ///
    /// Fails on fewer than two full periods, non-finite values, gaps or
    /// duplicates in the dates, or a non-finite fit
    pub fn fit(&self, series: &SyntheticSeries) -> ForecastOutcome<FittedModel> {
        let points = series.points();
        let n = points.len();
        let period = self.seasonal_period;

        if n < period * 2 {
            return Err(ForecastError::InsufficientData {
                required: period * 2,
                actual: n,
            });
        }

        if let Some(idx) = points.iter().position(|p| !p.value.is_finite()) {
            return Err(ForecastError::NonFiniteValue(idx));
        }

        for (idx, pair) in points.windows(2).enumerate() {
            if pair[0].date.succ_opt() != Some(pair[1].date) {
                return Err(ForecastError::NonContiguousDates(idx + 1));
            }
        }

        let values = series.values();
        let (intercept, slope) = linear_trend(&values);

        let detrended: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(t, y)| y - (intercept + slope * t as f64))
            .collect();

        let mut seasonal: Vec<f64> = (0..period)
            .map(|pos| {
                let bucket: Vec<f64> = detrended.iter().skip(pos).step_by(period).copied().collect();
                bucket.iter().sum::<f64>() / bucket.len() as f64
            })
            .collect();
        let seasonal_mean = seasonal.iter().sum::<f64>() / period as f64;
        for s in &mut seasonal {
            *s -= seasonal_mean;
        }

        let sum_sq: f64 = detrended
            .iter()
            .enumerate()
            .map(|(t, d)| (d - seasonal[t % period]).powi(2))
            .sum();
        let sigma = (sum_sq / (n - 1) as f64).sqrt();

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        let z = normal.inverse_cdf(0.5 + self.interval_width / 2.0);

        if !(intercept.is_finite() && slope.is_finite() && sigma.is_finite() && z.is_finite()) {
            return Err(ForecastError::DegenerateFit(format!(
                "intercept={intercept}, slope={slope}, sigma={sigma}, z={z}"
            )));
        }

        let start = points[0].date;
        tracing::debug!(n, intercept, slope, sigma, "Fitted additive model");

        Ok(FittedModel {
            start,
            observations: n,
            intercept,
            slope,
            seasonal,
            sigma,
            z,
        })
    }
}

/// Model parameters after fitting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedModel {
    start: NaiveDate,
    observations: usize,
    intercept: f64,
    slope: f64,
    seasonal: Vec<f64>,
    sigma: f64,
    z: f64,
}

impl FittedModel {
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn seasonal(&self) -> &[f64] {
        &self.seasonal
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Point estimates and bounds for every observed day plus `horizon` more
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::DateOverflow` if the row count overflows or the
    /// last projected date leaves the calendar. Nothing is allocated in that case.
    pub fn predict(&self, horizon: usize) -> ForecastOutcome<ForecastResult> {
        let n = self.observations;
        let period = self.seasonal.len();

        let total = n.checked_add(horizon).ok_or(ForecastError::DateOverflow)?;
        self.start
            .checked_add_days(Days::new(total.saturating_sub(1) as u64))
            .ok_or(ForecastError::DateOverflow)?;
        let mut rows = Vec::with_capacity(total);

        for t in 0..total {
            let date = self
                .start
                .checked_add_days(Days::new(t as u64))
                .ok_or(ForecastError::DateOverflow)?;
            let steps_ahead = (t + 1).saturating_sub(n) as f64;

            let point = self.intercept + self.slope * t as f64 + self.seasonal[t % period];
            let half_width = self.z * self.sigma * (1.0 + steps_ahead / n as f64).sqrt();

            rows.push(ForecastRow {
                date,
                point_estimate: point,
                lower_bound: point - half_width,
                upper_bound: point + half_width,
            });
        }

        Ok(ForecastResult::new(rows, n))
    }
}

/// OLS fit of `y = intercept + slope * t` over `t = 0..n`
fn linear_trend(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_t = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (num, den) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (t, y)| {
            let dt = t as f64 - mean_t;
            (num + dt * (y - mean_y), den + dt * dt)
        });

    let slope = if den > 0.0 { num / den } else { 0.0 };
    (mean_y - slope * mean_t, slope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesPoint;

    fn series_from(values: &[f64]) -> SyntheticSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        SyntheticSeries::from_points(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| SeriesPoint {
                    date: start + chrono::Duration::days(i as i64),
                    value,
                })
                .collect(),
        )
    }

    #[test]
    fn test_linear_trend_exact() {
        let (intercept, slope) = linear_trend(&[10.0, 12.0, 14.0, 16.0, 18.0]);
        assert!((intercept - 10.0).abs() < 1e-9);
        assert!((slope - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_recovers_trend_and_season() {
        let pattern = [3.0, -1.0, 0.0, -2.0, 1.0, 0.5, -1.5];
        let values: Vec<f64> = (0..28).map(|t| 5.0 + 0.5 * t as f64 + pattern[t % 7]).collect();
        let model = AdditiveModel::default().fit(&series_from(&values)).unwrap();

        assert!((model.slope() - 0.5).abs() < 0.05);
        assert!(model.sigma() < 0.5);
        assert!((model.seasonal()[0] - model.seasonal()[1] - 4.0).abs() < 0.2);
    }

    #[test]
    fn test_predict_shape_and_bounds() {
        let values: Vec<f64> = (0..90).map(|t| (t as f64 * 0.37).sin() * 3.0 + t as f64 * 0.1).collect();
        let result = AdditiveModel::default()
            .fit(&series_from(&values))
            .unwrap()
            .predict(30)
            .unwrap();

        assert_eq!(result.len(), 120);
        assert_eq!(result.history().len(), 90);
        assert_eq!(result.horizon().len(), 30);
        for row in result.rows() {
            assert!(row.lower_bound <= row.point_estimate);
            assert!(row.point_estimate <= row.upper_bound);
        }
        for pair in result.rows().windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }

    #[test]
    fn test_interval_widens_past_history() {
        let values: Vec<f64> = (0..30).map(|t| ((t * 7919) % 13) as f64).collect();
        let result = AdditiveModel::default()
            .fit(&series_from(&values))
            .unwrap()
            .predict(10)
            .unwrap();

        let width = |row: &ForecastRow| row.upper_bound - row.lower_bound;
        let last_history = width(result.history().last().unwrap());
        let first_future = width(&result.horizon()[0]);
        let last_future = width(result.horizon().last().unwrap());
        assert!(first_future > last_history);
        assert!(last_future > first_future);
    }

    #[test]
    fn test_insufficient_data() {
        let result = AdditiveModel::default().fit(&series_from(&[1.0; 10]));
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData { required: 14, actual: 10 })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut values = vec![1.0; 20];
        values[4] = f64::NAN;
        let result = AdditiveModel::default().fit(&series_from(&values));
        assert!(matches!(result, Err(ForecastError::NonFiniteValue(4))));
    }

    #[test]
    fn test_gap_rejected() {
        let mut series = series_from(&[1.0; 20]).points().to_vec();
        series[10].date = series[10].date + chrono::Duration::days(1);
        let result = AdditiveModel::default().fit(&SyntheticSeries::from_points(series));
        assert!(matches!(result, Err(ForecastError::NonContiguousDates(_))));
    }

    #[test]
    fn test_constant_series_has_zero_width() {
        let result = AdditiveModel::default()
            .fit(&series_from(&[2.0; 21]))
            .unwrap()
            .predict(5)
            .unwrap();
        for row in result.rows() {
            assert!((row.point_estimate - 2.0).abs() < 1e-9);
            assert!(row.lower_bound <= row.point_estimate && row.point_estimate <= row.upper_bound);
        }
    }

    #[test]
    fn test_horizon_past_calendar_is_error() {
        let model = AdditiveModel::default().fit(&series_from(&[1.0; 14])).unwrap();

        assert!(matches!(model.predict(usize::MAX), Err(ForecastError::DateOverflow)));
        assert!(matches!(
            model.predict(400_000_000),
            Err(ForecastError::DateOverflow)
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            AdditiveModel::new(7, 1.5),
            Err(ForecastError::InvalidIntervalWidth(_))
        ));
        assert!(matches!(
            AdditiveModel::new(1, 0.8),
            Err(ForecastError::InvalidParameter(_))
        ));
    }
}
