//! Deterministic stand-in series for the forecaster
//!
//! The values are a random walk: a cumulative sum of standard-normal draws from a
//! seeded ChaCha generator. They do not come from any scraped source.

use chrono::{Days, NaiveDate};
use rand::distributions::Distribution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use statrs::distribution::Normal;

use super::forecast::ForecastError;
use crate::models::SeriesPoint;

/// Daily series of `(date, value)` points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticSeries {
    points: Vec<SeriesPoint>,
}

impl SyntheticSeries {
    /// Generate `periods` consecutive daily points starting at `start`
    ///
    /// The same seed always yields bit-identical values.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::DateOverflow` if the date range leaves the
    /// calendar
    pub fn generate(seed: u64, start: NaiveDate, periods: usize) -> Result<Self, ForecastError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;

        let mut points = Vec::with_capacity(periods);
        let mut level = 0.0;
        for day in 0..periods {
            level += normal.sample(&mut rng);
            let date = start
                .checked_add_days(Days::new(day as u64))
                .ok_or(ForecastError::DateOverflow)?;
            points.push(SeriesPoint { date, value: level });
        }

        Ok(Self { points })
    }

    /// Wrap existing points
    pub fn from_points(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
