//! Markdown and JSON rendering with the Handlebars template engine

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

use super::Dashboard;
use crate::models::{ForecastRow, SourceStatus};
use crate::utils::escape_table_cell;

/// Default dashboard template
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/dashboard.hbs");

const TEMPLATE_NAME: &str = "dashboard";
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Serialize)]
struct ItemData {
    rank: usize,
    text: String,
}

#[derive(Debug, Serialize)]
struct SectionData {
    heading: &'static str,
    column: &'static str,
    unavailable: bool,
    error: String,
    items: Vec<ItemData>,
}

#[derive(Debug, Serialize)]
struct RowData {
    date: String,
    point: String,
    lower: String,
    upper: String,
}

impl From<&ForecastRow> for RowData {
    fn from(row: &ForecastRow) -> Self {
        Self {
            date: row.date.format("%Y-%m-%d").to_string(),
            point: format!("{:.2}", row.point_estimate),
            lower: format!("{:.2}", row.lower_bound),
            upper: format!("{:.2}", row.upper_bound),
        }
    }
}

/// Template data for rendering
#[derive(Debug, Serialize)]
struct DashboardTemplateData {
    generated_at: String,
    source_count: usize,
    horizon_days: usize,
    sections: Vec<SectionData>,
    sparkline: String,
    forecast_rows: Vec<RowData>,
    forecast_note: Option<String>,
    refresh: Option<u64>,
}

impl DashboardTemplateData {
    fn new(dashboard: &Dashboard, all_rows: bool) -> Self {
        let sections = dashboard
            .sources
            .iter()
            .map(|report| {
                let (unavailable, error, items) = match &report.status {
                    SourceStatus::Available { trends } => (
                        false,
                        String::new(),
                        trends
                            .texts()
                            .into_iter()
                            .enumerate()
                            .map(|(i, text)| ItemData {
                                rank: i + 1,
                                text: escape_table_cell(text),
                            })
                            .collect(),
                    ),
                    SourceStatus::Unavailable { error } => (true, error.clone(), Vec::new()),
                };
                SectionData {
                    heading: report.source.heading(),
                    column: report.source.column_label(),
                    unavailable,
                    error,
                    items,
                }
            })
            .collect();

        let horizon = dashboard.forecast_horizon();
        let shown = if all_rows {
            dashboard.forecast.rows()
        } else {
            horizon
        };
        let points: Vec<f64> = horizon.iter().map(|r| r.point_estimate).collect();

        Self {
            generated_at: dashboard
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            source_count: dashboard.sources.len(),
            horizon_days: horizon.len(),
            sections,
            sparkline: sparkline(&points),
            forecast_rows: shown.iter().map(RowData::from).collect(),
            forecast_note: dashboard.forecast_note.clone(),
            refresh: dashboard.refresh_interval_secs,
        }
    }
}

/// Dashboard renderer with Handlebars template engine
pub struct DashboardRenderer<'a> {
    handlebars: Handlebars<'a>,
    all_rows: bool,
}

impl<'a> DashboardRenderer<'a> {
    /// Create a renderer with the built-in template
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(TEMPLATE_NAME, DEFAULT_TEMPLATE)
            .context("Failed to register default dashboard template")?;

        Ok(Self {
            handlebars,
            all_rows: false,
        })
    }

    /// Create a renderer from a Handlebars template file
    pub fn with_template(template_path: &Path) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_file(TEMPLATE_NAME, template_path)
            .with_context(|| {
                format!("Failed to register template: {}", template_path.display())
            })?;

        Ok(Self {
            handlebars,
            all_rows: false,
        })
    }

    /// Include the fitted history in the forecast table, not only the horizon
    #[must_use]
    pub fn all_rows(mut self, all_rows: bool) -> Self {
        self.all_rows = all_rows;
        self
    }

    /// Render the dashboard to Markdown
    pub fn render_markdown(&self, dashboard: &Dashboard) -> Result<String> {
        let data = DashboardTemplateData::new(dashboard, self.all_rows);
        self.handlebars
            .render(TEMPLATE_NAME, &data)
            .context("Failed to render dashboard template")
    }

    /// Render the dashboard as pretty-printed JSON
    pub fn render_json(&self, dashboard: &Dashboard) -> Result<String> {
        serde_json::to_string_pretty(dashboard).context("Failed to serialize dashboard")
    }
}

/// One block character per value, scaled between the series min and max
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    let top = SPARK_LEVELS.len() - 1;

    values
        .iter()
        .map(|&v| {
            let level = if range > 0.0 {
                (((v - min) / range) * top as f64).round() as usize
            } else {
                top / 2
            };
            SPARK_LEVELS[level.min(top)]
        })
        .collect()
}
