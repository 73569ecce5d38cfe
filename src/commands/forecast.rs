use anyhow::{Context, Result};

use trendcast::analytics::{ForecastProvider, SyntheticForecast};
use trendcast::config::Config;

use super::ListFormat;

pub fn forecast(config: Config, format: ListFormat, all_rows: bool) -> Result<()> {
    let provider = SyntheticForecast::new(config.forecast);
    let result = provider.forecast().context("Failed to compute forecast")?;
    let rows = if all_rows {
        result.rows()
    } else {
        result.horizon()
    };

    match format {
        ListFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(rows).context("Failed to serialize forecast")?
            );
        }
        ListFormat::Text => {
            if let Some(note) = provider.input_note() {
                println!("# {note}");
            }
            println!("{:<12}{:>10}{:>10}{:>10}", "date", "forecast", "lower", "upper");
            for row in rows {
                println!(
                    "{:<12}{:>10.2}{:>10.2}{:>10.2}",
                    row.date.format("%Y-%m-%d").to_string(),
                    row.point_estimate,
                    row.lower_bound,
                    row.upper_bound
                );
            }
        }
    }

    Ok(())
}
