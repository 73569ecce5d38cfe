use anyhow::{Context, Result};

use trendcast::config::Config;
use trendcast::crawler::build_sources;
use trendcast::error::{Error, TrendcastErrorTrait};
use trendcast::models::SourceKind;

use super::ListFormat;

pub async fn fetch(config: Config, source: &str, format: ListFormat) -> Result<()> {
    let kind = SourceKind::parse(source).with_context(|| {
        let known: Vec<&str> = SourceKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("Unknown source '{source}', expected one of: {}", known.join(", "))
    })?;

    let sources = build_sources(&config).context("Failed to build trend sources")?;
    let adapter = sources
        .iter()
        .find(|s| s.kind() == kind)
        .with_context(|| format!("Source {kind} is not configured"))?;

    let trends = adapter.fetch().await.map_err(|e| {
        let err = Error::from(e);
        tracing::error!(
            source = kind.as_str(),
            category = err.category().as_str(),
            recoverable = err.is_recoverable(),
            "Fetch failed"
        );
        anyhow::Error::new(err).context(format!("Failed to fetch {kind}"))
    })?;

    match format {
        ListFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&trends).context("Failed to serialize trends")?
            );
        }
        ListFormat::Text => {
            println!("{}", kind.heading());
            if trends.is_empty() {
                println!("  (no items)");
            }
            for (i, text) in trends.texts().iter().enumerate() {
                println!("{:>3}. {text}", i + 1);
            }
        }
    }

    Ok(())
}
