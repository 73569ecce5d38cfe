use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use trendcast::analytics::SyntheticForecast;
use trendcast::config::Config;
use trendcast::crawler::build_sources;
use trendcast::dashboard::{refresh_until, Dashboard, DashboardRenderer};
use trendcast::error::{self, Error, TrendcastErrorTrait};

use super::DashboardFormat;

pub async fn dashboard(
    config: Config,
    format: DashboardFormat,
    refresh_secs: Option<u64>,
    all_rows: bool,
    template: Option<&Path>,
) -> Result<()> {
    let sources = build_sources(&config).context("Failed to build trend sources")?;
    let provider = SyntheticForecast::new(config.forecast.clone());
    let renderer = match template {
        Some(path) => DashboardRenderer::with_template(path)?,
        None => DashboardRenderer::new()?,
    }
    .all_rows(all_rows);

    let emit = |dashboard: Dashboard| publish(&renderer, format, &dashboard);

    let result = match refresh_secs {
        None => match Dashboard::assemble(&sources, &provider).await {
            Ok(dashboard) => emit(dashboard),
            Err(e) => Err(Error::from(e)),
        },
        Some(secs) => {
            tracing::info!(interval_secs = secs, "Refreshing until interrupted");
            refresh_until(
                &sources,
                &provider,
                Duration::from_secs(secs),
                shutdown_signal(),
                emit,
            )
            .await
        }
    };

    result.map_err(|e| {
        tracing::error!(
            category = e.category().as_str(),
            recoverable = e.is_recoverable(),
            "Dashboard failed"
        );
        anyhow::Error::new(e)
    })
}

fn publish(
    renderer: &DashboardRenderer<'_>,
    format: DashboardFormat,
    dashboard: &Dashboard,
) -> error::Result<()> {
    if dashboard.unavailable_count() > 0 {
        tracing::warn!(
            unavailable = dashboard.unavailable_count(),
            "Some sources are unavailable"
        );
    }

    let output = match format {
        DashboardFormat::Markdown => renderer.render_markdown(dashboard),
        DashboardFormat::Json => renderer.render_json(dashboard),
    }
    .map_err(Error::render)?;

    println!("{output}");
    Ok(())
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
