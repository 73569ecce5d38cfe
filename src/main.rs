use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendcast::config::Config;

mod commands;

use commands::{DashboardFormat, ListFormat};

#[derive(Parser)]
#[command(
    name = "trendcast",
    version,
    about = "Trending product dashboard with a short-horizon trend forecast",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file; environment variables are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every source and render the dashboard (default)
    Dashboard {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = DashboardFormat::Markdown)]
        format: DashboardFormat,

        /// Re-render every N seconds until interrupted
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        refresh_secs: Option<u64>,

        /// Show fitted history rows in the forecast table
        #[arg(long, default_value = "false")]
        all_rows: bool,

        /// Handlebars template replacing the built-in Markdown layout
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Run a single source and print its list
    Fetch {
        /// Source name (google_trends, aliexpress, amazon_movers, tiktok, instagram)
        source: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Print the synthetic-series forecast
    Forecast {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,

        /// Include fitted history rows, not only the horizon
        #[arg(long, default_value = "false")]
        all_rows: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // Initialize tracing/logging
    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose)?;

    tracing::info!("trendcast starting");

    match cli.command.unwrap_or(Commands::Dashboard {
        format: DashboardFormat::Markdown,
        refresh_secs: None,
        all_rows: false,
        template: None,
    }) {
        Commands::Dashboard {
            format,
            refresh_secs,
            all_rows,
            template,
        } => {
            tracing::info!(
                format = ?format,
                refresh_secs = ?refresh_secs,
                all_rows = %all_rows,
                template = ?template,
                "Starting dashboard command"
            );
            commands::dashboard(config, format, refresh_secs, all_rows, template.as_deref())
                .await?;
        }

        Commands::Fetch { source, format } => {
            tracing::info!(source = %source, format = ?format, "Starting fetch command");
            commands::fetch(config, &source, format).await?;
        }

        Commands::Forecast { format, all_rows } => {
            tracing::info!(format = ?format, all_rows = %all_rows, "Starting forecast command");
            commands::forecast(config, format, all_rows)?;
        }
    }

    tracing::info!("trendcast completed successfully");
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env().context("Failed to load configuration from environment")?,
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendcast=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("trendcast={level},warn"))
            .context("Invalid log level")?
    };

    // stdout carries the rendered output only
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
