pub mod dashboard;
pub mod fetch;
pub mod forecast;

use clap::ValueEnum;

// Re-export command functions for convenience
pub use dashboard::dashboard;
pub use fetch::fetch;
pub use forecast::forecast;

/// Output format of the dashboard command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DashboardFormat {
    Markdown,
    Json,
}

/// Output format of the single-source and forecast commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}
