//! Unified error handling for the trendcast crate
//!
//! Domain modules keep their own error enums ([`FetchError`], [`ParseError`],
//! [`ForecastError`]). The dashboard logs source failures through
//! [`TrendcastErrorTrait`], and the command layer folds fetch, forecast and
//! rendering failures into a single [`Error`].
//!
//! # Architecture
//!
//! - [`TrendcastErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum for the command layer
//!
//! # Usage
//!
//! ```rust,ignore
//! use trendcast::error::{Error, TrendcastErrorTrait};
//!
//! fn report(err: &Error) {
//!     tracing::error!(
//!         category = err.category().as_str(),
//!         recoverable = err.is_recoverable(),
//!         error = %err,
//!         "Command failed"
//!     );
//! }
//! ```

use thiserror::Error;

pub use crate::analytics::forecast::ForecastError;
pub use crate::utils::error::{FetchError, ParseError};

/// Common trait for all trendcast error types
pub trait TrendcastErrorTrait: std::error::Error {
    /// Check if this error is recoverable (a later attempt may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, status)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Model fitting and projection errors
    Model,
    /// Configuration and validation errors
    Config,
    /// Template rendering and output errors
    Rendering,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Model => "model",
            Self::Config => "config",
            Self::Rendering => "rendering",
        }
    }
}

impl TrendcastErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_builder(),
            Self::ServerError(code) => *code == 429 || *code >= 500,
            Self::Timeout => true,
            Self::Decode(_) => true,
            Self::InvalidUrl(_) | Self::InvalidQuery(_) => false,
            Self::Parse(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::ServerError(_) | Self::Timeout | Self::Decode(_) => {
                ErrorCategory::Network
            }
            Self::InvalidUrl(_) | Self::InvalidQuery(_) => ErrorCategory::Config,
            Self::Parse(e) => e.category(),
        }
    }
}

impl TrendcastErrorTrait for ParseError {
    fn is_recoverable(&self) -> bool {
        // Markup and payload shapes change on the remote side, not between retries
        false
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSelector { .. } => ErrorCategory::Config,
            Self::MissingKey(_) | Self::InvalidJson(_) => ErrorCategory::Parsing,
        }
    }
}

impl TrendcastErrorTrait for ForecastError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIntervalWidth(_) | Self::InvalidParameter(_) => ErrorCategory::Config,
            _ => ErrorCategory::Model,
        }
    }
}

/// Unified error type for the command layer
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Forecast model errors
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Template or serialization failure while producing output
    #[error("Render error: {0}")]
    Render(String),
}

impl TrendcastErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Forecast(e) => e.is_recoverable(),
            Self::Render(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Forecast(e) => e.category(),
            Self::Render(_) => ErrorCategory::Rendering,
        }
    }
}

impl Error {
    /// Wrap a rendering failure, keeping its context chain in the message
    pub fn render(err: anyhow::Error) -> Self {
        Self::Render(format!("{err:#}"))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
