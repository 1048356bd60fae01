//! Core data types for chart requests and persisted artifacts.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

/// Chart width in pixels when the caller does not supply one.
pub const DEFAULT_WIDTH: u32 = 1000;

/// Chart height in pixels when the caller does not supply one.
pub const DEFAULT_HEIGHT: u32 = 600;

/// A validated chart-generation request. Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRequest {
    /// Page and chart title, injected verbatim (HTML-escaped) into the page.
    pub title: String,
    /// The ECharts option object. Opaque: never interpreted, only
    /// re-serialized into the page.
    pub config: Value,
    pub width: u32,
    pub height: u32,
}

impl ChartRequest {
    /// Build a request with the default 1000x600 dimensions.
    pub fn new(title: impl Into<String>, config: Value) -> Self {
        Self {
            title: title.into(),
            config,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// A persisted, self-contained chart page produced from one invocation.
///
/// Never mutated and never deleted by this system; it lives as long as the
/// underlying storage does.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    /// File name of the form `echarts_<nanosecond-timestamp>.html`.
    pub file_name: String,
    /// Location under the content directory.
    pub path: PathBuf,
}

/// Errors that can occur while generating a chart page.
///
/// All three are recoverable: they are reported back to the caller as an
/// error-bearing tool result and never tear down the connection.
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// Malformed or missing invocation parameters. No artifact is created.
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Template load or substitution failure. No artifact is created.
    #[error("Template error: {0}")]
    Render(String),

    /// Directory creation or file write failure. The invocation aborts and
    /// no URL is returned.
    #[error("Storage error: {0}")]
    Persistence(String),
}

/// Convenience result type.
pub type ChartResult<T> = Result<T, ChartError>;
