//! Error types for Sheetchart core.

use thiserror::Error;

use sheetchart_extract::ExtractError;

use crate::chart::ChartHandle;

/// Errors that can occur in the Sheetchart application
#[derive(Error, Debug)]
pub enum SheetchartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No sheet loaded")]
    NoPreview,

    #[error("No {0} column selected")]
    SelectionIncomplete(&'static str),

    #[error("No chart created")]
    NoChart,

    #[error("Unknown chart: {0}")]
    UnknownChart(ChartHandle),

    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),

    #[error("Labels and values differ in length ({labels} vs {values})")]
    LengthMismatch { labels: usize, values: usize },
}

pub type Result<T> = std::result::Result<T, SheetchartError>;
