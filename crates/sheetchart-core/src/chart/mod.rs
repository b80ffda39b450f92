//! Chart rendering service and the data it consumes.

mod config;
mod dataset;
mod kind;
mod service;
mod text;

pub use config::{ChartConfig, ChartUser};
pub use dataset::{ChartDataset, PlotData};
pub use kind::ChartType;
pub use service::{ChartHandle, ChartService};
pub use text::TextChartService;
