//! sheetchart-core - UI-agnostic import session, chart service + storage.

pub mod chart;
pub mod error;
pub mod session;
pub mod storage;

pub use chart::{ChartConfig, ChartDataset, ChartHandle, ChartService, ChartType, TextChartService};
pub use error::{Result, SheetchartError};
pub use session::{ImportSession, Stage};

pub use sheetchart_extract::{CellValue, Projection, RowRecord, SheetPreview};
