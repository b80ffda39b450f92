use super::{ChartConfig, ChartDataset, ChartType};
use crate::error::Result;
use std::fmt;

/// Opaque identifier of a chart created by a [`ChartService`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        ChartHandle(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart-{:016x}", self.0)
    }
}

/// A chart rendering backend.
///
/// Passed explicitly to whatever needs to chart data; nothing reaches for a
/// shared global instance. Every method taking a handle fails with
/// `UnknownChart` for handles this service did not create.
pub trait ChartService {
    /// Create a chart showing `dataset` with the given layout.
    fn create_chart(
        &mut self,
        config: &ChartConfig,
        dataset: ChartDataset,
        chart_type: ChartType,
    ) -> Result<ChartHandle>;

    fn set_chart_type(&mut self, handle: ChartHandle, chart_type: ChartType) -> Result<()>;

    fn chart_type(&self, handle: ChartHandle) -> Result<ChartType>;

    /// Replace the chart's data wholesale.
    fn update_data(&mut self, handle: ChartHandle, dataset: ChartDataset) -> Result<()>;

    /// Append one data point to the chart.
    fn add_data_row(&mut self, handle: ChartHandle, label: &str, value: f64) -> Result<()>;

    fn dataset(&self, handle: ChartHandle) -> Result<&ChartDataset>;

    /// Draw the chart into a block of text at most `width` x `height` characters.
    fn render(&self, handle: ChartHandle, width: u16, height: u16) -> Result<String>;

    /// Drop a chart. Unknown handles are ignored.
    fn remove_chart(&mut self, handle: ChartHandle);
}
