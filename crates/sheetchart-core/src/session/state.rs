use crate::chart::{ChartConfig, ChartHandle, ChartService, ChartType};
use sheetchart_extract::SheetPreview;

/// Which step of the import flow a session is at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// No file loaded yet.
    Import,
    /// A sheet is loaded; columns are being picked.
    Preview,
    /// The selection was confirmed and a chart exists.
    Chart,
}

/// UI-agnostic state of one import: loaded sheet, column picks, active chart.
///
/// The chart service is owned by the session and handed in by the caller.
pub struct ImportSession<S: ChartService> {
    pub(crate) service: S,
    pub(crate) config: ChartConfig,
    pub(crate) preview: Option<SheetPreview>,
    pub(crate) dimension: Option<String>,
    pub(crate) measure: Option<String>,
    pub(crate) chart: Option<ChartHandle>,
    pub(crate) chart_type: ChartType,
    /// Reject column keys the loaded sheet does not have.
    pub strict: bool,
}

impl<S: ChartService> ImportSession<S> {
    /// Create a session charting through `service`.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new(service: S, config: ChartConfig) -> Self {
        ImportSession {
            service,
            config,
            preview: None,
            dimension: None,
            measure: None,
            chart: None,
            chart_type: ChartType::default(),
            strict: false,
        }
    }

    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn stage(&self) -> Stage {
        match (&self.preview, &self.chart) {
            (None, _) => Stage::Import,
            (Some(_), None) => Stage::Preview,
            (Some(_), Some(_)) => Stage::Chart,
        }
    }

    pub fn preview(&self) -> Option<&SheetPreview> {
        self.preview.as_ref()
    }

    pub fn dimension(&self) -> Option<&str> {
        self.dimension.as_deref()
    }

    pub fn measure(&self) -> Option<&str> {
        self.measure.as_deref()
    }

    pub fn chart(&self) -> Option<ChartHandle> {
        self.chart
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }
}
