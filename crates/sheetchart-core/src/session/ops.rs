use super::ImportSession;
use crate::chart::{ChartDataset, ChartHandle, ChartService, ChartType};
use crate::error::{Result, SheetchartError};
use crate::storage::read_sheet_bytes;
use sheetchart_extract::{
    ExtractError, Projection, SheetPreview, parse_sheet, project_columns, project_columns_checked,
};
use std::path::Path;
use tracing::{debug, info, warn};

impl<S: ChartService> ImportSession<S> {
    /// Parse workbook bytes and make the first sheet the current preview.
    ///
    /// Selections and any chart from a previous file are dropped. On failure
    /// the session is left exactly as it was.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&SheetPreview> {
        let preview = parse_sheet(bytes)?;
        info!(
            sheet = %preview.sheet_name,
            rows = preview.rows.len(),
            columns = preview.column_keys.len(),
            "loaded sheet"
        );

        self.drop_chart();
        self.dimension = None;
        self.measure = None;
        Ok(self.preview.insert(preview))
    }

    /// Read a workbook from disk and load it.
    pub fn load_file(&mut self, path: &Path) -> Result<&SheetPreview> {
        let bytes = read_sheet_bytes(path)?;
        self.load_bytes(&bytes)
    }

    fn check_column(&self, key: &str) -> Result<()> {
        let preview = self.preview.as_ref().ok_or(SheetchartError::NoPreview)?;
        if self.strict && !preview.has_column(key) {
            return Err(ExtractError::UnknownColumn(key.to_string()).into());
        }
        Ok(())
    }

    /// Pick the column whose values label the chart.
    pub fn select_dimension(&mut self, key: &str) -> Result<()> {
        self.check_column(key)?;
        self.dimension = Some(key.to_string());
        Ok(())
    }

    /// Pick the column whose values are charted.
    pub fn select_measure(&mut self, key: &str) -> Result<()> {
        self.check_column(key)?;
        self.measure = Some(key.to_string());
        Ok(())
    }

    /// Project the current selection without creating a chart.
    pub fn projection(&self) -> Result<Projection> {
        let preview = self.preview.as_ref().ok_or(SheetchartError::NoPreview)?;
        let dimension = self
            .dimension
            .as_deref()
            .ok_or(SheetchartError::SelectionIncomplete("dimension"))?;
        let measure = self
            .measure
            .as_deref()
            .ok_or(SheetchartError::SelectionIncomplete("measure"))?;

        let projection = if self.strict {
            project_columns_checked(&preview.column_keys, &preview.rows, dimension, measure)?
        } else {
            project_columns(&preview.rows, dimension, measure)
        };

        let zeroed = Projection::zeroed_count(&preview.rows, measure);
        if zeroed > 0 {
            warn!(
                measure,
                zeroed, "non-numeric measure cell(s) charted as 0"
            );
        }
        Ok(projection)
    }

    /// The current selection as a named dataset.
    pub fn dataset(&self) -> Result<ChartDataset> {
        let projection = self.projection()?;
        // projection() already checked both selections are present
        let dimension = self.dimension.clone().unwrap_or_default();
        let measure = self.measure.clone().unwrap_or_default();
        Ok(ChartDataset::from_projection(dimension, measure, projection))
    }

    /// Confirm the selection ("Next"): project it and chart it.
    ///
    /// Replaces any chart created by an earlier confirmation.
    pub fn confirm(&mut self) -> Result<ChartHandle> {
        let dataset = self.dataset()?;
        let points = dataset.len();

        let handle = self
            .service
            .create_chart(&self.config, dataset, self.chart_type)?;
        self.drop_chart();
        self.chart = Some(handle);
        info!(%handle, points, chart_type = %self.chart_type, "charted selection");
        Ok(handle)
    }

    fn active_chart(&self) -> Result<ChartHandle> {
        self.chart.ok_or(SheetchartError::NoChart)
    }

    /// Change the layout of the active chart. Without a chart, only the
    /// type used for the next confirmation changes.
    pub fn set_chart_type(&mut self, chart_type: ChartType) -> Result<()> {
        if let Some(handle) = self.chart {
            self.service.set_chart_type(handle, chart_type)?;
        }
        self.chart_type = chart_type;
        debug!(%chart_type, "chart type set");
        Ok(())
    }

    /// Append one point to the active chart.
    pub fn add_data_row(&mut self, label: &str, value: f64) -> Result<()> {
        let handle = self.active_chart()?;
        self.service.add_data_row(handle, label, value)
    }

    /// Replace the active chart's points, keeping its dimension/measure names.
    pub fn replace_data(&mut self, labels: Vec<String>, values: Vec<f64>) -> Result<()> {
        let handle = self.active_chart()?;
        let mut dataset = self.service.dataset(handle)?.clone();
        dataset.replace_data(labels, values)?;
        self.service.update_data(handle, dataset)
    }

    /// Draw the active chart.
    pub fn render_chart(&self, width: u16, height: u16) -> Result<String> {
        let handle = self.active_chart()?;
        self.service.render(handle, width, height)
    }

    /// Leave the chart and go back to column picking.
    pub fn back_to_preview(&mut self) {
        self.drop_chart();
    }

    fn drop_chart(&mut self) {
        if let Some(handle) = self.chart.take() {
            self.service.remove_chart(handle);
        }
    }
}
