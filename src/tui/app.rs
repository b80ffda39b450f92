//! Application state and logic.
//!
//! [`App`] wraps an [`ImportSession`] with the state the terminal UI needs:
//! which [`Screen`] is showing, the column pickers and the text prompts.

use crate::config::Settings;
use sheetchart_core::{ImportSession, SheetPreview, TextChartService};
use sheetchart_extract::parse_numeric_text;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Screens of the import flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Type the path of a workbook to open.
    OpenFile,
    /// Browse the first sheet and pick the dimension and measure columns.
    Preview,
    /// Look at the chart of the confirmed selection.
    Chart,
}

/// Which column picker has focus on the preview screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Picker {
    Dimension,
    Measure,
}

pub struct App {
    pub session: ImportSession<TextChartService>,
    pub settings: Settings,
    pub screen: Screen,
    /// Path typed on the open-file screen
    pub path_buffer: String,
    /// Workbook the preview came from
    pub file_path: Option<PathBuf>,
    pub focus: Picker,
    /// Index into the column keys for the dimension picker
    pub dimension_idx: usize,
    /// Index into the column keys for the measure picker
    pub measure_idx: usize,
    /// First preview row shown
    pub row_offset: usize,
    /// "label, value" buffer while adding a data row to the chart
    pub add_row_buffer: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new(session: ImportSession<TextChartService>, settings: Settings) -> Self {
        App {
            session,
            settings,
            screen: Screen::OpenFile,
            path_buffer: String::new(),
            file_path: None,
            focus: Picker::Dimension,
            dimension_idx: 0,
            measure_idx: 0,
            row_offset: 0,
            add_row_buffer: None,
            status_message: "Enter the path of a spreadsheet".to_string(),
        }
    }

    pub fn preview(&self) -> Option<&SheetPreview> {
        self.session.preview()
    }

    pub fn column_keys(&self) -> &[String] {
        self.preview()
            .map(|p| p.column_keys.as_slice())
            .unwrap_or_default()
    }

    /// Load a workbook. On failure the current screen and preview stay as they were.
    pub fn open_file(&mut self, path: &Path) {
        match self.session.load_file(path) {
            Ok(preview) => {
                self.status_message = format!(
                    "{}: {} rows, {} columns",
                    preview.sheet_name,
                    preview.row_count(),
                    preview.column_keys.len()
                );
                let columns = preview.column_keys.len();
                self.file_path = Some(path.to_path_buf());
                self.path_buffer = path.display().to_string();
                self.focus = Picker::Dimension;
                self.dimension_idx = 0;
                self.measure_idx = if columns > 1 { 1 } else { 0 };
                self.row_offset = 0;
                self.add_row_buffer = None;
                self.screen = Screen::Preview;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "open failed");
                self.status_message = format!("Error: {}", e);
            }
        }
    }

    pub fn open_typed_path(&mut self) {
        let typed = self.path_buffer.trim();
        if typed.is_empty() {
            self.status_message = "No file name".to_string();
            return;
        }
        let path = PathBuf::from(typed);
        self.open_file(&path);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Picker::Dimension => Picker::Measure,
            Picker::Measure => Picker::Dimension,
        };
    }

    /// Move the focused picker by `delta` columns, wrapping around.
    pub fn move_picker(&mut self, delta: i32) {
        let count = self.column_keys().len();
        if count == 0 {
            return;
        }
        let idx = match self.focus {
            Picker::Dimension => &mut self.dimension_idx,
            Picker::Measure => &mut self.measure_idx,
        };
        *idx = (*idx as i64 + delta as i64).rem_euclid(count as i64) as usize;
    }

    pub fn selected_dimension(&self) -> Option<&str> {
        self.column_keys().get(self.dimension_idx).map(String::as_str)
    }

    pub fn selected_measure(&self) -> Option<&str> {
        self.column_keys().get(self.measure_idx).map(String::as_str)
    }

    pub fn scroll_rows(&mut self, delta: i32) {
        let rows = self.preview().map(SheetPreview::row_count).unwrap_or(0);
        let max = rows.saturating_sub(1);
        let next = (self.row_offset as i64 + delta as i64).clamp(0, max as i64);
        self.row_offset = next as usize;
    }

    /// Chart the picked columns ("Next").
    pub fn confirm_selection(&mut self) {
        let (Some(dimension), Some(measure)) = (
            self.selected_dimension().map(str::to_string),
            self.selected_measure().map(str::to_string),
        ) else {
            self.status_message = "Sheet has no columns to chart".to_string();
            return;
        };

        let result = self
            .session
            .select_dimension(&dimension)
            .and_then(|_| self.session.select_measure(&measure))
            .and_then(|_| self.session.confirm());
        match result {
            Ok(_) => {
                self.status_message = format!(
                    "{} by {} [{}]",
                    measure,
                    dimension,
                    self.session.chart_type()
                );
                self.screen = Screen::Chart;
            }
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    pub fn cycle_chart_type(&mut self) {
        let next = self.session.chart_type().next();
        match self.session.set_chart_type(next) {
            Ok(()) => self.status_message = format!("Chart type: {}", next),
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    pub fn begin_add_row(&mut self) {
        self.add_row_buffer = Some(String::new());
        self.status_message = "Add data row as: label, value".to_string();
    }

    pub fn cancel_add_row(&mut self) {
        self.add_row_buffer = None;
        self.status_message.clear();
    }

    /// Parse the "label, value" prompt and append it to the chart.
    pub fn submit_add_row(&mut self) {
        let Some(input) = self.add_row_buffer.take() else {
            return;
        };
        let Some((label, value)) = input.rsplit_once(',') else {
            self.status_message = format!("Expected 'label, value', got '{}'", input);
            return;
        };
        let label = label.trim();
        let Some(value) = parse_numeric_text(value) else {
            self.status_message = format!("Not a number: '{}'", value.trim());
            return;
        };
        match self.session.add_data_row(label, value) {
            Ok(()) => self.status_message = format!("Added {}", label),
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    /// Leave the current screen. Returns `true` when the app should exit.
    pub fn back(&mut self) -> bool {
        match self.screen {
            Screen::Chart => {
                self.session.back_to_preview();
                self.add_row_buffer = None;
                self.status_message.clear();
                self.screen = Screen::Preview;
                false
            }
            Screen::Preview => {
                self.status_message = "Enter the path of a spreadsheet".to_string();
                self.screen = Screen::OpenFile;
                false
            }
            Screen::OpenFile => true,
        }
    }

    /// The active chart drawn into `width` x `height` characters.
    pub fn chart_text(&self, width: u16, height: u16) -> String {
        match self.session.render_chart(width, height) {
            Ok(text) => text,
            Err(e) => format!("Error: {}", e),
        }
    }
}
