//! Terminal chart service.
//!
//! [`TextChartService`] keeps its charts in memory and draws them as plain
//! text: labelled bars and tables directly, line and bar plots through
//! `textplots`' Braille canvas.

use super::dataset::PlotData;
use super::{ChartConfig, ChartDataset, ChartHandle, ChartService, ChartType};
use crate::error::{Result, SheetchartError};
use sheetchart_extract::format_number;
use std::collections::HashMap;
use textplots::{AxisBuilder, Chart, LabelBuilder, LabelFormat, LineStyle, Plot, Shape};
use tracing::debug;

const MAX_LABEL_WIDTH: usize = 20;
const EMPTY_MESSAGE: &str = "No data points to chart";
const TOO_SMALL_MESSAGE: &str = "Terminal too small for chart";

struct ChartInstance {
    config: ChartConfig,
    dataset: ChartDataset,
    chart_type: ChartType,
}

/// In-memory chart service rendering to text.
#[derive(Default)]
pub struct TextChartService {
    charts: HashMap<ChartHandle, ChartInstance>,
}

impl TextChartService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    fn instance(&self, handle: ChartHandle) -> Result<&ChartInstance> {
        self.charts
            .get(&handle)
            .ok_or(SheetchartError::UnknownChart(handle))
    }

    fn instance_mut(&mut self, handle: ChartHandle) -> Result<&mut ChartInstance> {
        self.charts
            .get_mut(&handle)
            .ok_or(SheetchartError::UnknownChart(handle))
    }

    fn fresh_handle(&self) -> ChartHandle {
        loop {
            let handle = ChartHandle::new(rand::random::<u64>());
            if !self.charts.contains_key(&handle) {
                return handle;
            }
        }
    }
}

impl ChartService for TextChartService {
    fn create_chart(
        &mut self,
        config: &ChartConfig,
        dataset: ChartDataset,
        chart_type: ChartType,
    ) -> Result<ChartHandle> {
        let handle = self.fresh_handle();
        debug!(
            %handle,
            %chart_type,
            points = dataset.len(),
            document = %config.document_name,
            "created chart"
        );
        self.charts.insert(
            handle,
            ChartInstance {
                config: config.clone(),
                dataset,
                chart_type,
            },
        );
        Ok(handle)
    }

    fn set_chart_type(&mut self, handle: ChartHandle, chart_type: ChartType) -> Result<()> {
        self.instance_mut(handle)?.chart_type = chart_type;
        Ok(())
    }

    fn chart_type(&self, handle: ChartHandle) -> Result<ChartType> {
        Ok(self.instance(handle)?.chart_type)
    }

    fn update_data(&mut self, handle: ChartHandle, dataset: ChartDataset) -> Result<()> {
        self.instance_mut(handle)?.dataset = dataset;
        Ok(())
    }

    fn add_data_row(&mut self, handle: ChartHandle, label: &str, value: f64) -> Result<()> {
        self.instance_mut(handle)?.dataset.add_row(label, value);
        Ok(())
    }

    fn dataset(&self, handle: ChartHandle) -> Result<&ChartDataset> {
        Ok(&self.instance(handle)?.dataset)
    }

    fn render(&self, handle: ChartHandle, width: u16, height: u16) -> Result<String> {
        let chart = self.instance(handle)?;
        let width = width as usize;
        let height = height as usize;

        let header = format!(
            "{} - {} by {} [{}]",
            chart.config.document_title,
            chart.dataset.measure_name,
            chart.dataset.dimension_name,
            chart.chart_type
        );
        let body_height = height.saturating_sub(1);

        let body = if chart.dataset.is_empty() {
            EMPTY_MESSAGE.to_string()
        } else {
            match chart.chart_type {
                ChartType::Structure => render_structure(&chart.dataset, width, body_height),
                ChartType::Table => render_table(&chart.dataset, body_height),
                ChartType::Grid => render_grid(&chart.dataset, body_height),
                ChartType::Time | ChartType::Multiple => {
                    render_plot(&chart.dataset, chart.chart_type, width, body_height)
                }
            }
        };

        Ok(format!("{}\n{}", truncate(&header, width), body))
    }

    fn remove_chart(&mut self, handle: ChartHandle) {
        self.charts.remove(&handle);
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, width: usize) -> String {
    let len = char_len(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(len)))
}

fn pad_left(s: &str, width: usize) -> String {
    let len = char_len(s);
    format!("{}{}", " ".repeat(width.saturating_sub(len)), s)
}

/// Keep `rows` lines of `lines`, replacing the last kept line with an overflow note.
fn clip_lines(mut lines: Vec<String>, rows: usize) -> Vec<String> {
    if lines.len() <= rows {
        return lines;
    }
    if rows == 0 {
        return Vec::new();
    }
    let hidden = lines.len() - rows + 1;
    lines.truncate(rows - 1);
    lines.push(format!("... {} more", hidden));
    lines
}

/// Horizontal bars, one line per point: `label  ████  value`.
pub(crate) fn render_structure(dataset: &ChartDataset, width: usize, rows: usize) -> String {
    let label_width = dataset
        .labels
        .iter()
        .map(|l| char_len(l))
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH)
        .min(width / 3);
    let value_texts: Vec<String> = dataset.values.iter().map(|v| format_number(*v)).collect();
    let value_width = value_texts.iter().map(|v| char_len(v)).max().unwrap_or(0);
    let bar_width = width.saturating_sub(label_width + value_width + 2);

    let max_abs = dataset
        .values
        .iter()
        .filter(|v| v.is_finite())
        .fold(0.0f64, |acc, v| acc.max(v.abs()));

    let lines: Vec<String> = dataset
        .points()
        .zip(&value_texts)
        .map(|((label, value), value_text)| {
            let len = if max_abs > 0.0 && value.is_finite() {
                ((value.abs() / max_abs) * bar_width as f64).round() as usize
            } else {
                0
            };
            let glyph = if value < 0.0 { "▒" } else { "█" };
            format!(
                "{} {} {}",
                pad_right(&truncate(label, label_width), label_width),
                pad_right(&glyph.repeat(len), bar_width),
                pad_left(value_text, value_width)
            )
        })
        .collect();

    clip_lines(lines, rows).join("\n")
}

fn column_widths(dataset: &ChartDataset, value_texts: &[String]) -> (usize, usize) {
    let label_width = dataset
        .labels
        .iter()
        .map(|l| char_len(l))
        .chain(std::iter::once(char_len(&dataset.dimension_name)))
        .max()
        .unwrap_or(0);
    let value_width = value_texts
        .iter()
        .map(|v| char_len(v))
        .chain(std::iter::once(char_len(&dataset.measure_name)))
        .max()
        .unwrap_or(0);
    (label_width, value_width)
}

/// Two aligned columns separated by `|`, with a header rule.
pub(crate) fn render_table(dataset: &ChartDataset, rows: usize) -> String {
    let value_texts: Vec<String> = dataset.values.iter().map(|v| format_number(*v)).collect();
    let (lw, vw) = column_widths(dataset, &value_texts);

    let mut lines = vec![
        format!(
            "{} | {}",
            pad_right(&dataset.dimension_name, lw),
            pad_right(&dataset.measure_name, vw)
        ),
        format!("{}-+-{}", "-".repeat(lw), "-".repeat(vw)),
    ];
    let body: Vec<String> = dataset
        .labels
        .iter()
        .zip(&value_texts)
        .map(|(label, value)| format!("{} | {}", pad_right(label, lw), pad_left(value, vw)))
        .collect();
    lines.extend(clip_lines(body, rows.saturating_sub(2)));
    lines.join("\n")
}

/// Fully bordered grid with one cell per label and value.
pub(crate) fn render_grid(dataset: &ChartDataset, rows: usize) -> String {
    let value_texts: Vec<String> = dataset.values.iter().map(|v| format_number(*v)).collect();
    let (lw, vw) = column_widths(dataset, &value_texts);
    let rule = format!("+-{}-+-{}-+", "-".repeat(lw), "-".repeat(vw));

    let mut lines = vec![
        rule.clone(),
        format!(
            "| {} | {} |",
            pad_right(&dataset.dimension_name, lw),
            pad_right(&dataset.measure_name, vw)
        ),
        rule.clone(),
    ];
    let body: Vec<String> = dataset
        .labels
        .iter()
        .zip(&value_texts)
        .map(|(label, value)| format!("| {} | {} |", pad_right(label, lw), pad_left(value, vw)))
        .collect();
    lines.extend(clip_lines(body, rows.saturating_sub(4)));
    lines.push(rule);
    lines.join("\n")
}

/// `0 Munich  1 Kochi ...` index legend for plots, cut to `width`.
fn plot_legend(dataset: &ChartDataset, width: usize) -> String {
    let legend = dataset
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{} {}", i, label))
        .collect::<Vec<_>>()
        .join("  ");
    truncate(&legend, width)
}

/// Line (`time`) or bar (`multiple`) plot over the values in row order.
pub(crate) fn render_plot(
    dataset: &ChartDataset,
    chart_type: ChartType,
    width: usize,
    rows: usize,
) -> String {
    // textplots uses a Braille canvas where one terminal character is 2x4 points.
    let plot_width_points = (width as u32).saturating_mul(2);
    // Reserve one line for the legend and two for the x-axis labels.
    let plot_height_points = (rows.saturating_sub(3) as u32).saturating_mul(4);
    if plot_width_points < 32 || plot_height_points < 3 {
        return TOO_SMALL_MESSAGE.to_string();
    }

    let Some(data) = PlotData::from_dataset(dataset) else {
        return EMPTY_MESSAGE.to_string();
    };

    format!(
        "{}\n{}",
        render_textplots(&data, chart_type, plot_width_points, plot_height_points),
        plot_legend(dataset, width)
    )
}

/// Render plot data to a string using textplots.
fn render_textplots(data: &PlotData, chart_type: ChartType, width: u32, height: u32) -> String {
    let (xmin, xmax) = data.x_range;
    let (ymin, ymax) = data.y_range;
    let span_x = xmax - xmin;
    let span_y = ymax - ymin;

    // Shift points so minimums map to 0 (textplots draws axes at x=0, y=0)
    let shifted_points: Vec<(f32, f32)> = data
        .points
        .iter()
        .map(|(x, y)| (x - xmin, y - ymin))
        .collect();

    let mut chart = Chart::new_with_y_range(width, height, 0.0, span_x, 0.0, span_y);

    let shape = match chart_type {
        ChartType::Time => Shape::Lines(&shifted_points),
        _ => Shape::Bars(&shifted_points),
    };

    let chart = chart
        .x_label_format(LabelFormat::Custom(Box::new(move |v| {
            format!("{:.0}", v + xmin)
        })))
        .y_label_format(LabelFormat::Custom(Box::new(move |v| {
            format!("{:.1}", v + ymin)
        })))
        .x_axis_style(LineStyle::Solid)
        .y_axis_style(LineStyle::Solid)
        .lineplot(&shape);
    chart.borders();
    chart.axis();
    chart.figures();
    chart.frame()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> ChartDataset {
        let mut dataset = ChartDataset::new("City", "Sales");
        for (city, sales) in [
            ("Munich", 5500.0),
            ("Kochi", 2600.0),
            ("Mumbai", 7000.0),
            ("Delhi", 1200.0),
            ("Berlin", 8000.0),
        ] {
            dataset.add_row(city, sales);
        }
        dataset
    }

    fn service_with_chart(chart_type: ChartType) -> (TextChartService, ChartHandle) {
        let mut service = TextChartService::new();
        let handle = service
            .create_chart(&ChartConfig::default(), cities(), chart_type)
            .unwrap();
        (service, handle)
    }

    #[test]
    fn test_structure_bars_scale_to_max() {
        let text = render_structure(&cities(), 40, 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Munich"));
        assert!(lines[4].ends_with("8000"));

        let bar_len = |line: &str| line.chars().filter(|c| *c == '█').count();
        assert!(bar_len(lines[4]) > bar_len(lines[0]));
        assert!(bar_len(lines[0]) > bar_len(lines[3]));
    }

    #[test]
    fn test_structure_clips_rows() {
        let text = render_structure(&cities(), 40, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "... 3 more");
    }

    #[test]
    fn test_structure_all_zero_values() {
        let mut dataset = ChartDataset::new("k", "v");
        dataset.add_row("a", 0.0);
        dataset.add_row("b", 0.0);
        let text = render_structure(&dataset, 30, 10);
        assert!(!text.contains('█'));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_table_layout() {
        let text = render_table(&cities(), 20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "City   | Sales");
        assert_eq!(lines[1], "-------+------");
        assert_eq!(lines[2], "Munich |  5500");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_grid_layout() {
        let text = render_grid(&cities(), 20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "+--------+-------+");
        assert_eq!(lines[1], "| City   | Sales |");
        assert_eq!(lines[3], "| Munich |  5500 |");
        assert_eq!(lines.last().copied(), Some("+--------+-------+"));
    }

    #[test]
    fn test_plot_too_small() {
        assert_eq!(
            render_plot(&cities(), ChartType::Time, 10, 10),
            TOO_SMALL_MESSAGE
        );
    }

    #[test]
    fn test_plot_renders_with_legend() {
        let text = render_plot(&cities(), ChartType::Multiple, 60, 20);
        assert!(text.lines().count() > 3);
        assert!(text.lines().last().unwrap().starts_with("0 Munich  1 Kochi"));
    }

    #[test]
    fn test_service_renders_every_type() {
        for kind in ChartType::ALL {
            let (service, handle) = service_with_chart(kind);
            let text = service.render(handle, 80, 24).unwrap();
            assert!(text.starts_with("Training_Title - Sales by City"));
            assert!(text.lines().next().unwrap().ends_with(&format!("[{}]", kind)));
        }
    }

    #[test]
    fn test_service_empty_dataset_message() {
        let mut service = TextChartService::new();
        let handle = service
            .create_chart(
                &ChartConfig::default(),
                ChartDataset::new("x", "y"),
                ChartType::Time,
            )
            .unwrap();
        let text = service.render(handle, 80, 24).unwrap();
        assert!(text.ends_with(EMPTY_MESSAGE));
    }

    #[test]
    fn test_service_updates_and_rows() {
        let (mut service, handle) = service_with_chart(ChartType::Structure);

        service.add_data_row(handle, "Paris", 300.0).unwrap();
        assert_eq!(service.dataset(handle).unwrap().len(), 6);

        let mut replacement = ChartDataset::new("Biz", "Revenue");
        replacement.add_row("Biz 1", 1200.0);
        service.update_data(handle, replacement).unwrap();
        assert_eq!(service.dataset(handle).unwrap().labels, vec!["Biz 1"]);

        service.set_chart_type(handle, ChartType::Grid).unwrap();
        assert_eq!(service.chart_type(handle).unwrap(), ChartType::Grid);
    }

    #[test]
    fn test_service_unknown_handle() {
        let (mut service, handle) = service_with_chart(ChartType::Table);
        service.remove_chart(handle);
        assert_eq!(service.chart_count(), 0);
        assert!(matches!(
            service.render(handle, 80, 24),
            Err(SheetchartError::UnknownChart(h)) if h == handle
        ));
        assert!(service.set_chart_type(handle, ChartType::Time).is_err());
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut service = TextChartService::new();
        let a = service
            .create_chart(&ChartConfig::default(), cities(), ChartType::Table)
            .unwrap();
        let b = service
            .create_chart(&ChartConfig::default(), cities(), ChartType::Table)
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(service.chart_count(), 2);
    }
}
