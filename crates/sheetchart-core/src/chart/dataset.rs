//! Chart dataset and plot preparation.
//!
//! This module provides:
//! - [`ChartDataset`]: Named dimension/measure arrays handed to a chart service
//! - [`PlotData`]: Points and axis ranges prepared for rendering (renderer-agnostic)

use crate::error::{Result, SheetchartError};
use serde::{Deserialize, Serialize};
use sheetchart_extract::Projection;

/// The data a chart shows: one label and one value per point.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    #[serde(rename = "dimension")]
    pub dimension_name: String,
    #[serde(rename = "measure")]
    pub measure_name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartDataset {
    pub fn new(dimension_name: impl Into<String>, measure_name: impl Into<String>) -> Self {
        ChartDataset {
            dimension_name: dimension_name.into(),
            measure_name: measure_name.into(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a dataset from a projection, named after the selected columns.
    pub fn from_projection(
        dimension_name: impl Into<String>,
        measure_name: impl Into<String>,
        projection: Projection,
    ) -> Self {
        ChartDataset {
            dimension_name: dimension_name.into(),
            measure_name: measure_name.into(),
            labels: projection.labels,
            values: projection.values,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Append one data point.
    pub fn add_row(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Replace all points. Fails without modifying the dataset if the lengths differ.
    pub fn replace_data(&mut self, labels: Vec<String>, values: Vec<f64>) -> Result<()> {
        if labels.len() != values.len() {
            return Err(SheetchartError::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        self.labels = labels;
        self.values = values;
        Ok(())
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Prepared data for rendering a chart.
#[derive(Clone, Debug)]
pub struct PlotData {
    /// Data points as (index, value) pairs.
    pub points: Vec<(f32, f32)>,
    /// X-axis range (min, max).
    pub x_range: (f32, f32),
    /// Y-axis range (min, max).
    pub y_range: (f32, f32),
}

impl PlotData {
    /// Prepare a dataset for plotting. Non-finite values are plotted as 0.
    ///
    /// Returns `None` when the dataset has no points.
    pub fn from_dataset(dataset: &ChartDataset) -> Option<Self> {
        let points: Vec<(f32, f32)> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let y = if v.is_finite() { *v as f32 } else { 0.0 };
                (i as f32, y)
            })
            .collect();

        let first = points.first()?;

        let (mut xmin, mut xmax) = (first.0, first.0);
        let (mut ymin, mut ymax) = (first.1, first.1);
        for (x, y) in &points {
            xmin = xmin.min(*x);
            xmax = xmax.max(*x);
            ymin = ymin.min(*y);
            ymax = ymax.max(*y);
        }

        // Bars grow from zero, so zero is always on the axis.
        ymin = ymin.min(0.0);
        ymax = ymax.max(0.0);

        // Ensure non-zero ranges
        if xmax == xmin {
            xmax = xmin + 1.0;
        }
        if ymax == ymin {
            ymax = ymin + 1.0;
        }

        Some(PlotData {
            points,
            x_range: (xmin, xmax),
            y_range: (ymin, ymax),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> ChartDataset {
        ChartDataset::from_projection(
            "City",
            "Sales",
            Projection {
                labels: vec!["Munich".into(), "Kochi".into(), "Mumbai".into()],
                values: vec![5500.0, 2600.0, 7000.0],
            },
        )
    }

    #[test]
    fn test_add_row_appends() {
        let mut dataset = cities();
        dataset.add_row("Berlin", 8000.0);
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.labels.last().map(String::as_str), Some("Berlin"));
        assert_eq!(dataset.values.last().copied(), Some(8000.0));
    }

    #[test]
    fn test_replace_data_checks_lengths() {
        let mut dataset = cities();
        let err = dataset
            .replace_data(vec!["Biz 1".into()], vec![1200.0, 8845.0])
            .unwrap_err();
        assert!(matches!(
            err,
            SheetchartError::LengthMismatch {
                labels: 1,
                values: 2
            }
        ));
        assert_eq!(dataset.len(), 3, "failed replace leaves data untouched");

        dataset
            .replace_data(vec!["Biz 1".into(), "Biz 2".into()], vec![1200.0, 8845.0])
            .unwrap();
        assert_eq!(dataset.labels, vec!["Biz 1", "Biz 2"]);
        assert_eq!(dataset.measure_name, "Sales");
    }

    #[test]
    fn test_plot_data_ranges_include_zero() {
        let data = PlotData::from_dataset(&cities()).unwrap();
        assert_eq!(data.points.len(), 3);
        assert_eq!(data.x_range, (0.0, 2.0));
        assert_eq!(data.y_range, (0.0, 7000.0));
    }

    #[test]
    fn test_plot_data_single_point_has_nonzero_spans() {
        let mut dataset = ChartDataset::new("k", "v");
        dataset.add_row("only", 0.0);
        let data = PlotData::from_dataset(&dataset).unwrap();
        assert_eq!(data.x_range, (0.0, 1.0));
        assert_eq!(data.y_range, (0.0, 1.0));
    }

    #[test]
    fn test_plot_data_empty_dataset() {
        assert!(PlotData::from_dataset(&ChartDataset::new("k", "v")).is_none());
    }

    #[test]
    fn test_dataset_json_field_names() {
        let json = serde_json::to_value(cities()).unwrap();
        assert_eq!(json["dimension"], "City");
        assert_eq!(json["measure"], "Sales");
        assert_eq!(json["labels"][0], "Munich");
        assert_eq!(json["values"][2], 7000.0);
    }
}
