//! CSV and JSON export of a chart dataset.

use crate::chart::ChartDataset;
use crate::error::Result;
use sheetchart_extract::format_number;
use std::path::Path;

/// Render a dataset as CSV: a `dimension,measure` header, then one line per point.
pub fn dataset_to_csv(dataset: &ChartDataset) -> String {
    let mut out = String::new();
    out.push_str(&escape_csv_field(&dataset.dimension_name));
    out.push(',');
    out.push_str(&escape_csv_field(&dataset.measure_name));
    out.push('\n');
    for (label, value) in dataset.points() {
        out.push_str(&escape_csv_field(label));
        out.push(',');
        out.push_str(&format_number(value));
        out.push('\n');
    }
    out
}

/// Write a dataset to a CSV file.
pub fn write_dataset_csv(path: &Path, dataset: &ChartDataset) -> Result<()> {
    std::fs::write(path, dataset_to_csv(dataset))?;
    Ok(())
}

/// Render a dataset as a pretty-printed JSON object
/// `{"dimension", "measure", "labels", "values"}`.
pub fn dataset_to_json(dataset: &ChartDataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    // Guard against CSV formula injection in spreadsheet apps.
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let safe_field = if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    };

    if safe_field.contains(',')
        || safe_field.contains('"')
        || safe_field.contains('\n')
        || safe_field.contains('\r')
    {
        format!("\"{}\"", safe_field.replace('"', "\"\""))
    } else {
        safe_field
    }
}
