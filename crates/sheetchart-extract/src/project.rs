//! Column projection: two chosen columns into parallel label/value arrays.

use crate::cell::CellValue;
use crate::error::{ExtractError, Result};
use crate::extract::RowRecord;
use serde::{Deserialize, Serialize};

/// Labels and values index-aligned to the projected rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of measure cells that were not numeric and were charted as 0.
    pub fn zeroed_count(rows: &[RowRecord], measure_key: &str) -> usize {
        rows.iter()
            .filter(|row| !row.get(measure_key).is_some_and(CellValue::is_numeric))
            .count()
    }
}

/// Project a dimension column and a measure column out of `rows`.
///
/// Keys are not validated: a key missing from a row reads as an empty cell.
/// Labels are the cell's text (empty for missing cells); values are the
/// cell's number, or 0 when the cell is not numeric.
pub fn project_columns(rows: &[RowRecord], dimension_key: &str, measure_key: &str) -> Projection {
    let mut projection = Projection {
        labels: Vec::with_capacity(rows.len()),
        values: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        let label = row
            .get(dimension_key)
            .map(CellValue::to_label)
            .unwrap_or_default();
        let value = row
            .get(measure_key)
            .and_then(CellValue::as_number)
            .unwrap_or(0.0);
        projection.labels.push(label);
        projection.values.push(value);
    }

    projection
}

/// Like [`project_columns`], but rejects keys that are not in `column_keys`.
pub fn project_columns_checked(
    column_keys: &[String],
    rows: &[RowRecord],
    dimension_key: &str,
    measure_key: &str,
) -> Result<Projection> {
    for key in [dimension_key, measure_key] {
        if !column_keys.iter().any(|k| k == key) {
            return Err(ExtractError::UnknownColumn(key.to_string()));
        }
    }
    Ok(project_columns(rows, dimension_key, measure_key))
}
