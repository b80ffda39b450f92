//! Workbook decoding and header-row inference.
//!
//! [`parse_sheet`] takes the raw bytes of a workbook, picks the first sheet by
//! position and turns it into a [`SheetPreview`]: the ordered column keys
//! inferred from the header row plus one [`RowRecord`] per non-blank data row.

use crate::cell::CellValue;
use crate::cell_ref::{CellRef, SheetRange};
use crate::error::{ExtractError, Result};
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::{debug, warn};

/// Key given to a header cell that has no text.
pub const EMPTY_HEADER_KEY: &str = "__EMPTY";

/// One decoded data row, keyed by column.
///
/// Entries keep the column order of the header row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    entries: Vec<(String, CellValue)>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(key, value)` pairs, keeping their order.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CellValue)>,
    {
        let mut record = Self::new();
        for (key, value) in pairs {
            record.insert(key, value);
        }
        record
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The decoded first sheet of a workbook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetPreview {
    pub sheet_name: String,
    /// Column keys in header order. Equal to the keys of `rows[0]` when there are rows.
    pub column_keys: Vec<String>,
    pub rows: Vec<RowRecord>,
    /// Used range of the sheet, `None` for a sheet with no cells.
    pub range: Option<SheetRange>,
}

impl SheetPreview {
    /// An empty-but-valid preview: no keys, no rows.
    pub fn empty(sheet_name: impl Into<String>) -> Self {
        SheetPreview {
            sheet_name: sheet_name.into(),
            column_keys: Vec::new(),
            rows: Vec::new(),
            range: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.column_keys.iter().any(|k| k == key)
    }
}

/// Decode workbook bytes and convert the first sheet into a preview.
///
/// The format is sniffed from the content (xlsx, xlsm, xlsb, xls, ods).
/// A sheet with no data rows yields an empty preview, not an error.
pub fn parse_sheet(bytes: &[u8]) -> Result<SheetPreview> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ExtractError::Decode(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(ExtractError::EmptyWorkbook);
    };
    if sheet_names.len() > 1 {
        debug!(
            sheets = sheet_names.len(),
            "workbook has several sheets, using the first"
        );
    }

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ExtractError::EmptyWorkbook)?
        .map_err(|e| ExtractError::Sheet {
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;

    let preview = preview_from_range(&sheet_name, &range);
    debug!(
        sheet = %preview.sheet_name,
        rows = preview.rows.len(),
        columns = preview.column_keys.len(),
        "parsed sheet"
    );
    Ok(preview)
}

/// Convert a decoded cell range into a preview, using its first row as headers.
pub fn preview_from_range(sheet_name: &str, range: &Range<Data>) -> SheetPreview {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return SheetPreview::empty(sheet_name);
    };
    let sheet_range = SheetRange::new(
        CellRef::new(start.1 as usize, start.0 as usize),
        CellRef::new(end.1 as usize, end.0 as usize),
    );

    let mut rows_iter = range.rows();
    let Some(header_cells) = rows_iter.next() else {
        return SheetPreview::empty(sheet_name);
    };
    let header = header_keys(header_cells);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for cells in rows_iter {
        let values: Vec<CellValue> = cells.iter().map(CellValue::from).collect();
        if values.iter().all(CellValue::is_empty) {
            skipped += 1;
            continue;
        }

        let mut record = RowRecord::new();
        for (idx, key) in header.iter().enumerate() {
            let value = values.get(idx).cloned().unwrap_or_default();
            record.insert(key.clone(), value);
        }
        rows.push(record);
    }
    if skipped > 0 {
        debug!(skipped, "skipped blank rows");
    }

    if rows.is_empty() {
        warn!(sheet = sheet_name, "sheet has a header row but no data rows");
        let mut preview = SheetPreview::empty(sheet_name);
        preview.range = Some(sheet_range);
        return preview;
    }

    SheetPreview {
        sheet_name: sheet_name.to_string(),
        column_keys: header,
        rows,
        range: Some(sheet_range),
    }
}

/// Infer unique column keys from the header row.
///
/// Blank header cells become `__EMPTY`. A key seen before gets a numeric
/// suffix (`Name`, `Name_1`, `Name_2`, ...), skipping keys already taken.
pub fn header_keys(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut keys = Vec::with_capacity(cells.len());

    for cell in cells {
        let text = CellValue::from(cell).to_label();
        let base = if text.is_empty() {
            EMPTY_HEADER_KEY.to_string()
        } else {
            text
        };

        let counter = seen.get(&base).copied().unwrap_or(0);
        if counter == 0 {
            seen.insert(base.clone(), 1);
            keys.push(base);
            continue;
        }

        let mut counter = counter;
        let mut candidate = format!("{}_{}", base, counter);
        counter += 1;
        while seen.contains_key(&candidate) {
            candidate = format!("{}_{}", base, counter);
            counter += 1;
        }
        seen.insert(base, counter);
        seen.insert(candidate.clone(), 1);
        keys.push(candidate);
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn city_sales_range() -> Range<Data> {
        let mut range = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), text("City"));
        range.set_value((0, 1), text("Sales"));
        range.set_value((1, 0), text("Munich"));
        range.set_value((1, 1), Data::Float(5500.0));
        range.set_value((2, 0), text("Kochi"));
        range.set_value((3, 0), text("Mumbai"));
        range.set_value((3, 1), Data::Int(7000));
        range
    }

    #[test]
    fn test_preview_from_range_rows_and_keys() {
        let preview = preview_from_range("Sheet1", &city_sales_range());
        assert_eq!(preview.sheet_name, "Sheet1");
        assert_eq!(preview.column_keys, vec!["City", "Sales"]);
        assert_eq!(preview.rows.len(), 3);

        let first_keys: Vec<&str> = preview.rows[0].keys().collect();
        assert_eq!(first_keys, vec!["City", "Sales"]);

        assert_eq!(
            preview.rows[1].get("Sales"),
            Some(&CellValue::Empty),
            "missing cell is an empty value"
        );
        assert_eq!(preview.rows[2].get("Sales"), Some(&CellValue::Number(7000.0)));
    }

    #[test]
    fn test_preview_range_reference() {
        let preview = preview_from_range("Sheet1", &city_sales_range());
        let range = preview.range.unwrap();
        assert_eq!(range.to_string(), "A1:B4");
        assert_eq!(range.first_column(), "A");
        assert_eq!(range.last_column(), "B");
        assert_eq!(range.last_row_number(), 4);
    }

    #[test]
    fn test_preview_skips_blank_rows() {
        let mut range = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), text("k"));
        range.set_value((0, 1), text("v"));
        range.set_value((1, 0), text("a"));
        range.set_value((3, 1), Data::Float(1.0));

        let preview = preview_from_range("S", &range);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[1].get("v"), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_preview_header_only_is_empty() {
        let mut range = Range::new((0, 0), (0, 1));
        range.set_value((0, 0), text("City"));
        range.set_value((0, 1), text("Sales"));

        let preview = preview_from_range("S", &range);
        assert!(preview.column_keys.is_empty());
        assert!(preview.rows.is_empty());
        assert!(preview.range.is_some());
    }

    #[test]
    fn test_preview_empty_range() {
        let range: Range<Data> = Range::empty();
        let preview = preview_from_range("Blank", &range);
        assert!(preview.is_empty());
        assert!(preview.column_keys.is_empty());
        assert_eq!(preview.range, None);
    }

    #[test]
    fn test_header_keys_blank_and_duplicates() {
        let keys = header_keys(&[
            text("Name"),
            Data::Empty,
            text("Name"),
            Data::Empty,
            text("Name_1"),
            Data::Float(2024.0),
        ]);
        assert_eq!(
            keys,
            vec!["Name", "__EMPTY", "Name_1", "__EMPTY_1", "Name_1_1", "2024"]
        );
    }

    #[test]
    fn test_header_keys_skip_taken_suffix() {
        let keys = header_keys(&[text("A_1"), text("A"), text("A")]);
        assert_eq!(keys, vec!["A_1", "A", "A_2"]);
    }

    #[test]
    fn test_row_record_insert_keeps_position() {
        let mut record = RowRecord::from_pairs([
            ("City", CellValue::new_text("Munich")),
            ("Sales", CellValue::Number(1.0)),
        ]);
        record.insert("City", CellValue::new_text("Berlin"));
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["City", "Sales"]);
        assert_eq!(record.get("City"), Some(&CellValue::new_text("Berlin")));
        assert!(!record.contains_key("Region"));
    }

    #[test]
    fn test_parse_sheet_rejects_garbage() {
        let err = parse_sheet(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }

    #[test]
    fn test_parse_sheet_rejects_empty_input() {
        assert!(parse_sheet(&[]).is_err());
    }
}
