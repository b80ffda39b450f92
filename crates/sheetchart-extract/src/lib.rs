//! sheetchart_extract - Tabular preview extractor.
//!
//! - [`parse_sheet`] - Decode workbook bytes into a [`SheetPreview`] (column keys + row records)
//! - [`project_columns`] - Map a dimension and a measure column into parallel labels/values
//! - [`CellValue`] - Tagged cell value with explicit numeric coercion

pub mod cell;
pub mod cell_ref;
pub mod error;
pub mod extract;
pub mod project;

pub use cell::{CellValue, format_number, parse_numeric_text};
pub use cell_ref::{CellRef, SheetRange};
pub use error::{ExtractError, Result};
pub use extract::{EMPTY_HEADER_KEY, RowRecord, SheetPreview, header_keys, parse_sheet};
pub use project::{Projection, project_columns, project_columns_checked};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn cities_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Cities").unwrap();
        sheet.write_string(0, 0, "City").unwrap();
        sheet.write_string(0, 1, "Sales").unwrap();
        sheet.write_string(0, 2, "Open").unwrap();
        let data = [
            ("Munich", 5500.0),
            ("Kochi", 2600.0),
            ("Mumbai", 7000.0),
            ("Delhi", 1200.0),
            ("Berlin", 8000.0),
        ];
        for (i, (city, sales)) in data.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *city).unwrap();
            sheet.write_number(row, 1, *sales).unwrap();
            sheet.write_boolean(row, 2, i % 2 == 0).unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_parse_sheet_counts_rows_and_columns() {
        let preview = parse_sheet(&cities_workbook()).unwrap();
        assert_eq!(preview.sheet_name, "Cities");
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.column_keys, vec!["City", "Sales", "Open"]);

        let first_keys: Vec<String> = preview.rows[0].keys().map(str::to_string).collect();
        assert_eq!(first_keys, preview.column_keys);
        assert_eq!(preview.range.unwrap().to_string(), "A1:C6");
    }

    #[test]
    fn test_parse_sheet_then_project() {
        let preview = parse_sheet(&cities_workbook()).unwrap();
        let projection = project_columns(&preview.rows, "City", "Sales");
        assert_eq!(
            projection.labels,
            vec!["Munich", "Kochi", "Mumbai", "Delhi", "Berlin"]
        );
        assert_eq!(
            projection.values,
            vec![5500.0, 2600.0, 7000.0, 1200.0, 8000.0]
        );

        // Booleans are not numeric.
        let flags = project_columns(&preview.rows, "City", "Open");
        assert_eq!(flags.values, vec![0.0; 5]);
        assert_eq!(flags.labels.len(), 5);
    }

    #[test]
    fn test_parse_sheet_uses_first_sheet_only() {
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.write_string(0, 0, "k").unwrap();
        first.write_string(1, 0, "first").unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "k").unwrap();
        second.write_string(1, 0, "second").unwrap();
        second.write_string(2, 0, "more").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let preview = parse_sheet(&bytes).unwrap();
        assert_eq!(preview.sheet_name, "Sheet1");
        assert_eq!(preview.rows.len(), 1);
        assert_eq!(
            preview.rows[0].get("k"),
            Some(&CellValue::new_text("first"))
        );
    }

    #[test]
    fn test_parse_sheet_empty_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let preview = parse_sheet(&bytes).unwrap();
        assert!(preview.column_keys.is_empty());
        assert!(preview.rows.is_empty());

        let projection = project_columns(&preview.rows, "x", "y");
        assert!(projection.labels.is_empty());
        assert!(projection.values.is_empty());
    }

    #[test]
    fn test_parse_sheet_malformed_is_decode_error() {
        let mut bytes = cities_workbook();
        bytes.truncate(40);
        let err = parse_sheet(&bytes).unwrap_err();
        assert!(matches!(err, ExtractError::Decode(_)));
    }
}
