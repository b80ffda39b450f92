//! Cell reference formatting for worksheet ranges.
//!
//! Converts zero-indexed column/row coordinates into spreadsheet-style
//! references (e.g., "A1", "AA100") and describes the used range of a sheet.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::new(1, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// The used range of a worksheet, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl SheetRange {
    pub fn new(start: CellRef, end: CellRef) -> SheetRange {
        SheetRange { start, end }
    }

    /// Letters of the first column ("A" in `A1:C6`).
    pub fn first_column(&self) -> String {
        CellRef::col_to_letters(self.start.col)
    }

    /// Letters of the last column ("C" in `A1:C6`).
    pub fn last_column(&self) -> String {
        CellRef::col_to_letters(self.end.col)
    }

    /// One-based number of the last row (6 in `A1:C6`).
    pub fn last_row_number(&self) -> usize {
        self.end.row + 1
    }

    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
