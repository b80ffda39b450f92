//! Cell values decoded from a worksheet.
//!
//! This module provides:
//! - [`CellValue`] - The tagged value of one decoded cell (empty, text, number, bool)
//! - [`format_number`] - Display form of a numeric cell
//! - [`parse_numeric_text`] - Numeric-string detection used by the projection

use calamine::Data;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// The value stored in one cell of a row record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn new_text(text: &str) -> CellValue {
        CellValue::Text(text.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric value of the cell, if it has one.
    ///
    /// Empty cells, booleans, NaN and text that is not a numeric literal all
    /// return `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(s) => parse_numeric_text(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Label form of the cell: the text a chart axis shows for it.
    pub fn to_label(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_label())
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            // Dates keep their serial number, as a raw workbook read does.
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::Error(e) => CellValue::Text(e.to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// Format a number for display.
///
/// Integral values drop the fractional part, `-0` prints as `0`, and the
/// non-finite values print as `NaN` / `Infinity` / `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

fn decimal_re() -> &'static Regex {
    static DECIMAL_RE: OnceLock<Regex> = OnceLock::new();
    DECIMAL_RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("decimal literal regex is valid")
    })
}

/// Parse text as a numeric literal.
///
/// Accepts, after trimming surrounding whitespace:
/// - decimal literals with optional sign, fraction and exponent (`42`, `-1.5e3`, `.5`)
/// - `Infinity` with an optional sign
/// - unsigned `0x`, `0o` and `0b` integer literals
///
/// The empty string is not numeric.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let (Some(prefix), Some(digits)) = (trimmed.get(..2), trimmed.get(2..)) {
        let radix = match prefix {
            "0x" | "0X" => Some(16),
            "0o" | "0O" => Some(8),
            "0b" | "0B" => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            if digits.starts_with('+') {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    if decimal_re().is_match(trimmed) {
        return trimmed.parse::<f64>().ok();
    }

    None
}
