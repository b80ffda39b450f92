use crate::error::SheetchartError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Layout a chart is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Horizontal labelled bars, one per data point.
    #[default]
    Structure,
    /// Two-column dimension/measure table.
    Table,
    /// Line over the values in row order.
    Time,
    /// Vertical bars over the values in row order.
    Multiple,
    /// Bordered grid table.
    Grid,
}

impl ChartType {
    pub const ALL: [ChartType; 5] = [
        ChartType::Structure,
        ChartType::Table,
        ChartType::Time,
        ChartType::Multiple,
        ChartType::Grid,
    ];

    pub fn as_tag(self) -> &'static str {
        match self {
            ChartType::Structure => "structure",
            ChartType::Table => "table",
            ChartType::Time => "time",
            ChartType::Multiple => "multiple",
            ChartType::Grid => "grid",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_tag().eq_ignore_ascii_case(tag.trim()))
    }

    /// The next type in [`ChartType::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for ChartType {
    type Err = SheetchartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| SheetchartError::UnknownChartType(s.to_string()))
    }
}
