//! Core data structures and types for CSV comparison.
//!
//! Defines the parsed grid, column selections, match and comparison modes,
//! result records and the statistics derived from them.

use crate::constants::HEADER_ROW;
use crate::error::CompareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed tabular data from one CSV file, header row included
///
/// Rows may be ragged. Any cell outside the stored data reads as the empty
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a grid from string slices, mostly useful in tests
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Cell at `row`, `col`, or `""` when either index is out of range
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows including the header
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows after the header
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the header row
    pub fn column_count(&self) -> usize {
        self.rows.get(HEADER_ROW).map_or(0, Vec::len)
    }

    pub fn headers(&self) -> &[String] {
        self.row(HEADER_ROW).unwrap_or(&[])
    }

    /// Display labels for column pickers, e.g. `"email (Column B)"`
    pub fn column_labels(&self) -> Vec<String> {
        self.headers()
            .iter()
            .enumerate()
            .map(|(index, header)| format!("{} (Column {})", header, column_letter(index)))
            .collect()
    }
}

/// Spreadsheet-style column letter: 0 -> A, 25 -> Z, 26 -> AA
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Inverse of [`column_letter`]; `None` for anything but ASCII letters
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut n = 0usize;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}

/// Ordered column indices into one grid
///
/// In paired modes the k-th column of File 1 is compared with the k-th
/// column of File 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection(Vec<usize>);

impl ColumnSelection {
    pub fn new(columns: Vec<usize>) -> Self {
        Self(columns)
    }

    pub fn single(column: usize) -> Self {
        Self(vec![column])
    }

    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected cells of `row`, in selection order
    pub fn cells<'a>(&'a self, grid: &'a Grid, row: usize) -> impl Iterator<Item = &'a str> + 'a {
        self.0.iter().map(move |&col| grid.cell(row, col))
    }
}

impl From<Vec<usize>> for ColumnSelection {
    fn from(columns: Vec<usize>) -> Self {
        Self(columns)
    }
}

/// Parses `"0,2,3"` or spreadsheet letters such as `"A,C,D"`
impl FromStr for ColumnSelection {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut columns = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let column = part
                .parse::<usize>()
                .ok()
                .or_else(|| column_index(part))
                .ok_or_else(|| {
                    CompareError::configuration(format!(
                        "invalid column '{}': expected a 0-based index or a column letter",
                        part
                    ))
                })?;
            columns.push(column);
        }
        Ok(Self(columns))
    }
}

/// Email + datetime column pair used as a composite key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeKey {
    pub email: usize,
    pub datetime: usize,
}

/// String equivalence policy applied when comparing two cells
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Equality after lowercasing both values
    CaseInsensitive,
    /// Either lowercased value contains the other
    Partial,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::CaseInsensitive => write!(f, "case-insensitive"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

/// Which algorithm governs a run, without its column selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonKind {
    Rowwise,
    Lookup,
    MultiField,
    MultiColumn,
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rowwise => write!(f, "rowwise"),
            Self::Lookup => write!(f, "lookup"),
            Self::MultiField => write!(f, "multi-field"),
            Self::MultiColumn => write!(f, "multi-column"),
        }
    }
}

/// Comparison algorithm together with the columns it reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Positional comparison of row i in File 1 with row i in File 2
    Rowwise {
        a: ColumnSelection,
        b: ColumnSelection,
    },
    /// Search File 2 for each File 1 row
    Lookup {
        a: ColumnSelection,
        b: ColumnSelection,
    },
    /// Search File 2 for each File 1 email + datetime pair
    MultiField { a: CompositeKey, b: CompositeKey },
    /// Positional comparison over explicitly chosen column sets
    MultiColumn {
        a: ColumnSelection,
        b: ColumnSelection,
    },
}

impl ComparisonMode {
    pub fn kind(&self) -> ComparisonKind {
        match self {
            Self::Rowwise { .. } => ComparisonKind::Rowwise,
            Self::Lookup { .. } => ComparisonKind::Lookup,
            Self::MultiField { .. } => ComparisonKind::MultiField,
            Self::MultiColumn { .. } => ComparisonKind::MultiColumn,
        }
    }
}

/// Classification of one result record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Match,
    Mismatch,
    NotFound,
}

impl RecordStatus {
    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "Match"),
            Self::Mismatch => write!(f, "Mismatch"),
            Self::NotFound => write!(f, "Not Found"),
        }
    }
}

/// One reconciled row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// 1-based data row in File 1 (header excluded)
    pub source_row_index: usize,
    pub value_a: String,
    pub value_b: String,
    pub status: RecordStatus,
    /// Row in File 2 that produced the hit, for lookup style modes
    pub matched_row_index: Option<usize>,
}

/// Counts derived from a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MatchStatistics {
    pub match_count: usize,
    pub mismatch_count: usize,
    pub total_count: usize,
    pub match_percentage: f64,
}

impl MatchStatistics {
    /// Recompute statistics from records; `Mismatch` and `NotFound` both
    /// count as mismatches
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let match_count = records.iter().filter(|r| r.status.is_match()).count();
        let mismatch_count = records.len() - match_count;
        let total_count = match_count + mismatch_count;
        let match_percentage = if total_count > 0 {
            (match_count as f64 / total_count as f64 * 100.0).round()
        } else {
            0.0
        };

        Self {
            match_count,
            mismatch_count,
            total_count,
            match_percentage,
        }
    }
}
