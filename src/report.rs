//! Result rendering and export.
//!
//! Turns a record list into display rows, CSV text, or tab separated text.
//! Exports only distinguish `Match` from everything else, so `NotFound`
//! records are written with the `Mismatch` label.

use crate::constants::{
    DISPLAY_HEADINGS, EXPORT_FILE_PREFIX, EXPORT_HEADERS, MULTI_FIELD_HEADINGS, export_status,
};
use crate::models::{ComparisonKind, MatchStatistics, RecordStatus, ResultRecord};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Download format for a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated, values quoted
    Csv,
    /// Tab separated, values written raw
    Tsv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }

    pub fn render(&self, records: &[ResultRecord]) -> String {
        match self {
            Self::Csv => to_csv(records),
            Self::Tsv => to_tsv(records),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Records to show, dropping matches unless `show_all` is set
pub fn to_display_rows(records: &[ResultRecord], show_all: bool) -> Vec<&ResultRecord> {
    records
        .iter()
        .filter(|record| show_all || !record.status.is_match())
        .collect()
}

pub fn to_csv(records: &[ResultRecord]) -> String {
    let mut out = EXPORT_HEADERS.join(",");
    out.push('\n');
    for record in records {
        out.push_str(&format!(
            "{},\"{}\",\"{}\",\"{}\"\n",
            record.source_row_index,
            escape_csv(&record.value_a),
            escape_csv(&record.value_b),
            export_label(record.status)
        ));
    }
    out
}

pub fn to_tsv(records: &[ResultRecord]) -> String {
    let mut out = EXPORT_HEADERS.join("\t");
    out.push('\n');
    for record in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            record.source_row_index,
            record.value_a,
            record.value_b,
            export_label(record.status)
        ));
    }
    out
}

fn escape_csv(value: &str) -> String {
    value.replace('"', "\"\"")
}

fn export_label(status: RecordStatus) -> &'static str {
    if status.is_match() {
        export_status::MATCH
    } else {
        export_status::MISMATCH
    }
}

/// `comparison_{unix millis}.{ext}`
pub fn export_file_name(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        EXPORT_FILE_PREFIX,
        at.timestamp_millis(),
        format.extension()
    )
}

/// Value column headings for a comparison kind
pub fn column_headings(kind: ComparisonKind) -> (&'static str, &'static str) {
    match kind {
        ComparisonKind::MultiField => MULTI_FIELD_HEADINGS,
        _ => DISPLAY_HEADINGS,
    }
}

/// Serializable summary of a run, used for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary<'a> {
    pub mode: ComparisonKind,
    pub statistics: MatchStatistics,
    pub records: Vec<&'a ResultRecord>,
}
