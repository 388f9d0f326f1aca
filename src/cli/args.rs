//! Command-line argument definitions for the CSV comparator
//!
//! This module defines the CLI interface using the clap derive API and the
//! translation of flags into a comparison mode and configuration overrides.

use crate::config::CompareConfig;
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::error::{CompareError, Result};
use crate::models::{
    ColumnSelection, ComparisonKind, ComparisonMode, CompositeKey, MatchMode, RecordStatus,
};
use crate::report::ExportFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the CSV comparator
///
/// Compares a column (or several) of one CSV file against another, either
/// row by row or by looking each row up in the second file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "csv-comparator",
    version,
    about = "Compare columns of two CSV files row by row or by lookup",
    long_about = "Compares selected columns of two CSV files. Rowwise and multi-column modes \
                  compare row i of each file; lookup mode searches the second file for every \
                  row of the first; multi-field mode matches an email + datetime pair. Results \
                  can be filtered to differences and exported as CSV or TSV."
)]
pub struct Args {
    /// First CSV file; the query side in lookup and multi-field modes
    #[arg(value_name = "FILE_1")]
    pub file_a: PathBuf,

    /// Second CSV file; the reference side in lookup and multi-field modes
    #[arg(value_name = "FILE_2")]
    pub file_b: PathBuf,

    /// Comparison algorithm
    #[arg(long = "mode", value_enum, default_value_t = ComparisonKind::Rowwise)]
    pub mode: ComparisonKind,

    /// Columns of File 1 to compare (0-based indices or letters, comma-separated)
    #[arg(
        short = 'a',
        long = "columns-a",
        value_name = "COLS",
        help = "Columns of File 1, e.g. '1' or 'A,C'"
    )]
    pub columns_a: Option<ColumnSelection>,

    /// Columns of File 2, paired by position with --columns-a
    #[arg(
        short = 'b',
        long = "columns-b",
        value_name = "COLS",
        help = "Columns of File 2, paired by position with --columns-a"
    )]
    pub columns_b: Option<ColumnSelection>,

    /// Email column of File 1 (multi-field mode)
    #[arg(long = "email-a", value_name = "COL")]
    pub email_a: Option<usize>,

    /// Datetime column of File 1 (multi-field mode)
    #[arg(long = "datetime-a", value_name = "COL")]
    pub datetime_a: Option<usize>,

    /// Email column of File 2 (multi-field mode)
    #[arg(long = "email-b", value_name = "COL")]
    pub email_b: Option<usize>,

    /// Datetime column of File 2 (multi-field mode)
    #[arg(long = "datetime-b", value_name = "COL")]
    pub datetime_b: Option<usize>,

    /// How cell values are compared
    #[arg(short = 'm', long = "match-type", value_enum)]
    pub match_type: Option<MatchMode>,

    /// Show matching rows as well as differences
    #[arg(long = "show-all")]
    pub show_all: bool,

    /// Export the full result list in this format
    #[arg(long = "export", value_enum)]
    pub export: Option<ExportFormat>,

    /// Directory for exported files
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Status for multi-field rows with no counterpart in File 2
    #[arg(long = "multi-field-no-match", value_enum)]
    pub multi_field_no_match: Option<RecordStatus>,

    /// Print the column labels of both files and exit
    #[arg(long = "list-columns")]
    pub list_columns: bool,

    /// Path to configuration file (TOML format)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(long = "output-format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored table and summary
    Human,
    /// JSON document for scripting
    Json,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => DEFAULT_LOG_LEVEL,
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress spinner only for interactive human output
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Build the comparison mode from the column flags
    ///
    /// Missing column lists become empty selections so the engine reports
    /// them. Multi-field mode needs all four key columns up front.
    pub fn comparison_mode(&self) -> Result<ComparisonMode> {
        let a = self.columns_a.clone().unwrap_or_default();
        let b = self.columns_b.clone().unwrap_or_default();

        let mode = match self.mode {
            ComparisonKind::Rowwise => ComparisonMode::Rowwise { a, b },
            ComparisonKind::Lookup => ComparisonMode::Lookup { a, b },
            ComparisonKind::MultiColumn => ComparisonMode::MultiColumn { a, b },
            ComparisonKind::MultiField => ComparisonMode::MultiField {
                a: CompositeKey {
                    email: required(self.email_a, "File 1 email column")?,
                    datetime: required(self.datetime_a, "File 1 datetime column")?,
                },
                b: CompositeKey {
                    email: required(self.email_b, "File 2 email column")?,
                    datetime: required(self.datetime_b, "File 2 datetime column")?,
                },
            },
        };
        Ok(mode)
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: CompareConfig) -> CompareConfig {
        if let Some(match_mode) = self.match_type {
            config = config.with_match_mode(match_mode);
        }
        if self.show_all {
            config = config.with_show_all();
        }
        if let Some(format) = self.export {
            config = config.with_export(format);
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir.clone());
        }
        if let Some(status) = self.multi_field_no_match {
            config = config.with_multi_field_no_match(status);
        }
        config
    }
}

fn required(column: Option<usize>, what: &str) -> Result<usize> {
    column.ok_or_else(|| CompareError::missing_selection(what))
}
