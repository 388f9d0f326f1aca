//! CSV Comparator Library
//!
//! An in-memory engine for comparing the columns of two CSV files.
//!
//! This library provides tools for:
//! - Parsing CSV text into ragged, header-first grids
//! - Comparing cell values exactly, case-insensitively or by containment
//! - Rowwise, lookup, multi-column and email + datetime comparisons
//! - Deriving match statistics and exporting results as CSV or TSV

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod models;
pub mod parser;
pub mod report;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::CompareConfig;
pub use engine::{ComparisonRequest, ComparisonResult, EngineOptions, compare, compare_cancellable};
pub use error::{CompareError, Result};
pub use models::{
    ColumnSelection, ComparisonKind, ComparisonMode, CompositeKey, Grid, MatchMode,
    MatchStatistics, RecordStatus, ResultRecord,
};
pub use parser::parse;
