//! Comparison engine with one module per matching algorithm.
//!
//! Each run takes an immutable [`ComparisonRequest`] and returns a fresh
//! [`ComparisonResult`]. Selections are validated before any row is read,
//! and a result is only returned once the chosen algorithm has completed.

pub mod lookup;
pub mod multi_field;
pub mod rowwise;

#[cfg(test)]
pub mod tests;

use crate::error::{CompareError, Result};
use crate::models::{
    ColumnSelection, ComparisonKind, ComparisonMode, Grid, MatchMode, MatchStatistics,
    RecordStatus, ResultRecord,
};

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Tunables that change classification rather than matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Status given to an email + datetime row with no counterpart in File 2
    pub multi_field_no_match: RecordStatus,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            multi_field_no_match: RecordStatus::Mismatch,
        }
    }
}

/// Everything a single comparison run needs
///
/// The grids are borrowed read-only for the duration of the run.
#[derive(Debug, Clone)]
pub struct ComparisonRequest<'g> {
    pub grid_a: &'g Grid,
    pub grid_b: &'g Grid,
    pub mode: ComparisonMode,
    pub match_mode: MatchMode,
    pub options: EngineOptions,
}

impl<'g> ComparisonRequest<'g> {
    /// Create a request with exact matching and default options
    pub fn new(grid_a: &'g Grid, grid_b: &'g Grid, mode: ComparisonMode) -> Self {
        Self {
            grid_a,
            grid_b,
            mode,
            match_mode: MatchMode::default(),
            options: EngineOptions::default(),
        }
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Check selections and options without touching any row
    pub fn validate(&self) -> Result<()> {
        match &self.mode {
            ComparisonMode::Rowwise { a, b }
            | ComparisonMode::Lookup { a, b }
            | ComparisonMode::MultiColumn { a, b } => validate_pair(a, b)?,
            ComparisonMode::MultiField { .. } => {}
        }

        if self.options.multi_field_no_match.is_match() {
            return Err(CompareError::configuration(
                "multi-field rows without a counterpart cannot be classified as a match",
            ));
        }

        Ok(())
    }
}

fn validate_pair(a: &ColumnSelection, b: &ColumnSelection) -> Result<()> {
    if a.is_empty() {
        return Err(CompareError::missing_selection("File 1"));
    }
    if b.is_empty() {
        return Err(CompareError::missing_selection("File 2"));
    }
    if a.len() != b.len() {
        return Err(CompareError::SelectionLengthMismatch {
            side_a: "File 1".to_string(),
            len_a: a.len(),
            side_b: "File 2".to_string(),
            len_b: b.len(),
        });
    }
    Ok(())
}

/// Ordered records of one completed run
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    kind: ComparisonKind,
    match_mode: MatchMode,
    records: Vec<ResultRecord>,
}

impl ComparisonResult {
    pub fn kind(&self) -> ComparisonKind {
        self.kind
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }

    /// Statistics recomputed from the records on every call
    pub fn statistics(&self) -> MatchStatistics {
        MatchStatistics::from_records(&self.records)
    }
}

/// Cooperative cancellation checked between File 1 rows of the scanning modes
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Interrupt<'t> {
    token: Option<&'t CancellationToken>,
}

impl<'t> Interrupt<'t> {
    pub(crate) fn new(token: Option<&'t CancellationToken>) -> Self {
        Self { token }
    }

    pub(crate) fn check(&self, row: usize) -> Result<()> {
        match self.token {
            Some(token) if token.is_cancelled() => Err(CompareError::Cancelled {
                reason: format!("stopped before File 1 row {}", row),
            }),
            _ => Ok(()),
        }
    }
}

/// Run one comparison to completion
pub fn compare(request: &ComparisonRequest<'_>) -> Result<ComparisonResult> {
    run(request, Interrupt::default())
}

/// Run one comparison, aborting if `token` is cancelled mid-scan
///
/// A cancelled run returns [`CompareError::Cancelled`]; no partial records
/// are ever handed back.
pub fn compare_cancellable(
    request: &ComparisonRequest<'_>,
    token: &CancellationToken,
) -> Result<ComparisonResult> {
    run(request, Interrupt::new(Some(token)))
}

fn run(request: &ComparisonRequest<'_>, interrupt: Interrupt<'_>) -> Result<ComparisonResult> {
    request.validate()?;

    let start = Instant::now();
    let kind = request.mode.kind();
    debug!(
        "Starting {} comparison ({} match): {} rows in File 1, {} rows in File 2",
        kind,
        request.match_mode,
        request.grid_a.data_row_count(),
        request.grid_b.data_row_count()
    );

    let records = match &request.mode {
        ComparisonMode::Rowwise { a, b } | ComparisonMode::MultiColumn { a, b } => {
            rowwise::compare_rowwise(request.grid_a, request.grid_b, a, b, request.match_mode)
        }
        ComparisonMode::Lookup { a, b } => lookup::compare_lookup(
            request.grid_a,
            request.grid_b,
            a,
            b,
            request.match_mode,
            interrupt,
        )?,
        ComparisonMode::MultiField { a, b } => multi_field::compare_multi_field(
            request.grid_a,
            request.grid_b,
            *a,
            *b,
            request.match_mode,
            request.options.multi_field_no_match,
            interrupt,
        )?,
    };

    let result = ComparisonResult {
        kind,
        match_mode: request.match_mode,
        records,
    };

    let stats = result.statistics();
    info!(
        "Comparison complete: {} matches, {} mismatches ({}%) in {:?}",
        stats.match_count,
        stats.mismatch_count,
        stats.match_percentage,
        start.elapsed()
    );

    Ok(result)
}
