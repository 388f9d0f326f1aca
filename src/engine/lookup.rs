//! Lookup comparison: search File 2 for every File 1 row.
//!
//! File 2 rows are scanned in ascending order and the first qualifying row
//! wins. With more than one paired column the outcome falls back through
//! three tiers: a row matching on every column gives `Match`, otherwise the
//! first row matching on the first column alone gives `Mismatch`, otherwise
//! `NotFound`.

use super::Interrupt;
use super::rowwise::join_cells;
use crate::constants::NOT_FOUND_VALUE;
use crate::error::Result;
use crate::matcher::{all_match, matches};
use crate::models::{ColumnSelection, Grid, MatchMode, RecordStatus, ResultRecord};

/// Outcome of scanning File 2 for one File 1 row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Full(usize),
    FirstColumn(usize),
    None,
}

pub(crate) fn compare_lookup(
    grid_a: &Grid,
    grid_b: &Grid,
    a: &ColumnSelection,
    b: &ColumnSelection,
    mode: MatchMode,
    interrupt: Interrupt<'_>,
) -> Result<Vec<ResultRecord>> {
    let mut records = Vec::new();

    for row in 1..grid_a.row_count() {
        interrupt.check(row)?;

        if a.cells(grid_a, row).all(str::is_empty) {
            continue;
        }

        let value_a = join_cells(a, grid_a, row);
        let record = match find_candidate(grid_a, row, grid_b, a, b, mode) {
            Candidate::Full(j) => ResultRecord {
                source_row_index: row,
                value_a,
                value_b: join_cells(b, grid_b, j),
                status: RecordStatus::Match,
                matched_row_index: Some(j),
            },
            Candidate::FirstColumn(j) => ResultRecord {
                source_row_index: row,
                value_a,
                value_b: join_cells(b, grid_b, j),
                status: RecordStatus::Mismatch,
                matched_row_index: Some(j),
            },
            Candidate::None => ResultRecord {
                source_row_index: row,
                value_a,
                value_b: NOT_FOUND_VALUE.to_string(),
                status: RecordStatus::NotFound,
                matched_row_index: None,
            },
        };
        records.push(record);
    }

    Ok(records)
}

fn find_candidate(
    grid_a: &Grid,
    row: usize,
    grid_b: &Grid,
    a: &ColumnSelection,
    b: &ColumnSelection,
    mode: MatchMode,
) -> Candidate {
    let mut first_column_only = None;
    let (Some(&key_a), Some(&key_b)) = (a.columns().first(), b.columns().first()) else {
        return Candidate::None;
    };

    for j in 1..grid_b.row_count() {
        if !matches(grid_a.cell(row, key_a), grid_b.cell(j, key_b), mode) {
            continue;
        }
        if all_match(a.cells(grid_a, row), b.cells(grid_b, j), mode) {
            return Candidate::Full(j);
        }
        first_column_only.get_or_insert(j);
    }

    first_column_only.map_or(Candidate::None, Candidate::FirstColumn)
}
