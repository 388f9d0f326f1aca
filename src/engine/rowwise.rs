//! Positional comparison: row i of File 1 against row i of File 2.
//!
//! Serves both the single column rowwise mode and the multi-column mode,
//! which differ only in how the columns were picked.

use crate::constants::VALUE_SEPARATOR;
use crate::matcher::all_match;
use crate::models::{ColumnSelection, Grid, MatchMode, RecordStatus, ResultRecord};

/// One record per data row index present in either file
///
/// Rows missing from the shorter file read as empty cells. Produces only
/// `Match` or `Mismatch`.
pub fn compare_rowwise(
    grid_a: &Grid,
    grid_b: &Grid,
    a: &ColumnSelection,
    b: &ColumnSelection,
    mode: MatchMode,
) -> Vec<ResultRecord> {
    let max_rows = grid_a.data_row_count().max(grid_b.data_row_count());

    (1..=max_rows)
        .map(|row| {
            let is_match = all_match(a.cells(grid_a, row), b.cells(grid_b, row), mode);
            ResultRecord {
                source_row_index: row,
                value_a: join_cells(a, grid_a, row),
                value_b: join_cells(b, grid_b, row),
                status: if is_match {
                    RecordStatus::Match
                } else {
                    RecordStatus::Mismatch
                },
                matched_row_index: None,
            }
        })
        .collect()
}

/// Selected cells of a row joined with `" | "`
pub(crate) fn join_cells(selection: &ColumnSelection, grid: &Grid, row: usize) -> String {
    selection
        .cells(grid, row)
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grids() -> (Grid, Grid) {
        let a = Grid::from_rows([
            vec!["id", "name", "city"],
            vec!["1", "Alice", "Leeds"],
            vec!["2", "Bob", "York"],
            vec!["3", "Cara", "Hull"],
        ]);
        let b = Grid::from_rows([
            vec!["id", "name", "city"],
            vec!["1", "alice", "Leeds"],
            vec!["2", "Bob", "Derby"],
        ]);
        (a, b)
    }

    #[test]
    fn test_single_column() {
        let (a, b) = grids();
        let records = compare_rowwise(
            &a,
            &b,
            &ColumnSelection::single(1),
            &ColumnSelection::single(1),
            MatchMode::CaseInsensitive,
        );

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].status, RecordStatus::Match);
        assert_eq!(records[1].status, RecordStatus::Match);
        // File 2 has no third data row
        assert_eq!(records[2].value_a, "Cara");
        assert_eq!(records[2].value_b, "");
        assert_eq!(records[2].status, RecordStatus::Mismatch);
        assert!(records.iter().all(|r| r.matched_row_index.is_none()));
    }

    #[test]
    fn test_multi_column_requires_every_pair() {
        let (a, b) = grids();
        let cols = ColumnSelection::new(vec![1, 2]);
        let records = compare_rowwise(&a, &b, &cols, &cols, MatchMode::CaseInsensitive);

        assert_eq!(records[0].value_a, "Alice | Leeds");
        assert_eq!(records[0].value_b, "alice | Leeds");
        assert_eq!(records[0].status, RecordStatus::Match);
        assert_eq!(records[1].value_b, "Bob | Derby");
        assert_eq!(records[1].status, RecordStatus::Mismatch);
    }

    #[test]
    fn test_pairs_columns_by_position() {
        let a = Grid::from_rows([vec!["x", "y"], vec!["1", "2"]]);
        let b = Grid::from_rows([vec!["y", "x"], vec!["2", "1"]]);
        let records = compare_rowwise(
            &a,
            &b,
            &ColumnSelection::new(vec![0, 1]),
            &ColumnSelection::new(vec![1, 0]),
            MatchMode::Exact,
        );
        assert_eq!(records[0].status, RecordStatus::Match);
    }

    #[test]
    fn test_header_only_grids() {
        let a = Grid::from_rows([vec!["id"]]);
        let b = Grid::default();
        let records = compare_rowwise(
            &a,
            &b,
            &ColumnSelection::single(0),
            &ColumnSelection::single(0),
            MatchMode::Exact,
        );
        assert!(records.is_empty());
    }
}
