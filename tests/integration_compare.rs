//! Integration tests for the comparator pipeline
//!
//! These tests write real CSV files to a temporary directory, load them the
//! way the CLI does, run each comparison mode and check the exported text.

use csv_comparator::config::CompareConfig;
use csv_comparator::parser::load_grid;
use csv_comparator::report::{ExportFormat, to_csv, to_display_rows, to_tsv};
use csv_comparator::{
    ColumnSelection, ComparisonMode, ComparisonRequest, CompositeKey, MatchMode, RecordStatus,
    compare,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a CSV fixture and return its path
fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const CUSTOMERS: &str = "id,email,signed_up\r\n\
1,ann@example.com,2024-01-02 09:00\r\n\
2,Bob@Example.com,2024-01-03 10:30\r\n\
\r\n\
3,cara@example.com,2024-01-04 11:00\r\n\
4,,2024-01-05 12:00\r\n";

const CRM: &str = "email,signed_up,name\n\
bob@example.com,2024-01-03 10:30,\"Ray, Bob\"\n\
ann@example.com,2024-01-02 09:15,\"Lee, Ann\"\n\
ann@example.com,2024-01-02 09:00,\"Lee, Ann\"\n";

/// Lookup by email across files with different column orders
#[tokio::test]
async fn test_lookup_across_files() {
    let dir = TempDir::new().unwrap();
    let grid_a = load_grid(&write_csv(&dir, "customers.csv", CUSTOMERS))
        .await
        .unwrap();
    let grid_b = load_grid(&write_csv(&dir, "crm.csv", CRM)).await.unwrap();

    // The blank line is not a row
    assert_eq!(grid_a.data_row_count(), 4);
    assert_eq!(grid_b.cell(1, 2), "Ray, Bob");

    let request = ComparisonRequest::new(
        &grid_a,
        &grid_b,
        ComparisonMode::Lookup {
            a: ColumnSelection::single(1),
            b: ColumnSelection::single(0),
        },
    )
    .with_match_mode(MatchMode::CaseInsensitive);
    let result = compare(&request).unwrap();

    // Row 4 has no email and is skipped
    let records = result.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].matched_row_index, Some(2));
    assert_eq!(records[1].value_b, "bob@example.com");
    assert_eq!(records[2].status, RecordStatus::NotFound);

    let stats = result.statistics();
    assert_eq!((stats.match_count, stats.mismatch_count), (2, 1));
    assert_eq!(stats.match_percentage, 67.0);

    let csv = to_csv(records);
    assert_eq!(
        csv.lines().last(),
        Some("3,\"cara@example.com\",\"NOT FOUND\",\"Mismatch\"")
    );
}

/// Email + datetime key skips the earlier row whose time differs
#[tokio::test]
async fn test_multi_field_across_files() {
    let dir = TempDir::new().unwrap();
    let grid_a = load_grid(&write_csv(&dir, "customers.csv", CUSTOMERS))
        .await
        .unwrap();
    let grid_b = load_grid(&write_csv(&dir, "crm.csv", CRM)).await.unwrap();

    let config = CompareConfig::default()
        .with_match_mode(MatchMode::CaseInsensitive)
        .with_multi_field_no_match(RecordStatus::NotFound);

    let request = ComparisonRequest::new(
        &grid_a,
        &grid_b,
        ComparisonMode::MultiField {
            a: CompositeKey {
                email: 1,
                datetime: 2,
            },
            b: CompositeKey {
                email: 0,
                datetime: 1,
            },
        },
    )
    .with_match_mode(config.match_mode)
    .with_options(config.engine_options());
    let result = compare(&request).unwrap();

    let records = result.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].matched_row_index, Some(3));
    assert_eq!(records[0].value_b, "ann@example.com | 2024-01-02 09:00");
    assert_eq!(records[1].status, RecordStatus::Match);
    assert_eq!(records[2].status, RecordStatus::NotFound);

    let differences = to_display_rows(records, false);
    assert_eq!(differences.len(), 1);
    assert_eq!(differences[0].source_row_index, 3);
}

/// Rowwise over files of different lengths, exported as TSV
#[tokio::test]
async fn test_rowwise_export_tsv() {
    let dir = TempDir::new().unwrap();
    let grid_a = load_grid(&write_csv(&dir, "a.csv", "sku,qty\nA1,5\nB2,7\nC3,1\n"))
        .await
        .unwrap();
    let grid_b = load_grid(&write_csv(&dir, "b.csv", "sku,qty\nA1,5\nB2,8\n"))
        .await
        .unwrap();

    let result = compare(&ComparisonRequest::new(
        &grid_a,
        &grid_b,
        ComparisonMode::MultiColumn {
            a: ColumnSelection::new(vec![0, 1]),
            b: ColumnSelection::new(vec![0, 1]),
        },
    ))
    .unwrap();

    assert_eq!(
        to_tsv(result.records()),
        "Row #\tFile 1 Value\tFile 2 Value\tStatus\n\
         1\tA1 | 5\tA1 | 5\tMatch\n\
         2\tB2 | 7\tB2 | 8\tMismatch\n\
         3\tC3 | 1\t | \tMismatch\n"
    );

    let out_path = dir.path().join("result.tsv");
    fs::write(&out_path, ExportFormat::Tsv.render(result.records())).unwrap();
    assert_eq!(fs::read_to_string(out_path).unwrap().lines().count(), 4);
}
