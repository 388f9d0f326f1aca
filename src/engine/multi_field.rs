//! Email + datetime composite key comparison.
//!
//! The email half honours the requested match mode. The datetime half is
//! always compared exactly.

use super::Interrupt;
use crate::constants::{NOT_FOUND_VALUE, VALUE_SEPARATOR};
use crate::error::Result;
use crate::matcher::matches;
use crate::models::{CompositeKey, Grid, MatchMode, RecordStatus, ResultRecord};

pub(crate) fn compare_multi_field(
    grid_a: &Grid,
    grid_b: &Grid,
    key_a: CompositeKey,
    key_b: CompositeKey,
    mode: MatchMode,
    no_match: RecordStatus,
    interrupt: Interrupt<'_>,
) -> Result<Vec<ResultRecord>> {
    let mut records = Vec::new();

    for row in 1..grid_a.row_count() {
        interrupt.check(row)?;

        let email = grid_a.cell(row, key_a.email);
        let datetime = grid_a.cell(row, key_a.datetime);
        if email.is_empty() || datetime.is_empty() {
            continue;
        }

        let hit = (1..grid_b.row_count()).find(|&j| {
            matches(email, grid_b.cell(j, key_b.email), mode)
                && matches(datetime, grid_b.cell(j, key_b.datetime), MatchMode::Exact)
        });

        let value_a = composite_value(email, datetime);
        let record = match hit {
            Some(j) => ResultRecord {
                source_row_index: row,
                value_a,
                value_b: composite_value(
                    grid_b.cell(j, key_b.email),
                    grid_b.cell(j, key_b.datetime),
                ),
                status: RecordStatus::Match,
                matched_row_index: Some(j),
            },
            None => ResultRecord {
                source_row_index: row,
                value_a,
                value_b: NOT_FOUND_VALUE.to_string(),
                status: no_match,
                matched_row_index: None,
            },
        };
        records.push(record);
    }

    Ok(records)
}

fn composite_value(email: &str, datetime: &str) -> String {
    format!("{}{}{}", email, VALUE_SEPARATOR, datetime)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: CompositeKey = CompositeKey {
        email: 0,
        datetime: 1,
    };

    fn run(a: &Grid, b: &Grid, mode: MatchMode, no_match: RecordStatus) -> Vec<ResultRecord> {
        compare_multi_field(a, b, KEY, KEY, mode, no_match, Interrupt::default()).unwrap()
    }

    #[test]
    fn test_match_on_email_and_datetime() {
        let a = Grid::from_rows([
            vec!["email", "when"],
            vec!["Ann@x.com", "2024-03-01 09:00"],
        ]);
        let b = Grid::from_rows([
            vec!["email", "when"],
            vec!["ann@x.com", "2024-03-01 10:00"],
            vec!["ann@x.com", "2024-03-01 09:00"],
        ]);
        let records = run(&a, &b, MatchMode::CaseInsensitive, RecordStatus::Mismatch);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, RecordStatus::Match);
        assert_eq!(records[0].matched_row_index, Some(2));
        assert_eq!(records[0].value_a, "Ann@x.com | 2024-03-01 09:00");
        assert_eq!(records[0].value_b, "ann@x.com | 2024-03-01 09:00");
    }

    #[test]
    fn test_datetime_is_never_fuzzy() {
        let a = Grid::from_rows([vec!["email", "when"], vec!["ann@x.com", "2024-03-01"]]);
        let b = Grid::from_rows([
            vec!["email", "when"],
            vec!["ann@x.com", "2024-03-01 09:00"],
        ]);
        let records = run(&a, &b, MatchMode::Partial, RecordStatus::Mismatch);

        assert_eq!(records[0].status, RecordStatus::Mismatch);
        assert_eq!(records[0].value_b, NOT_FOUND_VALUE);
        assert_eq!(records[0].matched_row_index, None);
    }

    #[test]
    fn test_no_match_status_is_configurable() {
        let a = Grid::from_rows([vec!["email", "when"], vec!["ann@x.com", "1"]]);
        let b = Grid::from_rows([vec!["email", "when"]]);
        let records = run(&a, &b, MatchMode::Exact, RecordStatus::NotFound);

        assert_eq!(records[0].status, RecordStatus::NotFound);
    }

    #[test]
    fn test_skips_rows_missing_a_field() {
        let a = Grid::from_rows([
            vec!["email", "when"],
            vec!["ann@x.com", ""],
            vec!["", "2024-03-01"],
            vec!["bob@x.com"],
            vec!["cat@x.com", "2024-03-02"],
        ]);
        let b = Grid::from_rows([vec!["email", "when"], vec!["cat@x.com", "2024-03-02"]]);
        let records = run(&a, &b, MatchMode::Exact, RecordStatus::Mismatch);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_row_index, 4);
        assert_eq!(records[0].status, RecordStatus::Match);
    }
}
