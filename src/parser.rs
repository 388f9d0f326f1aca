//! CSV text parsing into a [`Grid`].
//!
//! The parser is deliberately lenient: it never fails, and malformed quoting
//! only means some cells keep stray characters. A `"` toggles the quoted
//! state and is not kept; doubled quotes inside a quoted cell are therefore
//! dropped rather than unescaped to a single `"`.

use crate::constants::UNSUPPORTED_EXTENSIONS;
use crate::error::{CompareError, Result};
use crate::models::Grid;
use std::path::Path;
use tracing::{debug, warn};

/// Parse delimited text into a grid
///
/// Lines are trimmed and blank lines are skipped, so row indices are dense
/// over non-blank lines in file order.
pub fn parse(text: &str) -> Grid {
    let rows = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect();
    Grid::new(rows)
}

fn parse_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => cells.push(flush_cell(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(flush_cell(&mut current));
    cells
}

/// Take the accumulated cell, stripping one wrapping quote on each side
fn flush_cell(current: &mut String) -> String {
    let cell = std::mem::take(current);
    let cell = cell.strip_prefix('"').unwrap_or(&cell);
    let cell = cell.strip_suffix('"').unwrap_or(cell);
    cell.to_string()
}

/// Render a grid back to comma separated text
///
/// Cells are written as-is, so this only inverts [`parse`] for cells free of
/// commas, quotes, newlines and surrounding whitespace.
pub fn unparse(grid: &Grid) -> String {
    grid.rows()
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a CSV file and parse it
///
/// Spreadsheet workbooks are refused, as is a file without a single
/// non-blank line.
pub async fn load_grid(path: &Path) -> Result<Grid> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if UNSUPPORTED_EXTENSIONS
            .iter()
            .any(|unsupported| ext.eq_ignore_ascii_case(unsupported))
        {
            warn!("Refusing spreadsheet input: {}", path.display());
            return Err(CompareError::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: "spreadsheet workbooks are not supported, export the sheet as CSV"
                    .to_string(),
            });
        }
    }

    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes);
    let grid = parse(text.strip_prefix('\u{feff}').unwrap_or(&text[..]));

    if grid.is_empty() {
        return Err(CompareError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "Loaded {}: {} rows, {} columns",
        path.display(),
        grid.row_count(),
        grid.column_count()
    );

    Ok(grid)
}
