//! Application constants for the CSV comparator
//!
//! Literal strings that appear in results and exports, plus CLI defaults.

// =============================================================================
// Result Values
// =============================================================================

/// Separator used when several selected cells are joined into one value
pub const VALUE_SEPARATOR: &str = " | ";

/// Placeholder value for File 2 when no candidate row was found
pub const NOT_FOUND_VALUE: &str = "NOT FOUND";

/// Row index of the header row in every grid
pub const HEADER_ROW: usize = 0;

// =============================================================================
// Export
// =============================================================================

/// Column headings of exported result files
pub const EXPORT_HEADERS: [&str; 4] = ["Row #", "File 1 Value", "File 2 Value", "Status"];

/// Prefix of generated export file names
pub const EXPORT_FILE_PREFIX: &str = "comparison";

/// Status labels written to export files
pub mod export_status {
    pub const MATCH: &str = "Match";
    pub const MISMATCH: &str = "Mismatch";
}

// =============================================================================
// Display
// =============================================================================

/// Column headings shown for single and multi-column comparisons
pub const DISPLAY_HEADINGS: (&str, &str) = ("File 1 Value", "File 2 Value");

/// Column headings shown for email + datetime comparisons
pub const MULTI_FIELD_HEADINGS: (&str, &str) =
    ("File 1 (Email | DateTime)", "File 2 (Email | DateTime)");

/// File extensions the loader refuses to read as text
pub const UNSUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

// =============================================================================
// Configuration
// =============================================================================

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "csv-comparator";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default log level when no verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";
