//! Error handling for comparison operations.
//!
//! Selection problems are reported before any scan starts, so a failed run
//! never leaves a partially populated result behind.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No columns selected for {side}")]
    MissingSelection { side: String },

    #[error(
        "Column selections must pair up: {side_a} has {len_a} column(s), {side_b} has {len_b}"
    )]
    SelectionLengthMismatch {
        side_a: String,
        len_a: usize,
        side_b: String,
        len_b: usize,
    },

    #[error("Unsupported file format: {path} - {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("No data found in file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Comparison cancelled: {reason}")]
    Cancelled { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CompareError {
    pub fn missing_selection(side: impl Into<String>) -> Self {
        Self::MissingSelection { side: side.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the caller can fix this by changing the request and retrying
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::MissingSelection { .. }
                | Self::SelectionLengthMismatch { .. }
                | Self::UnsupportedFormat { .. }
                | Self::EmptyFile { .. }
                | Self::Configuration { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
