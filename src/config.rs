//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command-line overrides applied by the CLI.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::engine::EngineOptions;
use crate::error::{CompareError, Result};
use crate::models::{MatchMode, RecordStatus};
use crate::report::ExportFormat;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by every comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// String equivalence policy for cell values
    pub match_mode: MatchMode,

    /// Show matching rows in the result table, not just differences
    pub show_all: bool,

    /// Write the full result list to a file in this format
    pub export_format: Option<ExportFormat>,

    /// Directory for export files
    pub output_dir: PathBuf,

    /// Classification of email + datetime rows with no counterpart
    pub multi_field_no_match: RecordStatus,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Exact,
            show_all: false,
            export_format: None,
            output_dir: PathBuf::from("."),
            multi_field_no_match: EngineOptions::default().multi_field_no_match,
        }
    }
}

impl CompareConfig {
    /// Platform config file location, e.g. `~/.config/csv-comparator/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text).map_err(|e| {
            CompareError::configuration(format!(
                "failed to parse '{}': {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Explicit file if given, else the default location if it exists, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn with_show_all(mut self) -> Self {
        self.show_all = true;
        self
    }

    pub fn with_export(mut self, format: ExportFormat) -> Self {
        self.export_format = Some(format);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_multi_field_no_match(mut self, status: RecordStatus) -> Self {
        self.multi_field_no_match = status;
        self
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            multi_field_no_match: self.multi_field_no_match,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.multi_field_no_match.is_match() {
            return Err(CompareError::configuration(
                "multi_field_no_match must be 'mismatch' or 'not-found'",
            ));
        }
        if self.export_format.is_some() && self.output_dir.as_os_str().is_empty() {
            return Err(CompareError::configuration(
                "output_dir must not be empty when exporting",
            ));
        }
        Ok(())
    }
}
