//! Configuration management and validation.
//!
//! Holds the source and export locations, the text markers stripped while
//! parsing, and rendering options. CLI flags are applied on top of the
//! defaults before validation.

use crate::constants::{
    DEFAULT_AREA_UNIT, DEFAULT_CHART_WIDTH, DEFAULT_CURRENCY_MARKER, DEFAULT_OUTPUT_DIR,
    DEFAULT_SOURCE_PATH, EXPORT_FILE_NAME, MAX_CHART_WIDTH, MIN_CHART_WIDTH,
};
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Text markers removed from raw fields before numeric parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Currency suffix in price text
    pub currency_marker: String,

    /// Unit token in area text
    pub area_unit: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            currency_marker: DEFAULT_CURRENCY_MARKER.to_string(),
            area_unit: DEFAULT_AREA_UNIT.to_string(),
        }
    }
}

/// Global configuration for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// CSV file with the raw listings
    pub source_path: PathBuf,

    /// Directory receiving the exported CSV
    pub output_dir: PathBuf,

    /// File name of the exported CSV
    pub export_file_name: String,

    /// Width of the longest chart bar
    pub chart_width: usize,

    /// Field parsing markers
    pub parse: ParseConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            parse: ParseConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_chart_width(mut self, width: usize) -> Self {
        self.chart_width = width;
        self
    }

    pub fn with_currency_marker(mut self, marker: impl Into<String>) -> Self {
        self.parse.currency_marker = marker.into();
        self
    }

    /// Full path of the exported CSV
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.export_file_name)
    }

    /// Check the configuration before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(DashboardError::Configuration {
                message: "source path must not be empty".to_string(),
            });
        }

        if self.export_file_name.trim().is_empty() {
            return Err(DashboardError::Configuration {
                message: "export file name must not be empty".to_string(),
            });
        }

        if !(MIN_CHART_WIDTH..=MAX_CHART_WIDTH).contains(&self.chart_width) {
            return Err(DashboardError::Configuration {
                message: format!(
                    "chart width {} outside {}..={}",
                    self.chart_width, MIN_CHART_WIDTH, MAX_CHART_WIDTH
                ),
            });
        }

        if self.parse.area_unit.trim().is_empty() {
            return Err(DashboardError::Configuration {
                message: "area unit must not be empty".to_string(),
            });
        }

        debug!(
            "Configuration valid: source={}, output={}",
            self.source_path.display(),
            self.output_dir.display()
        );
        Ok(())
    }
}
