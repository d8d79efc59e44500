//! Error handling for listing loads and dashboard rendering.
//!
//! Required fields (price, area, room count) fail the whole load with a
//! row-level error. Best-effort fields never appear here: they become nulls.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Listings file not found at path: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Required column '{column}' is missing from the listings table")]
    MissingColumn { column: String },

    #[error("Malformed price in row {row}: '{value}'")]
    MalformedPrice { row: usize, value: String },

    #[error("Malformed area in row {row}: '{value}'")]
    MalformedArea { row: usize, value: String },

    #[error("Malformed room count in row {row}: '{value}'")]
    MalformedRoomCount { row: usize, value: String },

    #[error("Unknown page '{name}' (expected descriptives, sales or profit)")]
    UnknownPage { name: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl DashboardError {
    /// True for the row-level parse failures of required fields
    pub fn is_malformed_field(&self) -> bool {
        matches!(
            self,
            DashboardError::MalformedPrice { .. }
                | DashboardError::MalformedArea { .. }
                | DashboardError::MalformedRoomCount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
