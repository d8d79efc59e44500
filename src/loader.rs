//! Listings file loading.
//!
//! Reads the source CSV with every column kept as text, checks the required
//! columns and hands the table to the normalizer. A load either fully
//! succeeds or fails with the first fatal error.

use crate::config::ParseConfig;
use crate::constants::REQUIRED_COLUMNS;
use crate::error::{DashboardError, Result};
use crate::models::Listings;
use crate::normalizer::{ListingNormalizer, ensure_columns};

use polars::prelude::*;
use std::io::{Cursor, ErrorKind};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Read the listings file into an all-text table
pub fn read_raw_listings(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DashboardError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => DashboardError::Io(e),
    })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    parse_raw_listings(bytes)
}

/// Parse CSV bytes into an all-text table
///
/// Schema inference is disabled so annotated cells such as "85 m²" reach the
/// normalizer verbatim; empty cells become nulls.
pub fn parse_raw_listings(bytes: Vec<u8>) -> Result<DataFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    Ok(frame)
}

/// Load, validate and normalize the listings file at `path`
pub fn load_listings(path: &Path, parse: &ParseConfig) -> Result<Listings> {
    let start_time = Instant::now();

    let raw = read_raw_listings(path)?;
    ensure_columns(&raw, REQUIRED_COLUMNS)?;

    let (frame, mut stats) = ListingNormalizer::new(parse.clone()).normalize(raw)?;
    stats.elapsed_ms = start_time.elapsed().as_millis();

    info!(
        "Loaded {} listings from {} in {}ms",
        stats.rows,
        path.display(),
        stats.elapsed_ms
    );

    Ok(Listings::new(frame, stats))
}
