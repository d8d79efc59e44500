//! Listing normalizer
//!
//! Turns the raw all-text listings table into typed columns in a single pass
//! per column. Required fields (price, area, room count) abort the whole load
//! on the first bad row; best-effort fields (price per m², district) become
//! nulls that the views drop from their aggregates.

pub mod field_parsers;

#[cfg(test)]
pub mod tests;

use self::field_parsers::{
    RoomCount, extract_district, extract_price_per_m2, parse_area, parse_price, parse_room_count,
};

use crate::config::ParseConfig;
use crate::constants::{
    ADDRESS_COLUMN, AREA_COLUMN, AREA_M2_COLUMN, DEFAULT_ROOM_COUNT, DISTRICT_COLUMN,
    PRICE_COLUMN, PRICE_PER_M2_COLUMN, ROOM_NUMBER_COLUMN,
};
use crate::error::{DashboardError, Result};
use crate::models::LoadStats;

use polars::prelude::*;
use tracing::debug;

/// Columns the normalizer reads
pub const NORMALIZED_SOURCE_COLUMNS: &[&str] = &[
    PRICE_COLUMN,
    AREA_COLUMN,
    PRICE_PER_M2_COLUMN,
    ROOM_NUMBER_COLUMN,
    ADDRESS_COLUMN,
];

/// Check that every named column is present
pub fn ensure_columns(frame: &DataFrame, columns: &[&str]) -> Result<()> {
    let present = frame.get_column_names();
    for column in columns {
        if !present.iter().any(|name| name.as_str() == *column) {
            return Err(DashboardError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Normalizer for raw listings tables
#[derive(Debug, Clone, Default)]
pub struct ListingNormalizer {
    config: ParseConfig,
}

impl ListingNormalizer {
    pub fn new(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Replace the text-encoded fields with typed columns
    ///
    /// Row count and all untouched columns are preserved. The returned stats
    /// count the soft failures; `elapsed_ms` is left for the caller.
    pub fn normalize(&self, mut frame: DataFrame) -> Result<(DataFrame, LoadStats)> {
        ensure_columns(&frame, NORMALIZED_SOURCE_COLUMNS)?;

        let prices = self.parse_prices(&frame)?;
        let areas = self.parse_areas(&frame)?;
        let prices_per_m2 = extract_prices_per_m2(&frame)?;
        let (room_numbers, defaulted_room_counts) = parse_room_numbers(&frame)?;

        let missing_price_per_m2 = prices_per_m2.iter().filter(|value| value.is_none()).count();
        let rows = frame.height();

        frame.with_column(Series::new(PRICE_COLUMN.into(), prices))?;
        frame.with_column(Series::new(AREA_M2_COLUMN.into(), areas))?;
        frame.with_column(Series::new(PRICE_PER_M2_COLUMN.into(), prices_per_m2))?;
        frame.with_column(Series::new(ROOM_NUMBER_COLUMN.into(), room_numbers))?;

        debug!(
            "Normalized {} rows: {} without price per m², {} room counts defaulted",
            rows, missing_price_per_m2, defaulted_room_counts
        );

        let stats = LoadStats {
            rows,
            missing_price_per_m2,
            defaulted_room_counts,
            elapsed_ms: 0,
        };

        Ok((frame, stats))
    }

    fn parse_prices(&self, frame: &DataFrame) -> Result<Vec<f64>> {
        let column = text_column(frame, PRICE_COLUMN)?;
        let values = column.as_materialized_series().str()?;

        let mut prices = Vec::with_capacity(values.len());
        for (row, value) in values.into_iter().enumerate() {
            let parsed = value.and_then(|text| parse_price(text, &self.config.currency_marker));
            match parsed {
                Some(price) => prices.push(price),
                None => {
                    return Err(DashboardError::MalformedPrice {
                        row,
                        value: value.unwrap_or_default().to_string(),
                    });
                }
            }
        }
        Ok(prices)
    }

    fn parse_areas(&self, frame: &DataFrame) -> Result<Vec<f64>> {
        let column = text_column(frame, AREA_COLUMN)?;
        let values = column.as_materialized_series().str()?;

        let mut areas = Vec::with_capacity(values.len());
        for (row, value) in values.into_iter().enumerate() {
            let parsed = value.and_then(|text| parse_area(text, &self.config.area_unit));
            match parsed {
                Some(area) => areas.push(area),
                None => {
                    return Err(DashboardError::MalformedArea {
                        row,
                        value: value.unwrap_or_default().to_string(),
                    });
                }
            }
        }
        Ok(areas)
    }
}

fn extract_prices_per_m2(frame: &DataFrame) -> Result<Vec<Option<f64>>> {
    let column = text_column(frame, PRICE_PER_M2_COLUMN)?;
    let values = column.as_materialized_series().str()?;

    Ok(values
        .into_iter()
        .map(|value| value.and_then(extract_price_per_m2))
        .collect())
}

fn parse_room_numbers(frame: &DataFrame) -> Result<(Vec<i64>, usize)> {
    let column = text_column(frame, ROOM_NUMBER_COLUMN)?;
    let values = column.as_materialized_series().str()?;

    let mut room_numbers = Vec::with_capacity(values.len());
    let mut defaulted = 0usize;
    for (row, value) in values.into_iter().enumerate() {
        match parse_room_count(value) {
            RoomCount::Parsed(count) => room_numbers.push(count),
            RoomCount::Missing => {
                defaulted += 1;
                room_numbers.push(DEFAULT_ROOM_COUNT);
            }
            RoomCount::Malformed => {
                return Err(DashboardError::MalformedRoomCount {
                    row,
                    value: value.unwrap_or_default().to_string(),
                });
            }
        }
    }
    Ok((room_numbers, defaulted))
}

/// Copy of `frame` with the district column derived from the address
///
/// Pure and idempotent: the source frame is left untouched, and rows whose
/// address yields no district carry a null.
pub fn with_districts(frame: &DataFrame) -> Result<DataFrame> {
    ensure_columns(frame, &[ADDRESS_COLUMN])?;

    let column = text_column(frame, ADDRESS_COLUMN)?;
    let addresses = column.as_materialized_series().str()?;

    let districts: Vec<Option<&str>> = addresses
        .into_iter()
        .map(|address| address.and_then(extract_district))
        .collect();

    let missing = districts.iter().filter(|district| district.is_none()).count();
    debug!("Derived districts for {} rows, {} missing", districts.len(), missing);

    let mut derived = frame.clone();
    derived.with_column(Series::new(DISTRICT_COLUMN.into(), districts))?;
    Ok(derived)
}

/// Column cast to text so numeric-looking source cells parse the same way
fn text_column(frame: &DataFrame, name: &str) -> Result<Column> {
    Ok(frame.column(name)?.cast(&DataType::String)?)
}
