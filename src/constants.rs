//! Application constants for the listings dashboard
//!
//! Column names, default paths and export metadata shared by the loader,
//! the views and the CLI.

// =============================================================================
// Source Columns
// =============================================================================

pub const PRICE_COLUMN: &str = "price";
pub const AREA_COLUMN: &str = "area";
pub const PRICE_PER_M2_COLUMN: &str = "price_1m2";
pub const ROOM_NUMBER_COLUMN: &str = "room_number";
pub const ADDRESS_COLUMN: &str = "address";
pub const CATEGORY_COLUMN: &str = "category";

/// Columns every listings file must carry
pub const REQUIRED_COLUMNS: &[&str] = &[
    PRICE_COLUMN,
    AREA_COLUMN,
    PRICE_PER_M2_COLUMN,
    ROOM_NUMBER_COLUMN,
    ADDRESS_COLUMN,
    CATEGORY_COLUMN,
];

// =============================================================================
// Derived Columns
// =============================================================================

/// Numeric area derived from the `area` text column
pub const AREA_M2_COLUMN: &str = "area_m2";

/// District derived on demand from the address
pub const DISTRICT_COLUMN: &str = "rayon";

/// Listing count column produced by the descriptives view
pub const COUNT_COLUMN: &str = "count";

// =============================================================================
// Parsing Defaults
// =============================================================================

/// Currency marker stripped from price text ("120 000 AZN")
pub const DEFAULT_CURRENCY_MARKER: &str = "AZN";

/// Area unit stripped from area text ("85 m²")
pub const DEFAULT_AREA_UNIT: &str = "m²";

/// Room count used when the source cell is empty
pub const DEFAULT_ROOM_COUNT: i64 = 0;

// =============================================================================
// Paths and Export
// =============================================================================

pub const DEFAULT_SOURCE_PATH: &str = "house_listings.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "export";
pub const EXPORT_FILE_NAME: &str = "house_listings.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv";

// =============================================================================
// Rendering
// =============================================================================

/// Width in characters of the longest bar in a chart
pub const DEFAULT_CHART_WIDTH: usize = 50;

pub const MIN_CHART_WIDTH: usize = 10;
pub const MAX_CHART_WIDTH: usize = 200;
