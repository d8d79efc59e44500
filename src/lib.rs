//! House Listings Dashboard Library
//!
//! Loads a CSV of real-estate listings, turns its text-encoded fields into
//! typed columns and aggregates them for terminal charts.
//!
//! This library provides tools for:
//! - Parsing price, area, price-per-m² and room-count text into numbers
//! - Deriving a district from free-text addresses on demand
//! - Caching the normalized table per source file version
//! - Grouped averages by category, room count and district
//! - Re-exporting the normalized table as CSV
//!
//! Price, area and room count are required: one bad row fails the load.
//! Price per m² and district are best effort and become nulls.

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod normalizer;
pub mod views;

// Re-export commonly used types
pub use cache::{Fingerprint, ListingCache};
pub use config::{DashboardConfig, ParseConfig};
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use loader::load_listings;
pub use models::{Listings, LoadStats, Page};
pub use normalizer::{ListingNormalizer, with_districts};
