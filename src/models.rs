//! Core data structures for the listings dashboard.
//!
//! Defines the normalized listings snapshot, load statistics, the dashboard
//! pages and the typed rows produced by each view.

use crate::error::{DashboardError, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Counts collected while normalizing one load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub rows: usize,
    /// Rows whose price-per-m² text held no digits
    pub missing_price_per_m2: usize,
    /// Rows whose room count was empty and defaulted to zero
    pub defaulted_room_counts: usize,
    pub elapsed_ms: u128,
}

/// Normalized listings table
///
/// `price`, `area_m2`, `price_1m2` and `room_number` are typed; every other
/// source column is carried through as text. The frame is never mutated once
/// built: derived views work on copies.
#[derive(Debug, Clone)]
pub struct Listings {
    frame: DataFrame,
    stats: LoadStats,
}

impl Listings {
    pub fn new(frame: DataFrame, stats: LoadStats) -> Self {
        Self { frame, stats }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Descriptives,
    Sales,
    Profit,
}

impl Page {
    pub fn all() -> [Page; 3] {
        [Page::Descriptives, Page::Sales, Page::Profit]
    }

    /// Heading shown above the page charts
    pub fn title(&self) -> &'static str {
        match self {
            Page::Descriptives => "Overview by building type",
            Page::Sales => "Price per m² by room count",
            Page::Profit => "Average price by district",
        }
    }

    /// One-based position in the navigation menu
    pub fn menu_index(&self) -> usize {
        match self {
            Page::Descriptives => 1,
            Page::Sales => 2,
            Page::Profit => 3,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Descriptives => "Descriptives",
            Page::Sales => "Sales",
            Page::Profit => "Profit",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    /// Accepts the page name in any case or its menu number
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "descriptives" => Ok(Page::Descriptives),
            "2" | "sales" => Ok(Page::Sales),
            "3" | "profit" => Ok(Page::Profit),
            _ => Err(DashboardError::UnknownPage {
                name: s.trim().to_string(),
            }),
        }
    }
}

/// Average price and listing count for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub average_price: f64,
    pub listings: i64,
}

/// Average price per m² for one room count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPriceSummary {
    pub room_number: i64,
    pub average_price_per_m2: f64,
}

/// Average price for one district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictSummary {
    pub district: String,
    pub average_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_name_and_number() {
        assert_eq!("Descriptives".parse::<Page>().unwrap(), Page::Descriptives);
        assert_eq!(" sales ".parse::<Page>().unwrap(), Page::Sales);
        assert_eq!("3".parse::<Page>().unwrap(), Page::Profit);
    }

    #[test]
    fn test_unknown_page() {
        match "charts".parse::<Page>() {
            Err(DashboardError::UnknownPage { name }) => assert_eq!(name, "charts"),
            other => panic!("Expected UnknownPage error, got {:?}", other),
        }
    }

    #[test]
    fn test_menu_index_matches_parse() {
        for page in Page::all() {
            let parsed: Page = page.menu_index().to_string().parse().unwrap();
            assert_eq!(parsed, page);
        }
    }
}
