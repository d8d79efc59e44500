//! Dashboard views
//!
//! Each page groups the normalized listings by one key and averages one
//! value. Nulls in the averaged column are ignored by the mean; rows without
//! a grouping key never reach a chart.

pub mod chart;

use self::chart::{Bar, BarChart};

use crate::constants::{
    CATEGORY_COLUMN, COUNT_COLUMN, DISTRICT_COLUMN, PRICE_COLUMN, PRICE_PER_M2_COLUMN,
    ROOM_NUMBER_COLUMN,
};
use crate::error::Result;
use crate::models::{CategorySummary, DistrictSummary, Listings, Page, RoomPriceSummary};
use crate::normalizer::with_districts;

use colored::*;
use polars::prelude::*;
use tracing::debug;

/// Average price and listing count per category, sorted by category
pub fn category_summary(frame: &DataFrame) -> Result<Vec<CategorySummary>> {
    let summary = frame
        .clone()
        .lazy()
        .filter(col(CATEGORY_COLUMN).is_not_null())
        .group_by([col(CATEGORY_COLUMN)])
        .agg([
            sorted_mean(PRICE_COLUMN).alias(PRICE_COLUMN),
            len().cast(DataType::Int64).alias(COUNT_COLUMN),
        ])
        .sort_by_exprs([col(CATEGORY_COLUMN)], SortMultipleOptions::default())
        .collect()?;

    let categories = series(&summary, CATEGORY_COLUMN)?.str()?;
    let prices = series(&summary, PRICE_COLUMN)?.f64()?;
    let counts = series(&summary, COUNT_COLUMN)?.i64()?;

    let rows: Vec<CategorySummary> = categories
        .into_iter()
        .zip(prices)
        .zip(counts)
        .filter_map(|((category, price), count)| {
            Some(CategorySummary {
                category: category?.to_string(),
                average_price: price?,
                listings: count?,
            })
        })
        .collect();

    debug!("Category summary: {} groups", rows.len());
    Ok(rows)
}

/// Mean price per m² per room count, sorted by room count
///
/// Room counts with no usable price per m² are left out.
pub fn room_price_summary(frame: &DataFrame) -> Result<Vec<RoomPriceSummary>> {
    let summary = frame
        .clone()
        .lazy()
        .group_by([col(ROOM_NUMBER_COLUMN)])
        .agg([sorted_mean(PRICE_PER_M2_COLUMN).alias(PRICE_PER_M2_COLUMN)])
        .filter(col(PRICE_PER_M2_COLUMN).is_not_null())
        .sort_by_exprs([col(ROOM_NUMBER_COLUMN)], SortMultipleOptions::default())
        .collect()?;

    let rooms = series(&summary, ROOM_NUMBER_COLUMN)?.i64()?;
    let prices = series(&summary, PRICE_PER_M2_COLUMN)?.f64()?;

    let rows: Vec<RoomPriceSummary> = rooms
        .into_iter()
        .zip(prices)
        .filter_map(|(room_number, price)| {
            Some(RoomPriceSummary {
                room_number: room_number?,
                average_price_per_m2: price?,
            })
        })
        .collect();

    debug!("Room price summary: {} groups", rows.len());
    Ok(rows)
}

/// Mean price per district, highest first
///
/// Districts are derived on a copy of the frame; rows without one are dropped.
pub fn district_summary(frame: &DataFrame) -> Result<Vec<DistrictSummary>> {
    let summary = with_districts(frame)?
        .lazy()
        .filter(col(DISTRICT_COLUMN).is_not_null())
        .group_by([col(DISTRICT_COLUMN)])
        .agg([sorted_mean(PRICE_COLUMN).alias(PRICE_COLUMN)])
        .sort_by_exprs(
            [col(PRICE_COLUMN), col(DISTRICT_COLUMN)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let districts = series(&summary, DISTRICT_COLUMN)?.str()?;
    let prices = series(&summary, PRICE_COLUMN)?.f64()?;

    let rows: Vec<DistrictSummary> = districts
        .into_iter()
        .zip(prices)
        .filter_map(|(district, price)| {
            Some(DistrictSummary {
                district: district?.to_string(),
                average_price: price?,
            })
        })
        .collect();

    debug!("District summary: {} groups", rows.len());
    Ok(rows)
}

/// Charts shown on `page`
pub fn page_charts(page: Page, listings: &Listings) -> Result<Vec<BarChart>> {
    let frame = listings.frame();

    let charts = match page {
        Page::Descriptives => {
            let summary = category_summary(frame)?;
            vec![
                BarChart::new(
                    "Average price",
                    "category",
                    "price",
                    summary
                        .iter()
                        .map(|row| Bar::new(row.category.clone(), row.average_price))
                        .collect(),
                ),
                BarChart::new(
                    "Listing count",
                    "category",
                    "count",
                    summary
                        .iter()
                        .map(|row| Bar::new(row.category.clone(), row.listings as f64))
                        .collect(),
                ),
            ]
        }
        Page::Sales => vec![BarChart::new(
            "Average price per m² by room count",
            "Rooms",
            "Price per m²",
            room_price_summary(frame)?
                .iter()
                .map(|row| Bar::new(row.room_number.to_string(), row.average_price_per_m2))
                .collect(),
        )],
        Page::Profit => vec![BarChart::new(
            "Average sale price by district",
            "District",
            "Average price (AZN)",
            district_summary(frame)?
                .into_iter()
                .map(|row| Bar::new(row.district, row.average_price))
                .collect(),
        )],
    };

    Ok(charts)
}

/// Full page text: heading followed by every chart
pub fn render_page(page: Page, listings: &Listings, width: usize) -> Result<String> {
    let charts = page_charts(page, listings)?;

    let mut out = format!(
        "{}\n{}\n\n",
        page.title().bright_green().bold(),
        format!("{} listings", listings.height()).bright_black()
    );
    for chart in charts {
        out.push_str(&chart.render(width));
        out.push('\n');
    }
    Ok(out)
}

/// Mean of `name` summed in ascending order, so row order cannot change it
fn sorted_mean(name: &str) -> Expr {
    col(name).sort(SortOptions::default()).mean()
}

fn series<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Series> {
    Ok(frame.column(name)?.as_materialized_series())
}
