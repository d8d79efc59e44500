//! Tests for the listing normalizer
//!
//! Shared fixtures live here; the behaviour tests are split by concern.


use polars::prelude::*;

/// Raw all-text table shaped like a listings export
pub fn raw_listings() -> DataFrame {
    df!(
        "price" => ["120 000 AZN", "1 200 AZN", "85 000 AZN", "240 000 AZN"],
        "area" => ["85 m²", "40 m²", "62.5 m²", "150 m²"],
        "price_1m2" => [Some("1 411 AZN/m²"), Some("30 AZN/m²"), Some("N/A"), None],
        "room_number" => [Some("3"), None, Some("2"), Some("5.0")],
        "address" => [
            "Baku, Narimanov r.",
            "Baku, Yasamal",
            "Sumqayit",
            "Baku, Nasimi, 28 May m.",
        ],
        "category" => ["Yeni tikili", "Köhnə tikili", "Yeni tikili", "Həyət evi"]
    )
    .unwrap()
}
