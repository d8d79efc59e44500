//! Field parsing utilities for raw listing text
//!
//! Each parser returns `None` when the text cannot be used. Whether that is
//! fatal or becomes a null is decided by the normalizer, not here.

use regex::Regex;
use std::sync::LazyLock;

/// First run of ASCII digits in price-per-m² text
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// Last comma-separated address segment, minus a trailing " X." locality marker
static DISTRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",\s*([^,]+?)(?:\s+\p{L}\.)?$").expect("district pattern is valid")
});

/// Cell contents treated as an empty room count
const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

/// Parse price text such as "120 000 AZN"
///
/// All whitespace (including non-breaking spaces) and the currency marker are
/// removed before parsing. Negative and non-finite values are rejected.
pub fn parse_price(raw: &str, currency_marker: &str) -> Option<f64> {
    let without_marker = strip_token(raw, currency_marker);
    parse_non_negative(&remove_whitespace(&without_marker))
}

/// Parse area text such as "85 m²"
pub fn parse_area(raw: &str, area_unit: &str) -> Option<f64> {
    let without_unit = strip_token(raw, area_unit);
    parse_non_negative(&remove_whitespace(&without_unit))
}

/// Extract the first digit run from price-per-m² text
///
/// "1 500 AZN/m²" yields 1.0: only the leading run is taken.
pub fn extract_price_per_m2(raw: &str) -> Option<f64> {
    DIGIT_RUN
        .find(raw)
        .and_then(|digits| digits.as_str().parse::<f64>().ok())
}

/// Outcome of reading a room-count cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCount {
    /// Cell held a whole, non-negative number
    Parsed(i64),
    /// Cell was empty or a missing-value token
    Missing,
    /// Cell held something that cannot be a room count
    Malformed,
}

/// Read a room-count cell; integral floats ("3.0") are accepted
pub fn parse_room_count(raw: Option<&str>) -> RoomCount {
    let Some(raw) = raw else {
        return RoomCount::Missing;
    };

    let trimmed = raw.trim();
    if is_missing_token(trimmed) {
        return RoomCount::Missing;
    }

    if let Ok(count) = trimmed.parse::<i64>() {
        return if count >= 0 {
            RoomCount::Parsed(count)
        } else {
            RoomCount::Malformed
        };
    }

    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < i64::MAX as f64 =>
        {
            RoomCount::Parsed(value as i64)
        }
        _ => RoomCount::Malformed,
    }
}

/// Derive the district from a free-text address
///
/// "Baku, Narimanov r." yields "Narimanov"; an address without a comma, or
/// with nothing after the last comma, yields `None`.
pub fn extract_district(address: &str) -> Option<&str> {
    DISTRICT
        .captures(address.trim())
        .and_then(|captures| captures.get(1))
        .map(|segment| segment.as_str().trim())
        .filter(|segment| !segment.is_empty())
}

fn strip_token(raw: &str, token: &str) -> String {
    if token.is_empty() {
        raw.to_string()
    } else {
        raw.replace(token, "")
    }
}

fn remove_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_non_negative(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed >= 0.0)
}

fn is_missing_token(value: &str) -> bool {
    let lowered = value.to_lowercase();
    MISSING_TOKENS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1 200 AZN", "AZN"), Some(1200.0));
        assert_eq!(parse_price("120 000 AZN", "AZN"), Some(120_000.0));
        assert_eq!(parse_price("95000", "AZN"), Some(95_000.0));
        assert_eq!(parse_price("1\u{a0}500 AZN", "AZN"), Some(1500.0));
        assert_eq!(parse_price("1200.0", "AZN"), Some(1200.0));
    }

    #[test]
    fn test_parse_price_rejects_non_numeric() {
        assert_eq!(parse_price("Negotiable", "AZN"), None);
        assert_eq!(parse_price("AZN", "AZN"), None);
        assert_eq!(parse_price("", "AZN"), None);
        assert_eq!(parse_price("-500 AZN", "AZN"), None);
        assert_eq!(parse_price("inf", "AZN"), None);
        assert_eq!(parse_price("NaN AZN", "AZN"), None);
    }

    #[test]
    fn test_parse_area() {
        assert_eq!(parse_area("85 m²", "m²"), Some(85.0));
        assert_eq!(parse_area("120.5 m²", "m²"), Some(120.5));
        assert_eq!(parse_area("1 050 m²", "m²"), Some(1050.0));
        assert_eq!(parse_area("85", "m²"), Some(85.0));
        assert_eq!(parse_area("big m²", "m²"), None);
    }

    #[test]
    fn test_extract_price_per_m2() {
        assert_eq!(extract_price_per_m2("1500 AZN/m²"), Some(1500.0));
        assert_eq!(extract_price_per_m2("per m²: 2 100 AZN"), Some(2.0));
        assert_eq!(extract_price_per_m2("N/A"), None);
        assert_eq!(extract_price_per_m2(""), None);
    }

    #[test]
    fn test_extract_price_per_m2_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not treated as numbers
        assert_eq!(extract_price_per_m2("٣٤٥"), None);
    }

    #[test]
    fn test_parse_room_count() {
        assert_eq!(parse_room_count(Some("3")), RoomCount::Parsed(3));
        assert_eq!(parse_room_count(Some(" 2 ")), RoomCount::Parsed(2));
        assert_eq!(parse_room_count(Some("4.0")), RoomCount::Parsed(4));
        assert_eq!(parse_room_count(None), RoomCount::Missing);
        assert_eq!(parse_room_count(Some("")), RoomCount::Missing);
        assert_eq!(parse_room_count(Some("NaN")), RoomCount::Missing);
        assert_eq!(parse_room_count(Some("N/A")), RoomCount::Missing);
    }

    #[test]
    fn test_parse_room_count_malformed() {
        assert_eq!(parse_room_count(Some("three")), RoomCount::Malformed);
        assert_eq!(parse_room_count(Some("2.5")), RoomCount::Malformed);
        assert_eq!(parse_room_count(Some("-1")), RoomCount::Malformed);
        assert_eq!(parse_room_count(Some("inf")), RoomCount::Malformed);
    }

    #[test]
    fn test_extract_district() {
        assert_eq!(extract_district("Baku, Narimanov r."), Some("Narimanov"));
        assert_eq!(extract_district("Baku, Yasamal"), Some("Yasamal"));
        assert_eq!(extract_district("Baku, Nasimi, 28 May m."), Some("28 May"));
        assert_eq!(extract_district("  Baku,   Sabail r.  "), Some("Sabail"));
    }

    #[test]
    fn test_extract_district_keeps_longer_abbreviations() {
        assert_eq!(extract_district("Baku, Khatai ray."), Some("Khatai ray."));
    }

    #[test]
    fn test_extract_district_missing() {
        assert_eq!(extract_district("Narimanov r."), None);
        assert_eq!(extract_district("Baku,"), None);
        assert_eq!(extract_district("Baku,   "), None);
        assert_eq!(extract_district(""), None);
    }
}
