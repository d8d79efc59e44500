//! CSV download of the normalized listings.
//!
//! Numeric columns are written in canonical decimal form, so the export is
//! not byte-identical to the source but reloads to the same values.

use crate::config::DashboardConfig;
use crate::constants::EXPORT_MIME_TYPE;
use crate::error::Result;
use crate::models::Listings;

use polars::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Downloadable file: name, content type and UTF-8 CSV bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serialize the listings as CSV with a header row
pub fn export_csv(listings: &Listings, file_name: &str) -> Result<ExportFile> {
    let mut frame = listings.frame().clone();
    let mut bytes = Vec::new();

    CsvWriter::new(&mut bytes)
        .include_header(true)
        .finish(&mut frame)?;

    Ok(ExportFile {
        file_name: file_name.to_string(),
        mime_type: EXPORT_MIME_TYPE,
        bytes,
    })
}

/// Write the export into the configured output directory
pub async fn write_export(listings: &Listings, config: &DashboardConfig) -> Result<PathBuf> {
    let export = export_csv(listings, &config.export_file_name)?;

    tokio::fs::create_dir_all(&config.output_dir).await?;
    let path = config.export_path();
    tokio::fs::write(&path, &export.bytes).await?;

    info!(
        "Exported {} listings to {} ({} bytes, {})",
        listings.height(),
        path.display(),
        export.bytes.len(),
        export.mime_type
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use crate::loader::parse_raw_listings;
    use crate::normalizer::ListingNormalizer;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
price,area,price_1m2,room_number,address,category
120 000 AZN,85 m²,1411 AZN/m²,3,\"Baku, Narimanov r.\",Yeni tikili
1 200 AZN,40.5 m²,N/A,,\"Baku, Yasamal\",Köhnə tikili
";

    fn sample_listings() -> Listings {
        let raw = parse_raw_listings(SAMPLE_CSV.as_bytes().to_vec()).unwrap();
        let (frame, stats) = ListingNormalizer::new(ParseConfig::default())
            .normalize(raw)
            .unwrap();
        Listings::new(frame, stats)
    }

    fn f64_values(listings: &Listings, column: &str) -> Vec<Option<f64>> {
        listings
            .frame()
            .column(column)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn i64_values(listings: &Listings, column: &str) -> Vec<Option<i64>> {
        listings
            .frame()
            .column(column)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_export_metadata() {
        let export = export_csv(&sample_listings(), "house_listings.csv").unwrap();

        assert_eq!(export.file_name, "house_listings.csv");
        assert_eq!(export.mime_type, "text/csv");

        let text = String::from_utf8(export.bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.contains("price"));
        assert!(header.contains("area_m2"));
        assert!(text.contains("Köhnə tikili"));
    }

    #[test]
    fn test_export_reloads_to_same_values() {
        let original = sample_listings();
        let export = export_csv(&original, "house_listings.csv").unwrap();

        let raw = parse_raw_listings(export.bytes).unwrap();
        let (frame, stats) = ListingNormalizer::new(ParseConfig::default())
            .normalize(raw)
            .unwrap();
        let reloaded = Listings::new(frame, stats);

        assert_eq!(reloaded.height(), original.height());
        assert_eq!(f64_values(&reloaded, "price"), f64_values(&original, "price"));
        assert_eq!(
            f64_values(&reloaded, "area_m2"),
            f64_values(&original, "area_m2")
        );
        assert_eq!(
            f64_values(&reloaded, "price_1m2"),
            f64_values(&original, "price_1m2")
        );
        assert_eq!(
            i64_values(&reloaded, "room_number"),
            i64_values(&original, "room_number")
        );
        assert_eq!(i64_values(&original, "room_number"), vec![Some(3), Some(0)]);
    }

    #[tokio::test]
    async fn test_write_export_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = DashboardConfig::default().with_output_dir(temp_dir.path().join("downloads"));

        let path = write_export(&sample_listings(), &config).await.unwrap();

        assert_eq!(path, temp_dir.path().join("downloads").join("house_listings.csv"));
        assert_eq!(path, config.export_path());
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("price,"));
    }
}
