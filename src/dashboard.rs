//! Interactive dashboard.
//!
//! Ties the cache, the views and the export together. Every page request
//! goes through the cache, so navigating back and forth never reparses an
//! unchanged file.

use crate::cache::ListingCache;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::export::write_export;
use crate::models::{Listings, Page};
use crate::views::render_page;

use colored::*;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// One navigation input from the interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show(Page),
    Download,
    Reload,
    Quit,
}

impl Action {
    /// Parse a prompt line; unknown input is reported as an unknown page
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "d" | "download" => Ok(Action::Download),
            "r" | "reload" => Ok(Action::Reload),
            "q" | "quit" | "exit" => Ok(Action::Quit),
            other => other.parse::<Page>().map(Action::Show),
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    cache: ListingCache,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let cache = ListingCache::new(config.source_path.clone(), config.parse.clone());
        Ok(Self { config, cache })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn cache(&self) -> &ListingCache {
        &self.cache
    }

    /// Current normalized listings
    pub async fn listings(&self) -> Result<Arc<Listings>> {
        self.cache.snapshot().await
    }

    /// Render one page as terminal text
    pub async fn render(&self, page: Page) -> Result<String> {
        let listings = self.listings().await?;
        render_page(page, &listings, self.config.chart_width)
    }

    /// Write the CSV download and return its path
    pub async fn export(&self) -> Result<PathBuf> {
        let listings = self.listings().await?;
        write_export(&listings, &self.config).await
    }

    /// Navigation loop reading one action per line until quit or end of input
    ///
    /// Load failures end the loop with the error; unknown input only prints
    /// a hint.
    pub async fn browse<R, W>(&self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        // Fail before showing a menu if the source cannot be loaded
        let listings = self.listings().await?;
        writeln!(
            output,
            "{} {}",
            "Loaded".bright_green(),
            format!("{} listings", listings.height()).bright_white().bold()
        )?;

        let mut lines = input.lines();
        loop {
            write_menu(output)?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                debug!("Input closed, leaving dashboard");
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            match Action::parse(&line) {
                Ok(Action::Show(page)) => {
                    let page_text = self.render(page).await?;
                    writeln!(output, "\n{}", page_text)?;
                }
                Ok(Action::Download) => {
                    let path = self.export().await?;
                    writeln!(
                        output,
                        "{} {}",
                        "Dataset saved to".bright_green(),
                        path.display()
                    )?;
                }
                Ok(Action::Reload) => {
                    self.cache.invalidate().await;
                    let listings = self.listings().await?;
                    writeln!(
                        output,
                        "{} {} listings",
                        "Reloaded".bright_green(),
                        listings.height()
                    )?;
                }
                Ok(Action::Quit) => break,
                Err(e @ DashboardError::UnknownPage { .. }) => {
                    warn!("Unrecognised navigation input: {}", line.trim());
                    writeln!(output, "{}", e.to_string().bright_red())?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

fn write_menu<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "\n{}", "Navigation".bright_green().bold())?;
    for page in Page::all() {
        writeln!(
            output,
            "  {}. {}",
            page.menu_index().to_string().bright_yellow().bold(),
            page.to_string().bright_cyan()
        )?;
    }
    writeln!(
        output,
        "  {}. {}",
        "d".bright_yellow().bold(),
        "Download dataset (CSV)".bright_cyan()
    )?;
    writeln!(output, "  {}. {}", "r".bright_yellow().bold(), "Reload".bright_cyan())?;
    writeln!(output, "  {}. {}", "q".bright_yellow().bold(), "Quit".bright_cyan())?;
    write!(output, "{}", "Go to: ".bright_white())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
price,area,price_1m2,room_number,address,category
120 000 AZN,85 m²,1411 AZN/m²,3,\"Baku, Narimanov r.\",Yeni tikili
95 000 AZN,60 m²,N/A,,\"Baku, Yasamal\",Köhnə tikili
60 000 AZN,45 m²,1333,2,Sumqayit,Köhnə tikili
";

    fn dashboard_with(csv: &str, temp_dir: &TempDir) -> Dashboard {
        let source = temp_dir.path().join("house_listings.csv");
        fs::write(&source, csv).unwrap();
        let config = DashboardConfig::default()
            .with_source_path(source)
            .with_output_dir(temp_dir.path().join("export"));
        Dashboard::new(config).unwrap()
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("2").unwrap(), Action::Show(Page::Sales));
        assert_eq!(Action::parse("Profit").unwrap(), Action::Show(Page::Profit));
        assert_eq!(Action::parse("d").unwrap(), Action::Download);
        assert_eq!(Action::parse("R").unwrap(), Action::Reload);
        assert_eq!(Action::parse("quit").unwrap(), Action::Quit);
        assert!(Action::parse("7").is_err());
    }

    #[tokio::test]
    async fn test_navigation_parses_once() {
        let temp_dir = TempDir::new().unwrap();
        let dashboard = dashboard_with(SAMPLE_CSV, &temp_dir);

        let input: &[u8] = b"1\n2\n3\n1\nq\n";
        let mut output = Vec::new();
        dashboard.browse(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Overview by building type"));
        assert!(text.contains("Price per m² by room count"));
        assert!(text.contains("Narimanov"));
        assert_eq!(dashboard.cache().load_count(), 1);
    }

    #[tokio::test]
    async fn test_download_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let dashboard = dashboard_with(SAMPLE_CSV, &temp_dir);

        let input: &[u8] = b"d\nr\n";
        let mut output = Vec::new();
        dashboard.browse(input, &mut output).await.unwrap();

        assert!(temp_dir.path().join("export").join("house_listings.csv").exists());
        assert_eq!(dashboard.cache().load_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_input_keeps_running() {
        let temp_dir = TempDir::new().unwrap();
        let dashboard = dashboard_with(SAMPLE_CSV, &temp_dir);

        let input: &[u8] = b"charts\n3\n";
        let mut output = Vec::new();
        dashboard.browse(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unknown page 'charts'"));
        assert!(text.contains("Average sale price by district"));
    }

    #[tokio::test]
    async fn test_malformed_source_renders_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let broken = SAMPLE_CSV.replace("95 000 AZN", "Negotiable");
        let dashboard = dashboard_with(&broken, &temp_dir);

        let input: &[u8] = b"1\n";
        let mut output = Vec::new();
        let error = dashboard.browse(input, &mut output).await.unwrap_err();

        assert!(matches!(error, DashboardError::MalformedPrice { row: 1, .. }));
        assert!(output.is_empty());
    }
}
