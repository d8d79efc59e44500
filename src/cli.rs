//! Command-line interface components.

pub mod commands;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::Page;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "house-dashboard")]
#[command(about = "Chart real-estate listings from a CSV export in the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Listings CSV file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory for the downloaded CSV
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Width of the longest chart bar
    #[arg(long, global = true)]
    pub chart_width: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Average price and listing count by building type
    Descriptives,
    /// Average price per m² by room count
    Sales,
    /// Average price by district
    Profit,
    /// Save the normalized dataset as CSV
    Export,
    /// Navigate between pages interactively
    Browse,
}

impl Command {
    /// Page rendered by this command, if it renders one
    pub fn page(&self) -> Option<Page> {
        match self {
            Command::Descriptives => Some(Page::Descriptives),
            Command::Sales => Some(Page::Sales),
            Command::Profit => Some(Page::Profit),
            Command::Export | Command::Browse => None,
        }
    }
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Defaults with CLI overrides applied, validated
    pub fn to_config(&self) -> Result<DashboardConfig> {
        let mut config = DashboardConfig::default();

        if let Some(input) = &self.input {
            config.source_path = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(width) = self.chart_width {
            config.chart_width = width;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("house_dashboard={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
