//! Command implementations for the listings dashboard

use crate::cli::{Args, Command};
use crate::dashboard::Dashboard;
use crate::error::Result;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

/// Run the selected command
///
/// The listings are loaded before anything is printed, so a fatal load
/// error leaves the terminal without a partial page.
pub async fn run(args: Args, command: Command) -> Result<()> {
    let config = args.to_config()?;
    let dashboard = Dashboard::new(config)?;

    preload(&dashboard).await?;

    if let Some(page) = command.page() {
        let page_text = dashboard.render(page).await?;
        println!("{}", page_text);
        return Ok(());
    }

    match command {
        Command::Export => {
            let path = dashboard.export().await?;
            println!(
                "{} {}",
                "Dataset saved to".bright_green(),
                path.display().to_string().bright_white().bold()
            );
        }
        Command::Browse => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            dashboard.browse(stdin, &mut stdout).await?;
            info!("Dashboard closed");
        }
        Command::Descriptives | Command::Sales | Command::Profit => {}
    }

    Ok(())
}

/// First load behind a spinner
async fn preload(dashboard: &Dashboard) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }
    spinner.set_message(format!(
        "Loading {}",
        dashboard.config().source_path.display()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = dashboard.listings().await;
    spinner.finish_and_clear();

    let listings = result?;
    info!(
        "{} listings ready ({} without price per m², {} room counts defaulted)",
        listings.stats().rows,
        listings.stats().missing_price_per_m2,
        listings.stats().defaulted_room_counts
    );
    Ok(())
}
