use anyhow::Context;
use clap::Parser;
use house_dashboard::DashboardError;
use house_dashboard::cli::{Args, Command, commands, setup_logging};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    setup_logging(&args);

    match run(args, command) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Fatal load errors end here: nothing has been rendered
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: Args, command: Command) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(async {
        tokio::select! {
            result = commands::run(args, command) => {
                result.context("Dashboard failed")
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(DashboardError::Interrupted {
                    reason: "interrupted by user".to_string(),
                }
                .into())
            }
        }
    })
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("House Listings Dashboard");
    println!("========================");
    println!();
    println!("Clean a CSV of real-estate listings and chart it in the terminal.");
    println!();
    println!("USAGE:");
    println!("    house-dashboard <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    descriptives  Average price and listing count by building type");
    println!("    sales         Average price per m² by room count");
    println!("    profit        Average price by district");
    println!("    export        Save the normalized dataset as house_listings.csv");
    println!("    browse        Navigate between pages interactively");
    println!();
    println!("OPTIONS:");
    println!("    -i, --input <FILE>       Listings CSV (default: house_listings.csv)");
    println!("    -o, --output-dir <DIR>   Download directory (default: export)");
    println!("        --chart-width <N>    Width of the longest chart bar");
    println!("    -v, --verbose            Debug logging");
    println!("    -q, --quiet              Only log errors");
    println!();
    println!("EXAMPLES:");
    println!("    house-dashboard descriptives");
    println!("    house-dashboard profit --input data/house_listings.csv");
    println!("    house-dashboard export --output-dir downloads");
    println!("    house-dashboard browse");
}
