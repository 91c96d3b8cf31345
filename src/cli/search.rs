//! Search command handler
//!
//! Locates the user, searches the category around them and prints the
//! ranked places in the chosen format.

use crate::cli::{ConsoleStatus, PositionArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::map::MapPresenter;
use crate::places::{PlaceFinder, SUGGESTED_CATEGORIES};
use crate::session::Session;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Place category (e.g. restaurant, pharmacy)
    pub category: Option<String>,

    #[command(flatten)]
    pub position: PositionArgs,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List suggested categories
    #[arg(short = 'C', long = "list-categories")]
    pub list_categories: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    // Handle list flags first
    if args.list_categories {
        list_categories();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    // Resolve the formatter before any network traffic
    let format = args.format.unwrap_or(config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let provider = args.position.provider(&config)?;
    let presenter = MapPresenter::from(&config.map);
    let finder = PlaceFinder::from_config(&config)?;

    let mut session = Session::new();
    let mut status = ConsoleStatus::new();

    // The failure text has already been shown
    if session
        .locate(provider.as_ref(), &presenter, &mut status)
        .await
        .is_err()
    {
        std::process::exit(1);
    }

    let category = args.category.unwrap_or_default();
    let outcome = session.search(&finder, &category, &mut status).await?;

    let map = session.map().ok_or(Error::NotLocated)?;
    let output = formatter.format(&outcome, map, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print suggested place categories
fn list_categories() {
    println!("Suggested categories (any OpenStreetMap term works):");
    for category in SUGGESTED_CATEGORIES {
        println!("  {}", category);
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
