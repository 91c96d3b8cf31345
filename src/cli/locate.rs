//! Locate command handler
//!
//! Acquires the current position and optionally writes the map page.

use crate::cli::{ConsoleStatus, PositionArgs};
use crate::config::Config;
use crate::error::Result;
use crate::map::page::Page;
use crate::map::MapPresenter;
use crate::places::SUGGESTED_CATEGORIES;
use crate::session::Session;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Write the map page to a file
    #[arg(long, short = 'm')]
    pub map: Option<String>,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    let config = Config::load()?;
    let provider = args.position.provider(&config)?;
    let presenter = MapPresenter::from(&config.map);

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

    if let Some(path) = args.map {
        let html = Page {
            status: status.log().lines(),
            map: session.map(),
            categories: SUGGESTED_CATEGORIES,
            ..Default::default()
        }
        .render();
        std::fs::write(&path, html)?;
        eprintln!("Map written to {}", path);
    }

    if let Some(position) = session.position() {
        println!("{:.5},{:.5}", position.lat, position.lng);
    }

    Ok(())
}
