//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod locate;
pub mod search;
pub mod serve;
pub mod status;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::geo::PositionProvider;
use crate::session::{StatusDisplay, StatusLog};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Find nearby places of a given type, ranked by distance
#[derive(Parser)]
#[command(name = "nearby")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Acquire the current position
    Locate(locate::LocateArgs),

    /// Search for nearby places
    Search(search::SearchArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show configuration and server status
    Status(status::StatusArgs),
}

/// Where to take the position from
#[derive(Args, Debug, Default)]
pub struct PositionArgs {
    /// Latitude
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,
}

impl PositionArgs {
    /// Pick the position source
    ///
    /// Explicit coordinates win, then `--here`, then whatever the config
    /// selects. `None` means location is switched off.
    pub fn provider(&self, config: &Config) -> crate::error::Result<Option<PositionProvider>> {
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            let coords = Coordinates::new(lat, lng);
            coords.validate()?;
            return Ok(Some(PositionProvider::fixed(coords)));
        }

        let mut location = config.location.clone();
        if self.here {
            location.provider = "ip".to_string();
            location.allow = true;
        }
        Ok(PositionProvider::from_config(&location))
    }
}

/// Status display that echoes every message to stderr
#[derive(Debug, Default)]
pub struct ConsoleStatus {
    log: StatusLog,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &StatusLog {
        &self.log
    }
}

impl StatusDisplay for ConsoleStatus {
    fn show(&mut self, text: &str) {
        eprintln!("{}", text);
        self.log.show(text);
    }
}

/// Initialize logging with `RUST_LOG`, falling back to `default_level`
pub fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_tracing(default_level);

    match cli.command {
        Commands::Locate(args) => locate::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}
