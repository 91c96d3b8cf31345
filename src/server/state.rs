//! Server shared state
//!
//! Holds configuration and shared resources for the HTTP server.

use crate::config::Config;
use crate::error::Result;
use crate::map::MapPresenter;
use crate::places::nominatim::NominatimBackend;
use crate::places::PlaceFinder;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Place search against the configured endpoint
    pub finder: PlaceFinder<NominatimBackend>,

    /// Map setup for every session
    pub presenter: MapPresenter,

    started: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self> {
        let finder = PlaceFinder::from_config(&config)?;
        let presenter = MapPresenter::from(&config.map);

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            finder,
            presenter,
            started: Instant::now(),
        })
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
