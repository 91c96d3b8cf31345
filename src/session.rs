//! Per-user session
//!
//! Holds the user's position and map view and runs the chain
//! locate → present → search. Each step runs only after the previous one
//! succeeded.

use crate::constants::messages;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{LocationError, PositionSource};
use crate::map::{MapPresenter, MapView};
use crate::places::{PlaceFinder, PlaceSearchBackend, SearchCategory, SearchOutcome};
use tracing::{debug, warn};

/// Where progress and result text goes
pub trait StatusDisplay: Send {
    /// Replace the displayed text
    fn show(&mut self, text: &str);
}

/// Status display that keeps every message
#[derive(Debug, Default, Clone)]
pub struct StatusLog {
    lines: Vec<String>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Most recent message
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl StatusDisplay for StatusLog {
    fn show(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Text shown once a position has been granted
pub fn granted_message(coords: Coordinates) -> String {
    format!(
        "{}\nLatitude: {:.5}\nLongitude: {:.5}",
        messages::GRANTED,
        coords.lat,
        coords.lng
    )
}

/// Searching progress text
pub fn searching_message(category: &SearchCategory) -> String {
    format!("Searching nearby {}s...", category)
}

/// One user's position, map and searches
#[derive(Debug, Default)]
pub struct Session {
    position: Option<Coordinates>,
    map: Option<MapView>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the user's position and set up the map
    ///
    /// `source` is `None` when the platform has no location capability at
    /// all; that fails before any attempt. On success the position is
    /// stored, the map is created and search becomes available.
    pub async fn locate<S: PositionSource>(
        &mut self,
        source: Option<&S>,
        presenter: &MapPresenter,
        status: &mut dyn StatusDisplay,
    ) -> std::result::Result<Coordinates, LocationError> {
        let Some(source) = source else {
            let err = LocationError::Unsupported;
            status.show(&err.to_string());
            return Err(err);
        };

        status.show(messages::DETECTING);

        match source.current_position().await {
            Ok(location) => {
                let coords = location.coords();
                debug!("Located at ({}, {}): {}", coords.lat, coords.lng, location.display_name);
                status.show(&granted_message(coords));

                self.position = Some(coords);
                self.map = Some(presenter.present(coords));
                Ok(coords)
            }
            Err(err) => {
                warn!("Location acquisition failed: {:?}", err);
                status.show(&err.to_string());
                Err(err)
            }
        }
    }

    /// Search around the stored position and mark results on the map
    ///
    /// An empty category is rejected before any request is made.
    pub async fn search<B: PlaceSearchBackend>(
        &mut self,
        finder: &PlaceFinder<B>,
        category: &str,
        list: &mut dyn StatusDisplay,
    ) -> Result<SearchOutcome> {
        let (Some(origin), Some(map)) = (self.position, self.map.as_mut()) else {
            return Err(Error::NotLocated);
        };

        let category = SearchCategory::parse(category)?;
        list.show(&searching_message(&category));

        match finder.find(category, origin, map).await {
            Ok(outcome) => {
                list.show(&outcome.message());
                Ok(outcome)
            }
            Err(err) => {
                warn!("Place search failed: {}", err);
                list.show(&err.user_message());
                Err(err)
            }
        }
    }

    /// The user's position, once located
    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    /// The map view, once located
    pub fn map(&self) -> Option<&MapView> {
        self.map.as_ref()
    }

    /// Whether the search controls are available
    pub fn search_enabled(&self) -> bool {
        self.map.is_some()
    }
}
