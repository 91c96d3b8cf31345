//! Map presentation
//!
//! Builds the map view shown once the user's position is known. The view is
//! plain data: a center, a zoom level, a tile layer and markers. Drawing it
//! is left to Leaflet in the browser (see [`page`]).

pub mod page;

use crate::config::MapConfig;
use crate::constants::map::{ATTRIBUTION, MAX_ZOOM, TILE_URL, USER_POPUP, ZOOM};
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// Tile imagery source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders
    pub url_template: String,
    pub max_zoom: u8,
    /// Attribution HTML
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: TILE_URL.to_string(),
            max_zoom: MAX_ZOOM,
            attribution: ATTRIBUTION.to_string(),
        }
    }
}

/// A point marker with popup text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub popup: String,
    /// Popup is shown without a click
    #[serde(default)]
    pub open: bool,
}

/// A map centered on the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    center: Coordinates,
    zoom: u8,
    tiles: TileLayer,
    markers: Vec<Marker>,
}

impl MapView {
    /// Create an empty map view
    pub fn new(center: Coordinates, zoom: u8, tiles: TileLayer) -> Self {
        Self {
            center,
            zoom,
            tiles,
            markers: Vec::new(),
        }
    }

    /// Add a marker with a closed popup
    pub fn add_marker(&mut self, coords: Coordinates, popup: &str) {
        self.markers.push(Marker {
            lat: coords.lat,
            lng: coords.lng,
            popup: popup.to_string(),
            open: false,
        });
    }

    /// Add a marker whose popup starts open
    pub fn add_open_marker(&mut self, coords: Coordinates, popup: &str) {
        self.markers.push(Marker {
            lat: coords.lat,
            lng: coords.lng,
            popup: popup.to_string(),
            open: true,
        });
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tiles(&self) -> &TileLayer {
        &self.tiles
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

/// Creates map views with fixed zoom and tiles
#[derive(Debug, Clone)]
pub struct MapPresenter {
    zoom: u8,
    tiles: TileLayer,
}

impl MapPresenter {
    pub fn new(zoom: u8, tiles: TileLayer) -> Self {
        Self { zoom, tiles }
    }

    /// Map centered on `center` with an open "You are here!" marker
    pub fn present(&self, center: Coordinates) -> MapView {
        let mut view = MapView::new(center, self.zoom, self.tiles.clone());
        view.add_open_marker(center, USER_POPUP);
        view
    }
}

impl Default for MapPresenter {
    fn default() -> Self {
        Self::new(ZOOM, TileLayer::default())
    }
}

impl From<&MapConfig> for MapPresenter {
    fn from(config: &MapConfig) -> Self {
        Self::new(
            config.zoom,
            TileLayer {
                url_template: config.tile_url.clone(),
                max_zoom: config.max_zoom,
                attribution: config.attribution.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        let center = Coordinates::new(40.7128, -74.0060);
        let view = MapPresenter::default().present(center);

        assert_eq!(view.center(), center);
        assert_eq!(view.zoom(), 14);
        assert_eq!(view.markers().len(), 1);

        let marker = &view.markers()[0];
        assert_eq!(marker.popup, "You are here!");
        assert!(marker.open);
        assert_eq!((marker.lat, marker.lng), (center.lat, center.lng));
    }

    #[test]
    fn test_presenter_from_config() {
        let mut config = MapConfig::default();
        config.zoom = 12;
        config.tile_url = "https://tiles.example/{z}/{x}/{y}.png".to_string();

        let view = MapPresenter::from(&config).present(Coordinates::new(0.0, 0.0));
        assert_eq!(view.zoom(), 12);
        assert_eq!(view.tiles().url_template, "https://tiles.example/{z}/{x}/{y}.png");
        assert_eq!(view.tiles().max_zoom, 19);
    }

    #[test]
    fn test_markers_accumulate() {
        let mut view = MapPresenter::default().present(Coordinates::new(0.0, 0.0));
        view.add_marker(Coordinates::new(0.1, 0.1), "A");
        view.add_marker(Coordinates::new(0.2, 0.2), "B");

        assert_eq!(view.markers().len(), 3);
        assert!(!view.markers()[2].open);
    }
}
