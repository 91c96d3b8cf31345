//! Nearby place search
//!
//! Queries a place search service inside a box around the user, ranks the
//! results by great-circle distance and drops a marker for each one on the
//! map view.

pub mod nominatim;

use crate::config::{Config, SearchConfig};
use crate::constants::messages;
use crate::coord::distance::haversine_km;
use crate::coord::{BoundingBox, Coordinates};
use crate::error::{Error, Result};
use crate::map::MapView;
use nominatim::NominatimBackend;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// Suggested place categories for UIs
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "restaurant",
    "cafe",
    "hospital",
    "pharmacy",
    "school",
    "bank",
    "atm",
    "hotel",
    "supermarket",
    "fuel",
    "park",
    "police",
];

/// A user-chosen place type
///
/// Any non-blank string is accepted; the suggested list is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchCategory(String);

impl SearchCategory {
    /// Parse a category, rejecting empty selections
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::EmptyCategory);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bounded search request
#[derive(Debug, Clone)]
pub struct PlaceQuery {
    pub category: SearchCategory,
    pub viewbox: BoundingBox,
    pub limit: usize,
}

impl PlaceQuery {
    pub fn new(category: SearchCategory, viewbox: BoundingBox, limit: usize) -> Self {
        Self {
            category,
            viewbox,
            limit,
        }
    }

    /// Encode as search service query parameters
    pub fn to_query_string(&self) -> String {
        format!(
            "format=json&q={}&addressdetails=1&limit={}&bounded=1&viewbox={}",
            urlencoding::encode(self.category.as_str()),
            self.limit,
            self.viewbox.to_viewbox()
        )
    }
}

/// A place record as returned by the search service
///
/// Coordinates arrive as numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

/// A ranked search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Full name from the search service
    pub display_name: String,
    /// Short name shown in lists and popups
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    /// Great-circle distance from the user
    pub distance_km: f64,
    /// Link to an external map application
    pub map_url: String,
}

impl PlaceResult {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Distance rounded for display, e.g. "1.24 km"
    pub fn distance_text(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }
}

/// Result of one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Unique ID for this search
    pub id: String,
    pub category: SearchCategory,
    /// The user's position the distances are measured from
    pub origin: Coordinates,
    /// Number of records the service returned before ranking
    pub raw_count: usize,
    /// Nearest places, closest first
    pub places: Vec<PlaceResult>,
    /// When the search ran (RFC 3339)
    pub timestamp: String,
}

impl SearchOutcome {
    /// Heading for the result list, or the empty-result text
    pub fn message(&self) -> String {
        if self.places.is_empty() {
            messages::NO_PLACES.to_string()
        } else {
            format!("Nearby {}s:", self.category)
        }
    }
}

/// Tunables for the search
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub box_degrees: f64,
    pub raw_limit: usize,
    pub max_results: usize,
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            box_degrees: config.box_degrees,
            raw_limit: config.raw_limit,
            max_results: config.max_results,
        }
    }
}

/// Trait for place search backends
pub trait PlaceSearchBackend: Send + Sync {
    /// Run a bounded search, returning records in service order
    fn search(&self, query: &PlaceQuery) -> impl Future<Output = Result<Vec<RawPlace>>> + Send;
}

/// Finds and ranks places around a position
#[derive(Debug, Clone)]
pub struct PlaceFinder<B> {
    backend: B,
    settings: SearchSettings,
    link_template: String,
}

impl PlaceFinder<NominatimBackend> {
    /// Build a Nominatim-backed finder from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = NominatimBackend::with_base_url(&config.search.endpoint)?;
        Ok(Self::new(
            backend,
            SearchSettings::from(&config.search),
            config.link_template(None)?,
        ))
    }
}

impl<B: PlaceSearchBackend> PlaceFinder<B> {
    /// Create a finder
    ///
    /// `link_template` is an external map URL with `{lat}`/`{lng}` placeholders.
    pub fn new(backend: B, settings: SearchSettings, link_template: impl Into<String>) -> Self {
        Self {
            backend,
            settings,
            link_template: link_template.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Search around `origin` and add a marker per ranked result to `map`
    pub async fn find(
        &self,
        category: SearchCategory,
        origin: Coordinates,
        map: &mut MapView,
    ) -> Result<SearchOutcome> {
        let query = PlaceQuery::new(
            category.clone(),
            origin.bounding_box(self.settings.box_degrees),
            self.settings.raw_limit,
        );

        let raw = self.backend.search(&query).await?;
        let raw_count = raw.len();
        debug!("Search for '{}' returned {} raw results", category, raw_count);

        let places = rank_places(origin, raw, self.settings.max_results, &self.link_template)?;

        for place in &places {
            map.add_marker(place.coords(), &place.label);
        }

        Ok(SearchOutcome {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            origin,
            raw_count,
            places,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Compute distances, sort ascending and keep the `max` nearest
///
/// The sort is stable, so ties keep service order.
pub fn rank_places(
    origin: Coordinates,
    raw: Vec<RawPlace>,
    max: usize,
    link_template: &str,
) -> Result<Vec<PlaceResult>> {
    let mut places = raw
        .into_iter()
        .map(|place| {
            let coords = parse_coords(&place)?;
            Ok(PlaceResult {
                label: label_of(&place.display_name).to_string(),
                lat: coords.lat,
                lng: coords.lng,
                distance_km: haversine_km(origin, coords),
                map_url: fill_template(link_template, coords),
                display_name: place.display_name,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    places.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    places.truncate(max);

    Ok(places)
}

/// First comma-separated segment of a full place name
pub fn label_of(display_name: &str) -> &str {
    display_name.split(',').next().unwrap_or(display_name)
}

/// Substitute `{lat}` and `{lng}` in a URL template
pub fn fill_template(template: &str, coords: Coordinates) -> String {
    template
        .replace("{lat}", &coords.lat.to_string())
        .replace("{lng}", &coords.lng.to_string())
}

fn parse_coords(place: &RawPlace) -> Result<Coordinates> {
    let lat = parse_degrees(&place.lat).ok_or_else(|| {
        Error::Search(format!("Invalid latitude for '{}': {}", place.display_name, place.lat))
    })?;
    let lng = parse_degrees(&place.lon).ok_or_else(|| {
        Error::Search(format!("Invalid longitude for '{}': {}", place.display_name, place.lon))
    })?;
    Ok(Coordinates::new(lat, lng))
}

/// A finite decimal degree value; "NaN" and "inf" are rejected
fn parse_degrees(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
