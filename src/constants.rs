//! Centralized constants for the nearby crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim search API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// User-Agent sent to external services (Nominatim requires one)
    pub const USER_AGENT: &str = concat!("nearby/", env!("CARGO_PKG_VERSION"));
}

/// Place search parameters
pub mod search {
    /// Half-width of the search box around the user, in degrees
    pub const BOX_DEGREES: f64 = 0.2;

    /// Number of raw results requested from the search service
    pub const RAW_LIMIT: usize = 50;

    /// Number of ranked results kept
    pub const MAX_RESULTS: usize = 20;
}

/// Map rendering parameters
pub mod map {
    /// Zoom level of the initial map view
    pub const ZOOM: u8 = 14;

    /// Maximum zoom the tile layer allows
    pub const MAX_ZOOM: u8 = 19;

    /// OpenStreetMap tile server template
    pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

    /// Tile attribution (HTML)
    pub const ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

    /// Popup on the user's own marker
    pub const USER_POPUP: &str = "You are here!";

    /// Leaflet release loaded by rendered pages
    pub const LEAFLET_VERSION: &str = "1.9.4";
}

/// User-visible status and error texts
pub mod messages {
    pub const DETECTING: &str = "Detecting your location...";
    pub const GRANTED: &str = "Location Access Granted!";
    pub const SELECT_CATEGORY: &str = "Please select a place type!";
    pub const NO_PLACES: &str = "No nearby places found.";
    pub const FETCH_FAILED: &str = "Error fetching places. Try again later.";
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}
