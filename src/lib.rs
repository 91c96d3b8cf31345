//! nearby: find places of a given type around you
//!
//! A library and CLI tool that acquires the user's position, centers a map
//! on it and searches OpenStreetMap (Nominatim) for nearby places of a
//! chosen category, ranked by great-circle distance.
//!
//! ## Features
//!
//! - Position from explicit coordinates, IP geolocation or a browser report
//! - Bounded Nominatim search, nearest 20 of up to 50 candidates
//! - Leaflet map page with a marker per result
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use nearby::coord::{distance::haversine_km, Coordinates};
//!
//! let nyc = Coordinates::new(40.7128, -74.0060);
//! let london = Coordinates::new(51.5074, -0.1278);
//!
//! let km = haversine_km(nyc, london);
//! println!("NYC to London: {:.0} km", km);
//!
//! // The box a search is bounded to
//! let viewbox = nyc.bounding_box(0.2).to_viewbox();
//! println!("viewbox={}", viewbox);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod map;
pub mod places;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geo::{LocationError, PositionProvider};
pub use map::{MapPresenter, MapView};
pub use places::{PlaceFinder, PlaceResult, SearchOutcome};
pub use session::Session;
