//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default position provider ("ip" or "none")
pub const DEFAULT_LOCATION_PROVIDER: &str = "ip";

/// Position providers accepted in config
pub const LOCATION_PROVIDERS: &[&str] = &["ip", "none"];

/// Default map zoom level
pub const DEFAULT_ZOOM: u8 = constants::map::ZOOM;

/// Default tile layer max zoom
pub const DEFAULT_MAX_ZOOM: u8 = constants::map::MAX_ZOOM;

/// Default tile server template
pub const DEFAULT_TILE_URL: &str = constants::map::TILE_URL;

/// Default tile attribution
pub const DEFAULT_ATTRIBUTION: &str = constants::map::ATTRIBUTION;

/// Default place search endpoint
pub const DEFAULT_SEARCH_ENDPOINT: &str = constants::api::NOMINATIM_URL;

/// Default search box half-width in degrees
pub const DEFAULT_BOX_DEGREES: f64 = constants::search::BOX_DEGREES;

/// Default number of raw search results
pub const DEFAULT_RAW_LIMIT: usize = constants::search::RAW_LIMIT;

/// Default number of ranked results kept
pub const DEFAULT_MAX_RESULTS: usize = constants::search::MAX_RESULTS;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "nearby";
