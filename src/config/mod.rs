//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/nearby/config.toml

pub mod defaults;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::places::fill_template;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for commands
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,

    /// Place search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// External map link settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Default values for commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Position provider: "ip" or "none"
    #[serde(default = "default_location_provider")]
    pub provider: String,

    /// If false, location requests are denied
    #[serde(default = "default_true")]
    pub allow: bool,

    /// Cache IP lookups on disk
    #[serde(default = "default_true")]
    pub cache: bool,
}

/// Map view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,

    #[serde(default = "default_attribution")]
    pub attribution: String,
}

/// Place search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the Nominatim instance
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    /// Half-width of the search box in degrees
    #[serde(default = "default_box_degrees")]
    pub box_degrees: f64,

    /// Raw results requested per search
    #[serde(default = "default_raw_limit")]
    pub raw_limit: usize,

    /// Ranked results kept per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// External map link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_location_provider() -> String {
    DEFAULT_LOCATION_PROVIDER.to_string()
}
fn default_true() -> bool {
    true
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}
fn default_max_zoom() -> u8 {
    DEFAULT_MAX_ZOOM
}
fn default_attribution() -> String {
    DEFAULT_ATTRIBUTION.to_string()
}
fn default_search_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}
fn default_box_degrees() -> f64 {
    DEFAULT_BOX_DEGREES
}
fn default_raw_limit() -> usize {
    DEFAULT_RAW_LIMIT
}
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps?q={lat},{lng}".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: default_location_provider(),
            allow: true,
            cache: true,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            max_zoom: default_max_zoom(),
            attribution: default_attribution(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            box_degrees: default_box_degrees(),
            raw_limit: default_raw_limit(),
            max_results: default_max_results(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            let config: Config = toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Check values that parse but cannot work
    pub fn validate(&self) -> Result<()> {
        if !LOCATION_PROVIDERS.contains(&self.location.provider.as_str()) {
            return Err(Error::Config(format!(
                "Invalid location provider: {} (expected one of: {})",
                self.location.provider,
                LOCATION_PROVIDERS.join(", ")
            )));
        }
        if !(self.search.box_degrees > 0.0 && self.search.box_degrees.is_finite()) {
            return Err(Error::Config(format!(
                "Box size must be positive: {}",
                self.search.box_degrees
            )));
        }
        if self.search.raw_limit == 0 {
            return Err(Error::Config("search.raw_limit must be at least 1".to_string()));
        }
        if self.search.max_results == 0 {
            return Err(Error::Config("search.max_results must be at least 1".to_string()));
        }
        if !self.url.providers.contains_key(&self.url.default) {
            return Err(Error::Config(format!("Unknown URL provider: {}", self.url.default)));
        }
        Ok(())
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["location", "provider"] => Some(self.location.provider.clone()),
            ["location", "allow"] => Some(self.location.allow.to_string()),
            ["location", "cache"] => Some(self.location.cache.to_string()),

            ["map", "zoom"] => Some(self.map.zoom.to_string()),
            ["map", "tile_url"] => Some(self.map.tile_url.clone()),
            ["map", "max_zoom"] => Some(self.map.max_zoom.to_string()),
            ["map", "attribution"] => Some(self.map.attribution.clone()),

            ["search", "endpoint"] => Some(self.search.endpoint.clone()),
            ["search", "box_degrees"] => Some(self.search.box_degrees.to_string()),
            ["search", "raw_limit"] => Some(self.search.raw_limit.to_string()),
            ["search", "max_results"] => Some(self.search.max_results.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(value, "port")?;
            }

            ["location", "provider"] => {
                if !LOCATION_PROVIDERS.contains(&value) {
                    return Err(Error::Config(format!(
                        "Invalid location provider: {} (expected one of: {})",
                        value,
                        LOCATION_PROVIDERS.join(", ")
                    )));
                }
                self.location.provider = value.to_string();
            }
            ["location", "allow"] => {
                self.location.allow = parse_value(value, "boolean")?;
            }
            ["location", "cache"] => {
                self.location.cache = parse_value(value, "boolean")?;
            }

            ["map", "zoom"] => {
                self.map.zoom = parse_value(value, "zoom")?;
            }
            ["map", "tile_url"] => {
                self.map.tile_url = value.to_string();
            }
            ["map", "max_zoom"] => {
                self.map.max_zoom = parse_value(value, "zoom")?;
            }
            ["map", "attribution"] => {
                self.map.attribution = value.to_string();
            }

            ["search", "endpoint"] => {
                self.search.endpoint = value.to_string();
            }
            ["search", "box_degrees"] => {
                let degrees: f64 = parse_value(value, "box size")?;
                if !(degrees > 0.0) {
                    return Err(Error::Config(format!("Box size must be positive: {}", value)));
                }
                self.search.box_degrees = degrees;
            }
            ["search", "raw_limit"] => {
                self.search.raw_limit = parse_count(value)?;
            }
            ["search", "max_results"] => {
                self.search.max_results = parse_count(value)?;
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "server.host",
            "server.port",
            "location.provider",
            "location.allow",
            "location.cache",
            "map.zoom",
            "map.tile_url",
            "map.max_zoom",
            "map.attribution",
            "search.endpoint",
            "search.box_degrees",
            "search.raw_limit",
            "search.max_results",
            "url.default",
        ]
    }

    /// URL template of the given (or default) link provider
    pub fn link_template(&self, provider: Option<&str>) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        self.url
            .providers
            .get(provider_name)
            .cloned()
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let template = self.link_template(provider)?;
        Ok(fill_template(&template, Coordinates::new(lat, lng)))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_count(value: &str) -> Result<usize> {
    match parse_value(value, "limit")? {
        0 => Err(Error::Config(format!("Limit must be at least 1: {}", value))),
        count => Ok(count),
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.format, "text");
        assert_eq!(config.location.provider, "ip");
        assert!(config.location.allow);
        assert_eq!(config.map.zoom, 14);
        assert_eq!(config.search.box_degrees, 0.2);
        assert_eq!(config.search.raw_limit, 50);
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("location.provider"), Some("ip".to_string()));

        config.set("location.provider", "none").unwrap();
        assert_eq!(config.get("location.provider"), Some("none".to_string()));

        config.set("search.max_results", "10").unwrap();
        assert_eq!(config.get("search.max_results"), Some("10".to_string()));
        assert_eq!(config.search.max_results, 10);

        config.set("location.allow", "false").unwrap();
        assert!(!config.location.allow);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("map.zoom", "not_a_number").is_err());
        assert!(config.set("search.box_degrees", "-1").is_err());
        assert!(config.set("location.provider", "gps").is_err());
        assert!(config.set("url.default", "bing").is_err());
        assert!(config.set("search.max_results", "0").is_err());
        assert!(config.set("search.raw_limit", "0").is_err());
    }

    #[test]
    fn test_load_rejects_unusable_search_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        for content in [
            "[search]\nbox_degrees = -0.2\n",
            "[search]\nbox_degrees = 0.0\n",
            "[search]\nmax_results = 0\n",
            "[search]\nraw_limit = 0\n",
            "[location]\nprovider = \"gps\"\n",
        ] {
            std::fs::write(&path, content).unwrap();
            let err = Config::load_from(&path).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{:?} was accepted", content);
        }

        std::fs::write(&path, "[search]\nbox_degrees = 0.5\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().search.box_degrees, 0.5);
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();

        let url = config.format_url(Some("google"), 40.7128, -74.0060).unwrap();
        assert_eq!(url, "https://www.google.com/maps?q=40.7128,-74.006");

        let url = config.format_url(Some("apple"), 40.7128, -74.0060).unwrap();
        assert_eq!(url, "https://maps.apple.com/?ll=40.7128,-74.006");
    }

    #[test]
    fn test_format_url_default_provider() {
        let config = Config::default();
        let url = config.format_url(None, 40.7128, -74.0060).unwrap();
        assert!(url.contains("google.com"));
    }

    #[test]
    fn test_format_url_unknown_provider() {
        let config = Config::default();
        assert!(config.format_url(Some("unknown"), 40.7128, -74.0060).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.endpoint = "http://localhost:8080".to_string();
        config.map.zoom = 16;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.search.endpoint, "http://localhost:8080");
        assert_eq!(loaded.map.zoom, 16);
    }

    #[test]
    fn test_load_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[search]\nmax_results = 5\n").unwrap();
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.raw_limit, 50);
        assert_eq!(config.map.zoom, 14);
        assert!(config.location.cache);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[location]"));
        assert!(toml.contains("[map]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[url.providers]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys_resolve() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} has no value", key);
        }
    }
}
