//! Location acquisition
//!
//! Asks a position source for the user's coordinates. Sources are either
//! explicit coordinates, an IP geolocation lookup, or an error the platform
//! already reported (e.g. the browser's geolocation callback).

pub mod ip_location;

use crate::config::LocationConfig;
use crate::coord::Coordinates;
use ip_location::IpLocator;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// A located position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Why a position could not be acquired
///
/// The display text of each variant is what the user sees.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("Geolocation is not supported on this system.")]
    Unsupported,

    #[error("User denied location access.")]
    PermissionDenied,

    #[error("Location unavailable.")]
    PositionUnavailable,

    #[error("Request timed out.")]
    Timeout,

    #[error("Unknown error.")]
    Unknown,
}

impl LocationError {
    /// Map a W3C geolocation error code (1, 2, 3) to an error
    ///
    /// Anything else is `Unknown`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    /// Machine-readable error code used by the HTTP API
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unsupported => "UNSUPPORTED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::PositionUnavailable => "POSITION_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Trait for position sources
pub trait PositionSource: Send + Sync {
    /// Resolve the current position with the source's default settings
    fn current_position(
        &self,
    ) -> impl Future<Output = std::result::Result<GeoLocation, LocationError>> + Send;
}

/// The concrete position sources
#[derive(Debug)]
pub enum PositionProvider {
    /// Coordinates supplied up front (CLI flags, browser report)
    Fixed(GeoLocation),
    /// IP-based lookup
    Ip(IpLocator),
    /// An error the platform already reported
    Reported(LocationError),
}

impl PositionProvider {
    /// A provider that always yields the given coordinates
    pub fn fixed(coords: Coordinates) -> Self {
        Self::Fixed(GeoLocation {
            lat: coords.lat,
            lng: coords.lng,
            display_name: "Provided coordinates".to_string(),
        })
    }

    /// Build the provider selected by configuration
    ///
    /// Returns `None` when location is switched off entirely, which callers
    /// treat as an unsupported platform.
    pub fn from_config(config: &LocationConfig) -> Option<Self> {
        match config.provider.as_str() {
            "none" => None,
            _ if !config.allow => Some(Self::Reported(LocationError::PermissionDenied)),
            _ if config.cache => Some(Self::Ip(IpLocator::new())),
            _ => Some(Self::Ip(IpLocator::without_cache())),
        }
    }
}

impl PositionSource for PositionProvider {
    async fn current_position(&self) -> std::result::Result<GeoLocation, LocationError> {
        match self {
            Self::Fixed(location) => Ok(location.clone()),
            Self::Ip(locator) => locator.locate().await,
            Self::Reported(err) => Err(*err),
        }
    }
}
