//! Coordinates and the geometry built on them
//!
//! This module handles:
//! - Latitude/longitude pairs and their validation
//! - Bounding boxes used to scope place searches
//! - Great-circle distance (see [`distance`])

pub mod distance;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Square box extending `half_width` degrees from this point on each axis
    pub fn bounding_box(&self, half_width: f64) -> BoundingBox {
        BoundingBox {
            west: self.lng - half_width,
            north: self.lat + half_width,
            east: self.lng + half_width,
            south: self.lat - half_width,
        }
    }
}

/// A rectangular lat/lng range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub south: f64,
}

impl BoundingBox {
    /// Nominatim `viewbox` value: `left,top,right,bottom`
    pub fn to_viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_bounding_box() {
        let bbox = Coordinates::new(40.0, -73.0).bounding_box(0.2);

        assert_relative_eq!(bbox.west, -73.2);
        assert_relative_eq!(bbox.north, 40.2);
        assert_relative_eq!(bbox.east, -72.8);
        assert_relative_eq!(bbox.south, 39.8);
    }

    #[test]
    fn test_viewbox_order() {
        let bbox = BoundingBox {
            west: -1.5,
            north: 2.5,
            east: 1.5,
            south: -2.5,
        };
        assert_eq!(bbox.to_viewbox(), "-1.5,2.5,1.5,-2.5");
    }
}
