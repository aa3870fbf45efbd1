//! Location models for geographic coordinates and resolved places

use serde::{Deserialize, Serialize};

use crate::{Result, SkyRouteError};

/// A point on the globe in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, within [-90, 90]
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SkyRouteError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SkyRouteError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as a "lat, lon" string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A place name resolved to coordinates by the geocoding provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceLocation {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Canonical name as reported by the provider
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
}

impl PlaceLocation {
    #[must_use]
    pub fn new(coordinate: Coordinate, name: String, country: String) -> Self {
        Self {
            coordinate,
            name,
            country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(46.8182, 8.2275).is_ok());
        assert!(Coordinate::new(90.0, -180.0).is_ok());
        assert!(Coordinate::new(91.0, 8.0).is_err());
        assert!(Coordinate::new(-46.0, 181.0).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_place_location_wire_shape() {
        let place = PlaceLocation::new(
            Coordinate {
                latitude: 51.5074,
                longitude: -0.1278,
            },
            "London".to_string(),
            "GB".to_string(),
        );

        let value = serde_json::to_value(&place).unwrap();
        assert_eq!(value["lat"], 51.5074);
        assert_eq!(value["lon"], -0.1278);
        assert_eq!(value["name"], "London");
        assert_eq!(value["country"], "GB");
    }

    #[test]
    fn test_format_coordinates() {
        let c = Coordinate {
            latitude: 40.712_8,
            longitude: -74.006,
        };
        assert_eq!(c.format_coordinates(), "40.7128, -74.0060");
    }
}
