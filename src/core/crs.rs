//! Coordinate reference systems and conversion to the display projection.
//!
//! The map frontend consumes geographic WGS84 coordinates (longitude and
//! latitude in degrees). Web Mercator input is converted with the spherical
//! formulas; WGS84 input passes through untouched.

use geo_types::Coord;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::core::geo::LatLng;
use crate::{Result, ViewError};

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;

/// A supported coordinate reference system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crs {
    /// Geographic longitude/latitude (EPSG:4326), the display projection
    Wgs84,
    /// Spherical Web Mercator (EPSG:3857)
    WebMercator,
}

impl Crs {
    /// Resolves an EPSG code to a supported CRS
    pub fn from_epsg(code: u32) -> Result<Self> {
        match code {
            4326 => Ok(Self::Wgs84),
            3857 => Ok(Self::WebMercator),
            other => Err(ViewError::UnknownCrs(other)),
        }
    }

    /// The EPSG code of this CRS
    pub fn epsg(&self) -> u32 {
        match self {
            Self::Wgs84 => 4326,
            Self::WebMercator => 3857,
        }
    }

    /// Whether coordinates are already geographic longitude/latitude
    pub fn is_geographic(&self) -> bool {
        matches!(self, Self::Wgs84)
    }

    /// Converts one coordinate in this CRS to geographic WGS84
    pub fn to_wgs84(&self, coord: Coord<f64>) -> Coord<f64> {
        match self {
            Self::Wgs84 => coord,
            Self::WebMercator => Coord {
                x: (coord.x / EARTH_RADIUS).to_degrees(),
                y: (2.0 * (coord.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees(),
            },
        }
    }

    /// Converts one geographic WGS84 coordinate into this CRS
    pub fn from_wgs84(&self, coord: Coord<f64>) -> Coord<f64> {
        match self {
            Self::Wgs84 => coord,
            Self::WebMercator => {
                let lat = LatLng::clamp_lat(coord.y);
                Coord {
                    x: coord.x.to_radians() * EARTH_RADIUS,
                    y: (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS,
                }
            }
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsg_lookup() {
        assert_eq!(Crs::from_epsg(4326).unwrap(), Crs::Wgs84);
        assert_eq!(Crs::from_epsg(3857).unwrap(), Crs::WebMercator);
        assert!(matches!(
            Crs::from_epsg(32633),
            Err(ViewError::UnknownCrs(32633))
        ));
        assert_eq!(Crs::WebMercator.epsg(), 3857);
    }

    #[test]
    fn test_wgs84_passthrough() {
        let coord = Coord { x: -74.0060, y: 40.7128 };
        assert_eq!(Crs::Wgs84.to_wgs84(coord), coord);
        assert_eq!(Crs::Wgs84.from_wgs84(coord), coord);
    }

    #[test]
    fn test_mercator_round_trip() {
        let coord = Coord { x: -74.0060, y: 40.7128 };
        let projected = Crs::WebMercator.from_wgs84(coord);
        let back = Crs::WebMercator.to_wgs84(projected);

        assert!((back.x - coord.x).abs() < 1e-9);
        assert!((back.y - coord.y).abs() < 1e-9);
    }

    #[test]
    fn test_mercator_known_point() {
        // Longitude 180 maps to the half circumference of the sphere
        let projected = Crs::WebMercator.from_wgs84(Coord { x: 180.0, y: 0.0 });
        assert!((projected.x - PI * EARTH_RADIUS).abs() < 1e-6);
        assert!(projected.y.abs() < 1e-6);
    }
}
