//! WGS84 <-> Web Mercator (EPSG:4326 <-> EPSG:3857) conversion.
//!
//! Web Mercator here is the spherical variant on the WGS84 semi-major axis,
//! the same definition EPSG:3857 uses. Conversions run vertex by vertex
//! through [`MapCoords`], so any geo geometry keeps its structure and ring
//! order.

use geo::{Coord, MapCoords};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// WGS84 semi-major axis in meters
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Spherical Mercator projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    radius: f64,
}

impl WebMercator {
    /// EPSG:3857 as used with WGS84 input. Process-wide and never mutated.
    pub const WGS84: WebMercator = WebMercator {
        radius: EARTH_RADIUS,
    };

    /// Project one lon/lat coordinate (degrees) to x/y (meters)
    pub fn forward(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.radius * c.x.to_radians(),
            y: self.radius * (FRAC_PI_4 + c.y.to_radians() / 2.0).tan().ln(),
        }
    }

    /// Unproject one x/y coordinate (meters) to lon/lat (degrees)
    pub fn inverse(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (c.x / self.radius).to_degrees(),
            y: (2.0 * (c.y / self.radius).exp().atan() - FRAC_PI_2).to_degrees(),
        }
    }

    /// Geographic geometry to Web Mercator
    pub fn to_metric<G>(&self, geometry: &G) -> G::Output
    where
        G: MapCoords<f64, f64>,
    {
        geometry.map_coords(|c| self.forward(c))
    }

    /// Web Mercator geometry back to geographic
    pub fn to_geographic<G>(&self, geometry: &G) -> G::Output
    where
        G: MapCoords<f64, f64>,
    {
        geometry.map_coords(|c| self.inverse(c))
    }

    /// Projected meters per ground meter at a latitude (1 / cos φ)
    pub fn ground_scale(&self, lat: f64) -> f64 {
        1.0 / lat.to_radians().cos()
    }
}
