//! Geofence area specifications and the realized area geometry.

use geo::Polygon;
use super::GeoPoint;

/// Circle around a center, radius in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSpec {
    pub center: GeoPoint,
    pub radius_m: f64,
}

/// Polygon as GeoJSON-style rings: exterior first, then holes.
///
/// Every ring must be closed (first coordinate equals last).
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSpec {
    pub rings: Vec<Vec<[f64; 2]>>,
}

impl PolygonSpec {
    pub fn new(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Self { rings }
    }
}

/// What the caller asked to be fenced
#[derive(Debug, Clone, PartialEq)]
pub enum AreaSpec {
    Radius(RadiusSpec),
    Polygon(PolygonSpec),
}

impl AreaSpec {
    pub fn radius(lon: f64, lat: f64, radius_m: f64) -> Self {
        AreaSpec::Radius(RadiusSpec {
            center: GeoPoint::new(lon, lat),
            radius_m,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AreaSpec::Radius(_) => "radius",
            AreaSpec::Polygon(_) => "polygon",
        }
    }
}

/// A validated, non-empty polygonal area in geographic coordinates.
///
/// Only the area builder creates these, so holding an `Area` means the
/// geometry already passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    polygon: Polygon<f64>,
}

impl Area {
    pub(crate) fn new(polygon: Polygon<f64>) -> Self {
        Self { polygon }
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Number of exterior vertices, closing coordinate included
    pub fn vertex_count(&self) -> usize {
        self.polygon.exterior().0.len()
    }
}
