//! Point value types shared by the area builder and the evaluator.

use geo::Point;
use serde::{Deserialize, Serialize};

/// Geographic point (WGS84 degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether the coordinates are finite and inside the WGS84 ranges
    pub fn is_in_range(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

/// A caller-identified point to test against an area.
///
/// The id is opaque and only echoed back in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedPoint {
    pub id: String,
    #[serde(flatten)]
    pub location: GeoPoint,
}

impl IdentifiedPoint {
    pub fn new(id: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            location: GeoPoint::new(lon, lat),
        }
    }
}

/// Containment outcome for a single point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Containment {
    pub id: String,
    pub is_inside: bool,
}
