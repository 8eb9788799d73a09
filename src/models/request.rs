//! Request payload for a geofencing check.
//!
//! The area is given either as `radius` + `lon` + `lat`, or as a GeoJSON
//! polygon feature in `geom`. Payload shape and coordinate ranges are checked
//! here; deciding which area was asked for lives in [`GeofenceRequest::area_spec`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AreaSpec, GeoPoint, IdentifiedPoint, PolygonSpec};
use crate::geofence::GeofenceError;

/// Payload errors, caught before any geometry is built
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("points cannot be empty")]
    EmptyPoints,

    #[error("point at index {0} has an empty id")]
    EmptyId(usize),

    #[error("point '{0}' has lon/lat outside [-180, 180] / [-90, 90]")]
    PointOutOfRange(String),

    #[error("center lon/lat outside [-180, 180] / [-90, 90]")]
    CenterOutOfRange,

    #[error("radius must be a finite number greater than 0, got {0}")]
    InvalidRadius(f64),

    #[error("geom position {index} of ring {ring} needs at least lon and lat")]
    ShortPosition { ring: usize, index: usize },
}

/// GeoJSON object type tag for a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Feature,
}

/// GeoJSON object type tag for a polygon geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryKind {
    Polygon,
}

/// GeoJSON Polygon geometry. Positions may carry an altitude, which is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

/// GeoJSON Feature wrapping a Polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonFeature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub geometry: PolygonGeometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

impl PolygonFeature {
    pub fn from_rings(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            kind: FeatureKind::Feature,
            geometry: PolygonGeometry {
                kind: GeometryKind::Polygon,
                coordinates: rings
                    .into_iter()
                    .map(|ring| ring.into_iter().map(|c| c.to_vec()).collect())
                    .collect(),
            },
            properties: None,
        }
    }

    /// Drop altitudes and keep lon/lat pairs. Short positions are skipped;
    /// [`GeofenceRequest::validate`] rejects them beforehand.
    fn to_polygon_spec(&self) -> PolygonSpec {
        let rings = self
            .geometry
            .coordinates
            .iter()
            .map(|ring| {
                ring.iter()
                    .filter_map(|pos| match pos.as_slice() {
                        [lon, lat, ..] => Some([*lon, *lat]),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        PolygonSpec::new(rings)
    }
}

/// Body of `POST /v1/geofencing`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceRequest {
    pub points: Vec<IdentifiedPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geom: Option<PolygonFeature>,
}

impl GeofenceRequest {
    /// Check payload shape and coordinate ranges
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.points.is_empty() {
            return Err(RequestError::EmptyPoints);
        }

        for (i, point) in self.points.iter().enumerate() {
            if point.id.is_empty() {
                return Err(RequestError::EmptyId(i));
            }
            if !point.location.is_in_range() {
                return Err(RequestError::PointOutOfRange(point.id.clone()));
            }
        }

        if let Some(radius) = self.radius {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(RequestError::InvalidRadius(radius));
            }
        }

        let lon_ok = self.lon.map_or(true, |lon| GeoPoint::new(lon, 0.0).is_in_range());
        let lat_ok = self.lat.map_or(true, |lat| GeoPoint::new(0.0, lat).is_in_range());
        if !(lon_ok && lat_ok) {
            return Err(RequestError::CenterOutOfRange);
        }

        if let Some(geom) = &self.geom {
            for (ring, positions) in geom.geometry.coordinates.iter().enumerate() {
                if let Some(index) = positions.iter().position(|p| p.len() < 2) {
                    return Err(RequestError::ShortPosition { ring, index });
                }
            }
        }

        Ok(())
    }

    /// Decide which area was requested. A radius takes precedence over `geom`
    /// when both are present.
    pub fn area_spec(&self) -> Result<AreaSpec, GeofenceError> {
        match (self.radius, &self.geom) {
            (Some(radius), _) => match (self.lon, self.lat) {
                (Some(lon), Some(lat)) => Ok(AreaSpec::radius(lon, lat, radius)),
                _ => Err(GeofenceError::IncompleteRadiusSpec),
            },
            (None, Some(geom)) => Ok(AreaSpec::Polygon(geom.to_polygon_spec())),
            (None, None) => Err(GeofenceError::MissingAreaSpec),
        }
    }
}
