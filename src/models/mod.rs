//! Core data models for geofence evaluation.

pub mod area;
pub mod point;
pub mod request;

pub use area::{Area, AreaSpec, PolygonSpec, RadiusSpec};
pub use point::{Containment, GeoPoint, IdentifiedPoint};
pub use request::{GeofenceRequest, PolygonFeature, PolygonGeometry, RequestError};
