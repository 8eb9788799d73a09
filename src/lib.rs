//! Geofence - point-in-area checks for radius and polygon geofences
//!
//! This library provides the area builder, containment evaluator and shared
//! types used by the server binary.

pub mod config;
pub mod geofence;
pub mod models;

pub use geofence::{check_points, AreaBuilder, GeofenceError};
pub use models::{Area, AreaSpec, Containment, GeoPoint, IdentifiedPoint};
