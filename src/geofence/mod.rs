//! Geofence area construction and containment checks.
//!
//! An [`AreaSpec`](crate::models::AreaSpec) goes through [`AreaBuilder`] to
//! become an [`Area`](crate::models::Area), which [`evaluate`] then tests
//! each identified point against.

mod builder;
mod error;
mod evaluator;
pub mod projection;

pub use builder::{AreaBuilder, DEFAULT_SEGMENTS, MIN_SEGMENTS};
pub use error::GeofenceError;
pub use evaluator::{evaluate, is_inside};
pub use projection::WebMercator;

use tracing::debug;

use crate::models::{AreaSpec, Containment, IdentifiedPoint};

/// Build the area for `spec` and test `points` against it
pub fn check_points(
    builder: &AreaBuilder,
    spec: &AreaSpec,
    points: &[IdentifiedPoint],
) -> Result<Vec<Containment>, GeofenceError> {
    let area = builder.build(spec)?;
    debug!(
        "Checking {} points against {} area ({} vertices)",
        points.len(),
        spec.kind(),
        area.vertex_count()
    );
    Ok(evaluate(points, &area))
}
