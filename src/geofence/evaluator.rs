//! Strict point-in-area evaluation.

use geo::{Contains, Point};
use rayon::prelude::*;
use tracing::debug;

use crate::models::{Area, Containment, IdentifiedPoint};

/// Whether `point` lies in the interior of `area`.
///
/// Points on the boundary are outside: this is a "within" test, not "covers".
pub fn is_inside(area: &Area, point: &IdentifiedPoint) -> bool {
    area.polygon().contains(&Point::from(point.location))
}

/// Test every point against the area. Output order matches input order.
pub fn evaluate(points: &[IdentifiedPoint], area: &Area) -> Vec<Containment> {
    let results: Vec<Containment> = points
        .par_iter()
        .map(|point| Containment {
            id: point.id.clone(),
            is_inside: is_inside(area, point),
        })
        .collect();

    debug!(
        "Evaluated {} points, {} inside",
        results.len(),
        results.iter().filter(|r| r.is_inside).count()
    );

    results
}
