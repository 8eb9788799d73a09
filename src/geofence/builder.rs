//! Area construction from a radius or a polygon specification.

use geo::{Area as _, Coord, LineString, Point, Polygon, RemoveRepeatedPoints, Validation};
use std::f64::consts::PI;
use tracing::debug;

use super::projection::WebMercator;
use super::GeofenceError;
use crate::models::{Area, AreaSpec, GeoPoint, PolygonSpec};

/// Vertex count used to approximate a circle
pub const DEFAULT_SEGMENTS: usize = 64;

/// Fewer vertices than this stop looking like a circle
pub const MIN_SEGMENTS: usize = 8;

/// Builds validated areas from [`AreaSpec`]s
#[derive(Debug, Clone, Copy)]
pub struct AreaBuilder {
    segments: usize,
    projection: &'static WebMercator,
}

impl Default for AreaBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENTS)
    }
}

impl AreaBuilder {
    pub fn new(segments: usize) -> Self {
        Self {
            segments: segments.max(MIN_SEGMENTS),
            projection: &WebMercator::WGS84,
        }
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Build the area described by `spec`
    pub fn build(&self, spec: &AreaSpec) -> Result<Area, GeofenceError> {
        match spec {
            AreaSpec::Radius(r) => self.build_from_radius(r.center, r.radius_m),
            AreaSpec::Polygon(p) => self.build_from_polygon(p),
        }
    }

    /// Circle of `radius_m` meters around `center`.
    ///
    /// The buffer is drawn in Web Mercator and projected back, so the radius
    /// is measured in projected meters.
    pub fn build_from_radius(
        &self,
        center: GeoPoint,
        radius_m: f64,
    ) -> Result<Area, GeofenceError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(GeofenceError::InvalidArea(format!(
                "radius must be positive, got {}",
                radius_m
            )));
        }

        let metric_center = self.projection.to_metric(&Point::from(center));
        let buffer = buffer_point(metric_center, radius_m, self.segments);
        let polygon = self.projection.to_geographic(&buffer);

        validate_polygon(&polygon).map_err(GeofenceError::InvalidArea)?;

        debug!(
            "Built radius area at ({}, {}) r={}m (~{:.2}m on the ground) with {} vertices",
            center.lon,
            center.lat,
            radius_m,
            radius_m / self.projection.ground_scale(center.lat),
            polygon.exterior().0.len()
        );

        Ok(Area::new(polygon))
    }

    /// Polygon taken as-is in geographic coordinates, without projection
    pub fn build_from_polygon(&self, spec: &PolygonSpec) -> Result<Area, GeofenceError> {
        let Some((exterior, holes)) = spec.rings.split_first() else {
            return Err(GeofenceError::InvalidArea("polygon has no rings".to_string()));
        };

        for (i, ring) in spec.rings.iter().enumerate() {
            check_ring_shape(i, ring).map_err(GeofenceError::InvalidArea)?;
        }

        // Repeated consecutive vertices are harmless for containment
        let polygon = Polygon::new(
            LineString::from(exterior.clone()),
            holes.iter().cloned().map(LineString::from).collect(),
        )
        .remove_repeated_points();

        validate_polygon(&polygon).map_err(GeofenceError::InvalidArea)?;

        debug!(
            "Built polygon area with {} exterior vertices and {} holes",
            polygon.exterior().0.len(),
            polygon.interiors().len()
        );

        Ok(Area::new(polygon))
    }
}

/// Regular polygon approximating a circle, counter-clockwise and closed
fn buffer_point(center: Point<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let mut coords: Vec<Coord<f64>> = (0..segments)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / segments as f64;
            Coord {
                x: center.x() + radius * angle.cos(),
                y: center.y() + radius * angle.sin(),
            }
        })
        .collect();
    coords.push(coords[0]);

    Polygon::new(LineString::new(coords), vec![])
}

/// Raw ring checks that must run before `Polygon::new` silently closes rings
fn check_ring_shape(index: usize, ring: &[[f64; 2]]) -> Result<(), String> {
    if ring.len() < 4 {
        return Err(format!(
            "ring {} has {} coordinates, at least 4 required",
            index,
            ring.len()
        ));
    }
    if ring.first() != ring.last() {
        return Err(format!("ring {} is not closed", index));
    }
    Ok(())
}

/// Check that a polygon is valid: finite coordinates, simple rings that do
/// not cross each other, holes inside the shell, and a non-zero area
fn validate_polygon(polygon: &Polygon<f64>) -> Result<(), String> {
    if let Some(err) = polygon.validation_errors().into_iter().next() {
        return Err(err.to_string());
    }

    if polygon.unsigned_area() <= 0.0 {
        return Err("polygon encloses no area".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area as _;

    fn reference_ring() -> Vec<[f64; 2]> {
        vec![
            [105.7489745472926, 9.8643837],
            [105.74897195816115, 9.864357800746198],
            [105.7489642902657, 9.864332896784274],
            [105.74895183827914, 9.864309945159855],
            [105.74893508072434, 9.864289827891483],
            [105.74891466158475, 9.86427331807508],
            [105.74889136555642, 9.86426105017422],
            [105.74886608789271, 9.864253495637943],
            [105.74883979999998, 9.864250944783173],
            [105.74881351210726, 9.864253495637943],
            [105.74878823444355, 9.86426105017422],
            [105.74876493841522, 9.86427331807508],
            [105.74874451927563, 9.864289827891483],
            [105.74872776172083, 9.864309945159855],
            [105.74871530973427, 9.864332896784274],
            [105.74870764183882, 9.864357800746198],
            [105.74870505270736, 9.8643837],
            [105.74870764183882, 9.864409599251765],
            [105.74871530973427, 9.864434503207889],
            [105.74872776172083, 9.864457454823633],
            [105.74874451927563, 9.864477572081773],
            [105.74876493841522, 9.864494081887939],
            [105.74878823444355, 9.864506349780124],
            [105.74881351210726, 9.864513904310602],
            [105.74883979999998, 9.864516455163338],
            [105.74886608789271, 9.864513904310602],
            [105.74889136555642, 9.864506349780124],
            [105.74891466158475, 9.864494081887939],
            [105.74893508072434, 9.864477572081773],
            [105.74895183827914, 9.864457454823633],
            [105.7489642902657, 9.864434503207889],
            [105.74897195816115, 9.864409599251765],
            [105.7489745472926, 9.8643837],
        ]
    }

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]
    }

    fn assert_invalid(result: Result<Area, GeofenceError>) {
        match result {
            Err(GeofenceError::InvalidArea(_)) => {}
            other => panic!("expected InvalidArea, got {:?}", other),
        }
    }

    #[test]
    fn test_radius_area_is_valid() {
        let builder = AreaBuilder::default();
        let area = builder
            .build_from_radius(GeoPoint::new(105.7488398, 9.8643837), 15.0)
            .unwrap();

        assert!(validate_polygon(area.polygon()).is_ok());
        assert!(area.polygon().unsigned_area() > 0.0);
        assert_eq!(area.vertex_count(), DEFAULT_SEGMENTS + 1);
    }

    #[test]
    fn test_radius_area_approaches_circle() {
        let proj = WebMercator::WGS84;
        let center = GeoPoint::new(13.4050, 52.5200);
        let radius = 250.0;
        let expected = PI * radius * radius;

        let errors: Vec<f64> = [16, 64, 256]
            .iter()
            .map(|&segments| {
                let area = AreaBuilder::new(segments)
                    .build_from_radius(center, radius)
                    .unwrap();
                let metric = proj.to_metric(area.polygon()).unsigned_area();
                (expected - metric).abs() / expected
            })
            .collect();

        assert!(errors[0] > errors[1]);
        assert!(errors[1] > errors[2]);
        assert!(errors[1] < 0.005, "64 segments off by {}", errors[1]);
        assert!(errors[2] < 0.001, "256 segments off by {}", errors[2]);
    }

    #[test]
    fn test_radius_must_be_positive() {
        let builder = AreaBuilder::default();
        let center = GeoPoint::new(0.0, 0.0);
        assert_invalid(builder.build_from_radius(center, 0.0));
        assert_invalid(builder.build_from_radius(center, -5.0));
        assert_invalid(builder.build_from_radius(center, f64::NAN));
    }

    #[test]
    fn test_segments_floor() {
        assert_eq!(AreaBuilder::new(3).segments(), MIN_SEGMENTS);
        assert_eq!(AreaBuilder::new(128).segments(), 128);
    }

    #[test]
    fn test_reference_polygon() {
        let builder = AreaBuilder::default();
        let area = builder
            .build_from_polygon(&PolygonSpec::new(vec![reference_ring()]))
            .unwrap();

        assert!(area.polygon().unsigned_area() > 0.0);
        assert_eq!(area.vertex_count(), 33);
    }

    #[test]
    fn test_polygon_is_not_projected() {
        let builder = AreaBuilder::default();
        let area = builder
            .build_from_polygon(&PolygonSpec::new(vec![square()]))
            .unwrap();

        let coords: Vec<[f64; 2]> = area
            .polygon()
            .exterior()
            .coords()
            .map(|c| [c.x, c.y])
            .collect();
        assert_eq!(coords, square());
    }

    #[test]
    fn test_polygon_with_hole() {
        let hole = vec![[0.25, 0.25], [0.25, 0.75], [0.75, 0.75], [0.75, 0.25], [0.25, 0.25]];
        let area = AreaBuilder::default()
            .build_from_polygon(&PolygonSpec::new(vec![square(), hole]))
            .unwrap();
        assert_eq!(area.polygon().interiors().len(), 1);
        assert!((area.polygon().unsigned_area() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_polygons() {
        let builder = AreaBuilder::default();

        // no rings
        assert_invalid(builder.build_from_polygon(&PolygonSpec::new(vec![])));

        // too few coordinates
        assert_invalid(builder.build_from_polygon(&PolygonSpec::new(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 0.0],
        ]])));

        // unclosed
        assert_invalid(builder.build_from_polygon(&PolygonSpec::new(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ]])));

        // bow tie
        assert_invalid(builder.build_from_polygon(&PolygonSpec::new(vec![vec![
            [0.0, 0.0],
            [1.0, 1.0],
            [1.0, 0.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ]])));

        // collinear, no area
        assert_invalid(builder.build_from_polygon(&PolygonSpec::new(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [0.0, 0.0],
        ]])));

        // hole outside the shell
        let hole = vec![[5.0, 5.0], [5.0, 6.0], [6.0, 6.0], [5.0, 5.0]];
        assert_invalid(builder.build_from_polygon(&PolygonSpec::new(vec![square(), hole])));
    }

    fn big_square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]
    }

    #[test]
    fn test_overlapping_holes_rejected() {
        let first = vec![[1.0, 1.0], [5.0, 1.0], [5.0, 5.0], [1.0, 5.0], [1.0, 1.0]];
        let second = vec![[3.0, 3.0], [7.0, 3.0], [7.0, 7.0], [3.0, 7.0], [3.0, 3.0]];

        assert_invalid(
            AreaBuilder::default()
                .build_from_polygon(&PolygonSpec::new(vec![big_square(), first, second])),
        );
    }

    #[test]
    fn test_hole_sharing_shell_edge_rejected() {
        let hole = vec![[0.0, 2.0], [4.0, 2.0], [4.0, 6.0], [0.0, 6.0], [0.0, 2.0]];

        assert_invalid(
            AreaBuilder::default().build_from_polygon(&PolygonSpec::new(vec![big_square(), hole])),
        );
    }

    #[test]
    fn test_disjoint_holes_accepted() {
        let first = vec![[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0], [1.0, 1.0]];
        let second = vec![[6.0, 6.0], [8.0, 6.0], [8.0, 8.0], [6.0, 8.0], [6.0, 6.0]];

        let area = AreaBuilder::default()
            .build_from_polygon(&PolygonSpec::new(vec![big_square(), first, second]))
            .unwrap();
        assert!((area.polygon().unsigned_area() - 92.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_ring_validates() {
        let n = 5_000;
        let mut ring: Vec<[f64; 2]> = (0..n)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / n as f64;
                [angle.cos(), angle.sin()]
            })
            .collect();
        ring.push(ring[0]);

        let area = AreaBuilder::default()
            .build_from_polygon(&PolygonSpec::new(vec![ring]))
            .unwrap();
        assert_eq!(area.vertex_count(), n + 1);
    }

    #[test]
    fn test_repeated_vertex_is_tolerated() {
        let ring = vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ];
        assert!(AreaBuilder::default()
            .build_from_polygon(&PolygonSpec::new(vec![ring]))
            .is_ok());
    }

    #[test]
    fn test_build_dispatches_on_spec() {
        let builder = AreaBuilder::default();
        assert!(builder.build(&AreaSpec::radius(10.0, 10.0, 100.0)).is_ok());
        assert!(builder
            .build(&AreaSpec::Polygon(PolygonSpec::new(vec![square()])))
            .is_ok());
    }
}
