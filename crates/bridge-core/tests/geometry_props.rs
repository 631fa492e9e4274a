#![allow(missing_docs, clippy::unwrap_used)]
//! Property tests for origin reconciliation and wall extrusion.

use bridge_core::extrude::extrude_walls;
use bridge_core::reconcile::compute_origin;
use bridge_core::{BoundaryKind, BoundaryPolygon, Vec3};
use proptest::prelude::*;

fn points(min: usize, max: usize) -> impl Strategy<Value = Vec<Vec3>> {
    prop::collection::vec(
        (-20.0f32..20.0, -2.0f32..2.0, -20.0f32..20.0).prop_map(|(x, y, z)| Vec3::new(x, y, z)),
        min..max,
    )
}

proptest! {
    #[test]
    fn origin_is_componentwise_mean(pts in points(1, 64)) {
        let poly = BoundaryPolygon::new(BoundaryKind::PlayArea, pts.clone());
        let origin = compute_origin(&poly).unwrap();
        prop_assert!(origin.is_finite());
        let n = pts.len() as f64;
        let mut mean = [0.0f64; 3];
        for p in &pts {
            for (m, c) in mean.iter_mut().zip(p.to_array()) {
                *m += f64::from(c) / n;
            }
        }
        for (got, want) in origin.to_array().iter().zip(mean) {
            prop_assert!((f64::from(*got) - want).abs() < 1e-3, "{got} vs {want}");
        }
    }

    #[test]
    fn one_quad_per_point_with_wrap_around(
        pts in points(3, 48),
        ox in -5.0f32..5.0,
        oz in -5.0f32..5.0,
        height in 0.5f32..4.0,
    ) {
        let n = pts.len();
        let origin = Vec3::new(ox, 0.0, oz);
        let poly = BoundaryPolygon::new(BoundaryKind::Outer, pts.clone());
        let quads = extrude_walls(&poly, origin, height).unwrap();
        prop_assert_eq!(quads.len(), n);
        for (i, q) in quads.iter().enumerate() {
            let j = (i + 1) % n;
            prop_assert_eq!(q.bottom_near(), pts[i].sub(&origin));
            prop_assert_eq!(q.bottom_far(), pts[j].sub(&origin));
        }
    }

    #[test]
    fn walls_are_vertical_and_exactly_wall_height_tall(
        pts in points(3, 32),
        ox in -100.0f32..100.0,
        oy in -2.0f32..2.0,
        oz in -100.0f32..100.0,
        height in 0.5f32..4.0,
    ) {
        let origin = Vec3::new(ox, oy, oz);
        let poly = BoundaryPolygon::new(BoundaryKind::Outer, pts);
        for q in extrude_walls(&poly, origin, height).unwrap() {
            for (floor, ceiling) in [(q.bottom_near(), q.top_near()), (q.bottom_far(), q.top_far())] {
                prop_assert_eq!(floor.x(), ceiling.x());
                prop_assert_eq!(floor.z(), ceiling.z());
                prop_assert!((ceiling.y() - floor.y() - height).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn short_polygons_never_produce_quads(pts in points(0, 3), height in 0.5f32..4.0) {
        let poly = BoundaryPolygon::new(BoundaryKind::Outer, pts);
        prop_assert!(extrude_walls(&poly, Vec3::ZERO, height).is_err());
    }
}
