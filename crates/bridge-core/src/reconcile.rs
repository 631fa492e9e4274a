// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Origin reconciliation.

use crate::boundary::BoundaryPolygon;
use crate::error::BridgeError;
use bridge_geom::{Mat34, Vec3};

/// Component-wise mean of every play-area point.
///
/// An empty polygon has no centroid and is rejected before any division.
#[allow(clippy::cast_precision_loss)]
pub fn compute_origin(play_area: &BoundaryPolygon) -> Result<Vec3, BridgeError> {
    if play_area.is_empty() {
        return Err(BridgeError::DegenerateBoundary {
            kind: play_area.kind(),
            found: 0,
            required: 1,
        });
    }
    let sum = play_area
        .points()
        .iter()
        .fold(Vec3::ZERO, |acc, p| acc.add(p));
    Ok(sum.div(play_area.len() as f32))
}

/// Standing-zero pose for `origin`: identity rotation, translation = origin.
pub fn standing_pose(origin: Vec3) -> Mat34 {
    Mat34::translation(origin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryKind;

    fn poly(points: &[[f32; 3]]) -> BoundaryPolygon {
        BoundaryPolygon::new(
            BoundaryKind::PlayArea,
            points.iter().copied().map(Vec3::from).collect(),
        )
    }

    #[test]
    fn triangle_centroid() {
        let origin = compute_origin(&poly(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [1.0, 2.0, 0.0]]))
            .unwrap();
        let [x, y, z] = origin.to_array();
        assert!((x - 1.0).abs() < 1e-6);
        assert!((y - 2.0 / 3.0).abs() < 1e-6);
        assert!(z.abs() < 1e-6);
    }

    #[test]
    fn single_point_is_its_own_origin() {
        let origin = compute_origin(&poly(&[[3.5, -1.0, 7.25]])).unwrap();
        assert_eq!(origin.to_array(), [3.5, -1.0, 7.25]);
    }

    #[test]
    fn empty_play_area_is_degenerate() {
        let err = compute_origin(&poly(&[])).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::DegenerateBoundary {
                kind: BoundaryKind::PlayArea,
                found: 0,
                required: 1
            }
        ));
    }

    #[test]
    fn standing_pose_translates_by_origin() {
        let pose = standing_pose(Vec3::new(0.5, 1.6, -2.0));
        assert!(pose.has_identity_rotation());
        assert_eq!(pose.translation_part().to_array(), [0.5, 1.6, -2.0]);
    }
}
