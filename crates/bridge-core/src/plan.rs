// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory commit plan: everything the destination will be told, computed
//! before the destination is touched.

use crate::boundary::{PlayAreaSize, SourceBoundary, WallQuad};
use crate::error::BridgeError;
use crate::extrude::extrude_walls;
use crate::reconcile::{compute_origin, standing_pose};
use bridge_app_core::prefs::BoundaryMode;
use bridge_geom::{Mat34, Vec3};
use serde::Serialize;

/// Values staged by the commit pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitPlan {
    /// Write or clear.
    pub mode: BoundaryMode,
    /// Play-area centroid in the source frame.
    pub origin: Vec3,
    /// Standing-zero pose (identity rotation, translation = origin).
    pub standing_pose: Mat34,
    /// Play-area width and depth.
    pub play_area: PlayAreaSize,
    /// Wall quads relative to `origin`; empty in [`BoundaryMode::ClearBoundary`].
    pub walls: Vec<WallQuad>,
}

impl CommitPlan {
    /// Reconciles a source boundary into a plan.
    ///
    /// The outer polygon is only extruded (and only validated) when `mode` is
    /// [`BoundaryMode::WriteBoundary`].
    pub fn build(
        boundary: &SourceBoundary,
        mode: BoundaryMode,
        wall_height: f32,
    ) -> Result<Self, BridgeError> {
        let origin = compute_origin(&boundary.play_area)?;
        let walls = match mode {
            BoundaryMode::WriteBoundary => extrude_walls(&boundary.outer, origin, wall_height)?,
            BoundaryMode::ClearBoundary => Vec::new(),
        };
        Ok(Self {
            mode,
            origin,
            standing_pose: standing_pose(origin),
            play_area: PlayAreaSize::from_dimensions(boundary.dimensions),
            walls,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::boundary::{BoundaryKind, BoundaryPolygon};

    fn boundary(outer: Vec<Vec3>) -> SourceBoundary {
        SourceBoundary {
            play_area: BoundaryPolygon::new(
                BoundaryKind::PlayArea,
                vec![Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)],
            ),
            outer: BoundaryPolygon::new(BoundaryKind::Outer, outer),
            dimensions: Vec3::new(2.0, 0.0, 2.0),
        }
    }

    #[test]
    fn clear_mode_skips_extrusion_of_short_outer() {
        let plan = CommitPlan::build(&boundary(Vec::new()), BoundaryMode::ClearBoundary, 2.43)
            .unwrap();
        assert!(plan.walls.is_empty());
        assert_eq!(plan.origin, Vec3::ZERO);
    }

    #[test]
    fn write_mode_rejects_short_outer() {
        let err = CommitPlan::build(&boundary(Vec::new()), BoundaryMode::WriteBoundary, 2.43)
            .unwrap_err();
        assert!(matches!(err, BridgeError::DegenerateBoundary { kind: BoundaryKind::Outer, .. }));
    }
}
