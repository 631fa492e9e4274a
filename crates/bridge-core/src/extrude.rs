// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Guardian polygon to wall-quad extrusion.

use crate::boundary::{BoundaryPolygon, WallQuad};
use crate::error::BridgeError;
use bridge_geom::Vec3;
use tracing::debug;

/// Fewest points that close a wall loop.
pub const MIN_WALL_POINTS: usize = 3;

/// Extrudes every edge of `guardian` into a vertical wall quad.
///
/// Quad `i` spans points `i` and `(i + 1) % n`, so the output has exactly one
/// quad per input point, the last one closing the loop back to point 0. Both
/// edge points are re-expressed relative to `origin` before the ceiling offset
/// is added; all four corners see the same translation.
pub fn extrude_walls(
    guardian: &BoundaryPolygon,
    origin: Vec3,
    wall_height: f32,
) -> Result<Vec<WallQuad>, BridgeError> {
    if !wall_height.is_finite() || wall_height <= 0.0 {
        return Err(BridgeError::InvalidWallHeight(wall_height));
    }
    if guardian.len() < MIN_WALL_POINTS {
        return Err(BridgeError::DegenerateBoundary {
            kind: guardian.kind(),
            found: guardian.len(),
            required: MIN_WALL_POINTS,
        });
    }

    let rise = Vec3::UNIT_Y.scale(wall_height);
    let quads: Vec<WallQuad> = guardian
        .edges()
        .map(|(near, far)| {
            let near = near.sub(&origin);
            let far = far.sub(&origin);
            WallQuad::from_corners([near, near.add(&rise), far.add(&rise), far])
        })
        .collect();

    debug!(quads = quads.len(), wall_height, "walls extruded");
    Ok(quads)
}
