// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boundary geometry as read from the source runtime and as staged into the
//! destination.

use bridge_geom::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a runtime's tracking space (metres, +Y up).
pub type BoundaryPoint = Vec3;

/// Which boundary polygon a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Interior area the user configured as safe to move in.
    PlayArea,
    /// Outer guardian boundary where the warning wall appears.
    Outer,
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayArea => f.write_str("play-area"),
            Self::Outer => f.write_str("outer"),
        }
    }
}

/// Ordered boundary polygon; insertion order is winding order.
///
/// May be empty. Consumers that need a minimum number of points check it and
/// report [`crate::BridgeError::DegenerateBoundary`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    kind: BoundaryKind,
    points: Vec<BoundaryPoint>,
}

impl BoundaryPolygon {
    /// Wraps `points` as a polygon of the given kind.
    pub fn new(kind: BoundaryKind, points: Vec<BoundaryPoint>) -> Self {
        Self { kind, points }
    }

    /// Polygon kind.
    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    /// Points in winding order.
    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when the polygon has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the closed edge loop: `(p[i], p[(i + 1) % n])` for every `i`.
    pub fn edges(&self) -> impl Iterator<Item = (BoundaryPoint, BoundaryPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Width and depth of the play area in the destination's staging call.
///
/// Width is the source dimensions' X extent and depth its Z extent; the
/// vertical extent is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayAreaSize {
    /// Extent along X, metres.
    pub width: f32,
    /// Extent along Z, metres.
    pub depth: f32,
}

impl PlayAreaSize {
    /// Takes `(x, z)` from a source dimensions vector.
    pub fn from_dimensions(dimensions: Vec3) -> Self {
        Self {
            width: dimensions.x(),
            depth: dimensions.z(),
        }
    }
}

/// One vertical wall panel of the destination boundary.
///
/// Corner order is bottom-near, top-near, top-far, bottom-far, which the
/// destination renders as a consistently wound quad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallQuad {
    corners: [Vec3; 4],
}

impl WallQuad {
    /// Builds a quad from corners already in bottom-near, top-near, top-far,
    /// bottom-far order.
    pub const fn from_corners(corners: [Vec3; 4]) -> Self {
        Self { corners }
    }

    /// All four corners.
    pub fn corners(&self) -> [Vec3; 4] {
        self.corners
    }

    /// Floor corner at the edge's start point.
    pub fn bottom_near(&self) -> Vec3 {
        self.corners[0]
    }

    /// Ceiling corner at the edge's start point.
    pub fn top_near(&self) -> Vec3 {
        self.corners[1]
    }

    /// Ceiling corner at the edge's end point.
    pub fn top_far(&self) -> Vec3 {
        self.corners[2]
    }

    /// Floor corner at the edge's end point.
    pub fn bottom_far(&self) -> Vec3 {
        self.corners[3]
    }
}

/// Everything read from the source runtime in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBoundary {
    /// Interior play area.
    pub play_area: BoundaryPolygon,
    /// Outer guardian boundary.
    pub outer: BoundaryPolygon,
    /// Play-area dimensions as reported by the source (x, y, z extents).
    pub dimensions: Vec3,
}
