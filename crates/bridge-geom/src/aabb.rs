// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::Vec3;

/// Axis-aligned bounding box in tracking space.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` metres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Builds the minimal AABB containing all `points`.
    ///
    /// Returns `None` for an empty slice; an empty point set has no bounds.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    /// Edge lengths along each axis (`max - min`).
    pub fn extents(&self) -> Vec3 {
        self.max.sub(&self.min)
    }
}
