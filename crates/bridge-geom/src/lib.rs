// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for boundary reconciliation.

This crate provides:
- A float32 3D vector (`Vec3`) used for boundary points, origins and quad corners.
- A row-major 3x4 affine matrix (`Mat34`) matching the raw tracking-pose layout
  VR runtimes exchange.
- Axis-aligned bounding boxes (`Aabb`) for deriving play-area extents.

Design notes:
- Float32 throughout; results round the same way the runtimes' own math does.
- The vertical axis is +Y in every runtime frame handled here.
"]

/// Axis-aligned bounding boxes.
pub mod aabb;
/// Row-major 3x4 affine transforms.
pub mod mat34;
/// Three-component vectors.
pub mod vec3;

pub use aabb::Aabb;
pub use mat34::Mat34;
pub use vec3::Vec3;
