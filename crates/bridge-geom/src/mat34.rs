// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::Vec3;

/// Row-major 3×4 affine matrix in the layout VR runtimes use for raw
/// tracking poses.
///
/// - The left 3×3 block is the rotation; the fourth column is translation.
/// - The implicit fourth row is `[0, 0, 0, 1]`.
///
/// # Examples
/// ```
/// use bridge_geom::{Mat34, Vec3};
/// let m = Mat34::translation(Vec3::new(5.0, -3.0, 2.0));
/// assert!(m.has_identity_rotation());
/// assert_eq!(m.translation_part().to_array(), [5.0, -3.0, 2.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "[[f32; 4]; 3]", into = "[[f32; 4]; 3]")
)]
pub struct Mat34 {
    rows: [[f32; 4]; 3],
}

impl Mat34 {
    /// Returns the identity transform.
    pub const fn identity() -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, 0.0], // row 0
                [0.0, 1.0, 0.0, 0.0], // row 1
                [0.0, 0.0, 1.0, 0.0], // row 2
            ],
        }
    }

    /// Identity rotation with translation `t` in the fourth column.
    pub const fn translation(t: Vec3) -> Self {
        let [tx, ty, tz] = t.to_array();
        Self {
            rows: [
                [1.0, 0.0, 0.0, tx],
                [0.0, 1.0, 0.0, ty],
                [0.0, 0.0, 1.0, tz],
            ],
        }
    }

    /// Returns the row-major data.
    pub fn to_rows(self) -> [[f32; 4]; 3] {
        self.rows
    }

    /// Translation column.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.rows[0][3], self.rows[1][3], self.rows[2][3])
    }

    /// Returns `true` when the 3×3 block is exactly the identity.
    pub fn has_identity_rotation(&self) -> bool {
        let id = Self::identity();
        self.rows
            .iter()
            .zip(id.rows.iter())
            .all(|(a, b)| a[..3] == b[..3])
    }
}

impl Default for Mat34 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[[f32; 4]; 3]> for Mat34 {
    fn from(value: [[f32; 4]; 3]) -> Self {
        Self { rows: value }
    }
}

impl From<Mat34> for [[f32; 4]; 3] {
    fn from(value: Mat34) -> Self {
        value.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_keeps_identity_rotation() {
        let m = Mat34::translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(m.has_identity_rotation());
        assert_eq!(m.translation_part().to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(
            m.to_rows(),
            [[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 2.0], [0.0, 0.0, 1.0, 3.0]]
        );
    }

    #[test]
    fn rotated_matrix_is_not_identity_rotation() {
        let m = Mat34::from([
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0],
        ]);
        assert!(!m.has_identity_rotation());
        assert_eq!(m.translation_part(), Vec3::ZERO);
    }
}
