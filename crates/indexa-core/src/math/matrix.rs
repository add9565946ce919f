// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the row-major `Mat4` type and associated operations.

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::{MathError, Vec3, Vec4, EPSILON, PI};
use std::ops::{Mul, MulAssign};

/// A 4x4 row-major matrix for transforming row vectors.
///
/// Element `e_rc` lives in `rows[r][c]`. Rows 0-2 hold the transformed X, Y
/// and Z axes (rotation and scale) and row 3 holds the translation, so a point
/// is transformed as `v * M` and a product `A * B` applies `A` first.
///
/// The memory layout is 16 consecutive `f32` in `e00, e01, .. e33` order with
/// no padding. Constant buffers on the GPU side rely on this layout, see
/// [`Mat4::as_bytes`].
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Mat4 {
    /// The rows of the matrix. `rows[3]` is the translation row.
    pub rows: [[f32; 4]; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self::from_rows([[0.0; 4]; 4]);

    /// Creates a matrix from its four rows.
    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Creates a matrix from 16 elements given in row-major order.
    #[inline]
    pub fn from_array(elements: [f32; 16]) -> Self {
        Self {
            rows: bytemuck::cast(elements),
        }
    }

    /// Resets this matrix to the identity.
    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    // --- Factories ---

    /// Creates a translation matrix: the identity with row 3 set to `(v.x, v.y, v.z, 1)`.
    ///
    /// # Example
    ///
    /// ```
    /// use indexa_core::math::{Mat4, Vec3};
    ///
    /// let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(m.translation(), Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    /// ```
    #[inline]
    pub const fn from_translation(v: Vec3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [v.x, v.y, v.z, 1.0],
        ])
    }

    /// Creates a matrix for a rotation around the X-axis.
    ///
    /// `sin` lands in `e12` and `-sin` in `e21`, which turns `+Y` towards `+Z`.
    ///
    /// # Arguments
    ///
    /// * `angle`: The angle of rotation in radians.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a matrix for a rotation around the Y-axis.
    ///
    /// `-sin` lands in `e02` and `sin` in `e20`, which turns `+X` towards `-Z`.
    ///
    /// # Arguments
    ///
    /// * `angle`: The angle of rotation in radians.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a matrix for a rotation around the Z-axis.
    ///
    /// `sin` lands in `e01` and `-sin` in `e10`, which turns `+X` towards `+Y`.
    ///
    /// # Arguments
    ///
    /// * `angle`: The angle of rotation in radians.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub const fn from_scale(scale: Vec3) -> Self {
        Self::from_rows([
            [scale.x, 0.0, 0.0, 0.0],
            [0.0, scale.y, 0.0, 0.0],
            [0.0, 0.0, scale.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a matrix scaling all three axes by `scale`.
    #[inline]
    pub const fn from_uniform_scale(scale: f32) -> Self {
        Self::from_scale(Vec3::new(scale, scale, scale))
    }

    /// Creates a left-handed perspective projection for row vectors, with a
    /// `[0, 1]` depth range.
    ///
    /// Points at `z_near` map to depth 0 and points at `z_far` to depth 1 after
    /// the divide by `w`. The result is projective, so it must not be passed
    /// to [`Mat4::inverse_affine`].
    ///
    /// # Arguments
    ///
    /// * `fov_y`: Vertical field of view in radians, within `(0, PI)`.
    /// * `aspect_ratio`: Width divided by height of the viewport.
    /// * `z_near`: Distance to the near clipping plane (must be positive).
    /// * `z_far`: Distance to the far clipping plane (must be > `z_near`).
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidProjection`] naming the first rejected
    /// parameter. NaN parameters are always rejected, as are an infinite aspect
    /// ratio or far plane.
    pub fn perspective_fov_lh(
        fov_y: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Result<Self, MathError> {
        if fov_y.is_nan() || fov_y <= 0.0 || fov_y >= PI {
            return Err(MathError::InvalidProjection {
                reason: "vertical field of view must lie in (0, PI)",
            });
        }
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(MathError::InvalidProjection {
                reason: "aspect ratio must be positive and finite",
            });
        }
        if z_near.is_nan() || z_near <= 0.0 {
            return Err(MathError::InvalidProjection {
                reason: "near plane must be positive",
            });
        }
        if !z_far.is_finite() || z_far <= z_near {
            return Err(MathError::InvalidProjection {
                reason: "far plane must be finite and lie beyond the near plane",
            });
        }

        let y_scale = 1.0 / (fov_y * 0.5).tan();
        let x_scale = y_scale / aspect_ratio;
        let depth_scale = z_far / (z_far - z_near);

        Ok(Self::from_rows([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, depth_scale, 1.0],
            [0.0, 0.0, -z_near * depth_scale, 0.0],
        ]))
    }

    // --- Row access ---

    /// Returns the first three elements of row `row`; the fourth is ignored.
    ///
    /// Row 3 is the translation, rows 0-2 are the X, Y and Z axes.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::RowOutOfRange`] if `row >= 4`.
    #[inline]
    pub fn get_row(&self, row: usize) -> Result<Vec3, MathError> {
        let [x, y, z, _] = *self.rows.get(row).ok_or(MathError::RowOutOfRange { row })?;
        Ok(Vec3::new(x, y, z))
    }

    /// Overwrites the first three elements of row `row` with `v`, leaving the
    /// fourth element of that row unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::RowOutOfRange`] if `row >= 4`; the matrix is left
    /// untouched in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use indexa_core::math::{Mat4, Vec3};
    ///
    /// let mut m = Mat4::IDENTITY;
    /// m.set_row(3, Vec3::new(0.0, 0.0, -5.0)).unwrap();
    /// assert_eq!(m.get_row(3).unwrap(), Vec3::new(0.0, 0.0, -5.0));
    /// assert_eq!(m.rows[3][3], 1.0);
    /// assert!(m.set_row(4, Vec3::ONE).is_err());
    /// ```
    #[inline]
    pub fn set_row(&mut self, row: usize, v: Vec3) -> Result<(), MathError> {
        let target = self
            .rows
            .get_mut(row)
            .ok_or(MathError::RowOutOfRange { row })?;
        target[0] = v.x;
        target[1] = v.y;
        target[2] = v.z;
        Ok(())
    }

    /// The translation held in row 3.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        let [x, y, z, _] = self.rows[3];
        Vec3::new(x, y, z)
    }

    /// Overwrites the translation held in row 3, keeping `e33`.
    #[inline]
    pub fn set_translation(&mut self, v: Vec3) {
        self.rows[3][..3].copy_from_slice(&[v.x, v.y, v.z]);
    }

    /// The transformed X axis (row 0).
    #[inline]
    pub fn x_axis(&self) -> Vec3 {
        Vec4::from(self.rows[0]).truncate()
    }

    /// The transformed Y axis (row 1).
    #[inline]
    pub fn y_axis(&self) -> Vec3 {
        Vec4::from(self.rows[1]).truncate()
    }

    /// The transformed Z axis (row 2).
    #[inline]
    pub fn z_axis(&self) -> Vec3 {
        Vec4::from(self.rows[2]).truncate()
    }

    // --- Transforms ---

    /// Transforms a point (`w = 1`), picking up the translation row.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (Vec4::from_vec3(p, 1.0) * *self).truncate()
    }

    /// Transforms a direction (`w = 0`), ignoring the translation row.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (Vec4::from_vec3(v, 0.0) * *self).truncate()
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transpose(&self) -> Self {
        let mut out = Self::ZERO;
        for (r, row) in self.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                out.rows[c][r] = *value;
            }
        }
        out
    }

    /// Returns `true` if the last column is exactly `(0, 0, 0, 1)`.
    #[inline]
    pub fn is_affine(&self) -> bool {
        self.rows[0][3] == 0.0
            && self.rows[1][3] == 0.0
            && self.rows[2][3] == 0.0
            && self.rows[3][3] == 1.0
    }

    /// Computes the determinant of the upper-left 3x3 block (rotation and scale).
    #[inline]
    pub fn determinant_3x3(&self) -> f32 {
        let [r0, r1, r2, _] = self.rows;
        r0[0] * (r1[1] * r2[2] - r1[2] * r2[1])
            + r0[1] * (r1[2] * r2[0] - r1[0] * r2[2])
            + r0[2] * (r1[0] * r2[1] - r1[1] * r2[0])
    }

    /// Computes the inverse of an affine transformation matrix.
    ///
    /// The upper-left 3x3 block is inverted through its adjugate divided by the
    /// determinant, the translation row is replaced by `-translation * inverse3x3`
    /// and the last column is forced to `(0, 0, 0, 1)`. This is how a camera's
    /// positioning matrix becomes a view matrix.
    ///
    /// The input is assumed to be affine. A projective matrix (such as one from
    /// [`Mat4::perspective_fov_lh`]) yields a finite but meaningless result; it
    /// is logged, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the 3x3 determinant is zero,
    /// subnormal, infinite or NaN, i.e. whenever `1 / det` would not be a usable
    /// finite number.
    ///
    /// # Example
    ///
    /// ```
    /// use indexa_core::math::{Mat4, Vec3};
    ///
    /// let camera = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    /// let view = camera.inverse_affine().unwrap();
    /// assert_eq!(view.translation(), Vec3::new(0.0, 0.0, 5.0));
    /// ```
    pub fn inverse_affine(&self) -> Result<Self, MathError> {
        if !self.is_affine() {
            log::warn!(
                "inverse_affine called on a non-affine matrix (last column {:?})",
                [
                    self.rows[0][3],
                    self.rows[1][3],
                    self.rows[2][3],
                    self.rows[3][3]
                ]
            );
        }

        let [r0, r1, r2, t] = self.rows;

        // First column of the cofactor matrix.
        let det0 = r1[1] * r2[2] - r1[2] * r2[1];
        let det1 = r1[2] * r2[0] - r1[0] * r2[2];
        let det2 = r1[0] * r2[1] - r1[1] * r2[0];
        let det = r0[0] * det0 + r0[1] * det1 + r0[2] * det2;

        if !det.is_normal() {
            return Err(MathError::SingularMatrix { determinant: det });
        }

        let inv_det = 1.0 / det;
        let i00 = inv_det * det0;
        let i10 = inv_det * det1;
        let i20 = inv_det * det2;

        let i01 = inv_det * (r2[1] * r0[2] - r2[2] * r0[1]);
        let i11 = inv_det * (r2[2] * r0[0] - r2[0] * r0[2]);
        let i21 = inv_det * (r2[0] * r0[1] - r2[1] * r0[0]);

        let i02 = inv_det * (r0[1] * r1[2] - r0[2] * r1[1]);
        let i12 = inv_det * (r0[2] * r1[0] - r0[0] * r1[2]);
        let i22 = inv_det * (r0[0] * r1[1] - r0[1] * r1[0]);

        // Negated translation carried through the inverted 3x3.
        let tx = -t[0] * i00 - t[1] * i10 - t[2] * i20;
        let ty = -t[0] * i01 - t[1] * i11 - t[2] * i21;
        let tz = -t[0] * i02 - t[1] * i12 - t[2] * i22;

        Ok(Self::from_rows([
            [i00, i01, i02, 0.0],
            [i10, i11, i12, 0.0],
            [i20, i21, i22, 0.0],
            [tx, ty, tz, 1.0],
        ]))
    }

    // --- GPU layout ---

    /// The 16 elements in row-major order.
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.rows)
    }

    /// The raw 64 bytes of the matrix, ready to copy into a constant buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

// --- Operators Overloading ---

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Returns `self * rhs`: element `(r, c)` is the dot product of row `r` of
    /// `self` with column `c` of `rhs`. Not commutative; `self` is applied first.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut out = Self::ZERO;
        for (out_row, lhs) in out.rows.iter_mut().zip(self.rows.iter()) {
            for (c, value) in out_row.iter_mut().enumerate() {
                *value = lhs[0] * rhs.rows[0][c]
                    + lhs[1] * rhs.rows[1][c]
                    + lhs[2] * rhs.rows[2][c]
                    + lhs[3] * rhs.rows[3][c];
            }
        }
        out
    }
}

impl MulAssign<Mat4> for Mat4 {
    /// Post-multiplies this matrix by `rhs`.
    ///
    /// The full product is built in a temporary before `self` is overwritten,
    /// so `m *= m` gives the same result as `m * m`.
    #[inline]
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = *self * rhs;
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;
    /// Transforms this row vector by `rhs` (`v' = v * M`).
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let m = &rhs.rows;
        let mut out = [0.0; 4];
        for (c, value) in out.iter_mut().enumerate() {
            *value = self.x * m[0][c] + self.y * m[1][c] + self.z * m[2][c] + self.w * m[3][c];
        }
        Vec4::from(out)
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{FRAC_PI_2, FRAC_PI_4, TAU};
    use approx::assert_abs_diff_eq;

    /// Translation, rotation and uniform scale chained together.
    fn sample_affine() -> Mat4 {
        Mat4::from_uniform_scale(2.0)
            * Mat4::from_rotation_x(0.4)
            * Mat4::from_rotation_y(-1.1)
            * Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0))
    }

    // --- Construction ---

    #[test]
    fn test_identity_default() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);

        let mut m = sample_affine();
        m.set_identity();
        assert_eq!(m, Mat4::IDENTITY);
    }

    #[test]
    fn test_identity_is_neutral_for_multiplication() {
        let m = sample_affine();
        assert_abs_diff_eq!(Mat4::IDENTITY * m, m);
        assert_abs_diff_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn test_translation() {
        let t = Vec3::new(1.0, 2.0, 3.0);
        let m = Mat4::from_translation(t);
        assert_eq!(m.rows[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m.transform_point(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
        // Directions ignore the translation row.
        assert_eq!(m.transform_vector(Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn test_scale() {
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.transform_point(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.rows[3][3], 1.0);

        let u = Mat4::from_uniform_scale(3.0);
        assert_eq!(u, Mat4::from_scale(Vec3::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_rotation_x_sign_convention() {
        let angle = 0.3_f32;
        let m = Mat4::from_rotation_x(angle);
        assert_eq!(m.rows[1][2], angle.sin());
        assert_eq!(m.rows[2][1], -angle.sin());

        let p = Mat4::from_rotation_x(FRAC_PI_2).transform_vector(Vec3::Y);
        assert_abs_diff_eq!(p, Vec3::Z);
    }

    #[test]
    fn test_rotation_x_full_turns() {
        assert_eq!(Mat4::from_rotation_x(0.0), Mat4::IDENTITY);
        assert_abs_diff_eq!(Mat4::from_rotation_x(TAU), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotation_y_maps_x_row_to_negative_z() {
        let m = Mat4::from_rotation_y(FRAC_PI_2);
        assert_abs_diff_eq!(m.get_row(0).unwrap(), Vec3::new(0.0, 0.0, -1.0));
        assert_abs_diff_eq!(m.transform_vector(Vec3::X), -Vec3::Z);
    }

    #[test]
    fn test_rotation_z() {
        let m = Mat4::from_rotation_z(FRAC_PI_2);
        assert_abs_diff_eq!(m.transform_vector(Vec3::X), Vec3::Y);
        assert_abs_diff_eq!(m.transform_vector(Vec3::Y), -Vec3::X);
    }

    #[test]
    fn test_rotations_keep_an_orthonormal_basis() {
        let m = Mat4::from_rotation_x(0.7) * Mat4::from_rotation_y(-0.2) * Mat4::from_rotation_z(1.9);
        assert_abs_diff_eq!(m.x_axis().length(), 1.0);
        assert_abs_diff_eq!(m.y_axis().length(), 1.0);
        assert_abs_diff_eq!(m.x_axis().cross(m.y_axis()), m.z_axis());
        assert_abs_diff_eq!(m.determinant_3x3(), 1.0);
    }

    // --- Composition ---

    #[test]
    fn test_composition_order_reads_left_to_right() {
        let t = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let r = Mat4::from_rotation_z(FRAC_PI_2);
        let p = Vec3::X;

        // Rotate (1,0,0) to (0,1,0), then translate to (1,1,0).
        assert_abs_diff_eq!((r * t).transform_point(p), Vec3::new(1.0, 1.0, 0.0));
        // Translate (1,0,0) to (2,0,0), then rotate to (0,2,0).
        assert_abs_diff_eq!((t * r).transform_point(p), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_mul_matches_element_formula() {
        let a = Mat4::from_array(std::array::from_fn(|i| i as f32));
        let b = Mat4::from_array(std::array::from_fn(|i| (16 - i) as f32 * 0.5));
        let p = a * b;
        for r in 0..4 {
            for c in 0..4 {
                let expected: f32 = (0..4).map(|k| a.rows[r][k] * b.rows[k][c]).sum();
                assert_abs_diff_eq!(p.rows[r][c], expected);
            }
        }
    }

    #[test]
    fn test_mul_assign_with_self() {
        let mut m = sample_affine();
        let left = m;
        let right = m;
        m *= m;
        assert_eq!(m, left * right);
    }

    #[test]
    fn test_mul_assign_with_other() {
        let mut m = Mat4::from_rotation_x(0.5);
        let other = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
        let expected = m * other;
        m *= other;
        assert_eq!(m, expected);
    }

    #[test]
    fn test_vec4_times_matrix() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec4::new(1.0, 1.0, 1.0, 1.0) * m, Vec4::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(Vec4::new(1.0, 1.0, 1.0, 0.0) * m, Vec4::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_transpose() {
        let m = Mat4::from_array(std::array::from_fn(|i| i as f32));
        let t = m.transpose();
        assert_eq!(t.rows[0], [0.0, 4.0, 8.0, 12.0]);
        assert_eq!(t.rows[3], [3.0, 7.0, 11.0, 15.0]);
        assert_eq!(t.transpose(), m);
    }

    // --- Row access ---

    #[test]
    fn test_set_row_then_get_row() {
        let mut m = Mat4::IDENTITY;
        let v = Vec3::new(0.5, -7.0, 12.25);
        m.set_row(3, v).unwrap();
        assert_eq!(m.get_row(3).unwrap(), v);
        assert_eq!(m.rows[3][3], 1.0);
        assert_eq!(m.translation(), v);
    }

    #[test]
    fn test_set_row_leaves_fourth_element() {
        let mut m = Mat4::from_array(std::array::from_fn(|i| i as f32));
        m.set_row(1, Vec3::ZERO).unwrap();
        assert_eq!(m.rows[1], [0.0, 0.0, 0.0, 7.0]);
        // Other rows untouched.
        assert_eq!(m.rows[0], [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(m.rows[2], [8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_row_index_out_of_range() {
        let mut m = sample_affine();
        let before = m;
        assert_eq!(m.get_row(4), Err(MathError::RowOutOfRange { row: 4 }));
        assert_eq!(
            m.set_row(usize::MAX, Vec3::ONE),
            Err(MathError::RowOutOfRange { row: usize::MAX })
        );
        assert_eq!(m, before);
    }

    #[test]
    fn test_axis_accessors() {
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.x_axis(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(m.y_axis(), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(m.z_axis(), Vec3::new(0.0, 0.0, 4.0));

        let mut t = Mat4::from_rotation_y(1.0);
        t.set_translation(Vec3::new(9.0, 8.0, 7.0));
        assert_eq!(t.rows[3], [9.0, 8.0, 7.0, 1.0]);
    }

    // --- Affine inverse ---

    #[test]
    fn test_inverse_affine_round_trips_to_identity() {
        let m = sample_affine();
        let inv = m.inverse_affine().expect("Matrix should be invertible");
        assert_abs_diff_eq!(m * inv, Mat4::IDENTITY, epsilon = 1e-5);
        assert_abs_diff_eq!(inv * m, Mat4::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn test_inverse_affine_twice_gives_back_original() {
        let m = sample_affine();
        let twice = m.inverse_affine().unwrap().inverse_affine().unwrap();
        assert_abs_diff_eq!(twice, m, epsilon = 1e-4);
    }

    #[test]
    fn test_inverse_of_camera_translation() {
        let camera = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let view = camera.inverse_affine().unwrap();
        assert_abs_diff_eq!(view.translation(), Vec3::new(-5.0, 0.0, 0.0));
        assert_abs_diff_eq!(view * camera, Mat4::IDENTITY);
    }

    #[test]
    fn test_inverse_of_rotation_is_transpose() {
        let r = Mat4::from_rotation_y(FRAC_PI_4) * Mat4::from_rotation_z(0.3);
        let inv = r.inverse_affine().unwrap();
        assert_abs_diff_eq!(inv, r.transpose());
    }

    #[test]
    fn test_inverse_of_scale() {
        let s = Mat4::from_scale(Vec3::new(2.0, 4.0, 0.5));
        let inv = s.inverse_affine().unwrap();
        assert_abs_diff_eq!(inv, Mat4::from_scale(Vec3::new(0.5, 0.25, 2.0)));
    }

    #[test]
    fn test_inverse_affine_rejects_singular() {
        let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(
            flat.inverse_affine(),
            Err(MathError::SingularMatrix { determinant: 0.0 })
        );

        let collapsed = Mat4::from_uniform_scale(0.0) * Mat4::from_translation(Vec3::ONE);
        assert!(matches!(
            collapsed.inverse_affine(),
            Err(MathError::SingularMatrix { .. })
        ));

        let mut nan = Mat4::IDENTITY;
        nan.rows[0][0] = f32::NAN;
        assert!(nan.inverse_affine().is_err());
    }

    #[test]
    fn test_inverse_affine_forces_last_column() {
        let mut m = sample_affine();
        m.rows[0][3] = 0.25;
        m.rows[3][3] = 3.0;
        assert!(!m.is_affine());

        let inv = m.inverse_affine().unwrap();
        assert!(inv.is_affine());
    }

    // --- Projection ---

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let near = 0.1;
        let far = 100.0;
        let p = Mat4::perspective_fov_lh(FRAC_PI_4, 16.0 / 9.0, near, far).unwrap();

        let at_near = Vec4::new(0.0, 0.0, near, 1.0) * p;
        let at_far = Vec4::new(0.0, 0.0, far, 1.0) * p;
        assert_abs_diff_eq!(at_near.z / at_near.w, 0.0);
        assert_abs_diff_eq!(at_far.z / at_far.w, 1.0);

        let y_scale = 1.0 / (FRAC_PI_4 / 2.0).tan();
        assert_abs_diff_eq!(p.rows[1][1], y_scale);
        assert_abs_diff_eq!(p.rows[0][0], y_scale * 9.0 / 16.0);
        assert!(!p.is_affine());
    }

    #[test]
    fn test_perspective_rejects_bad_frustum() {
        let bad = [
            (0.0, 1.0, 0.1, 10.0),
            (PI, 1.0, 0.1, 10.0),
            (1.0, 0.0, 0.1, 10.0),
            (1.0, 1.0, 0.0, 10.0),
            (1.0, 1.0, 10.0, 10.0),
            (f32::NAN, 1.0, 0.1, 10.0),
            (1.0, f32::INFINITY, 0.1, 10.0),
            (1.0, 1.0, 0.1, f32::INFINITY),
        ];
        for (fov, aspect, near, far) in bad {
            assert!(matches!(
                Mat4::perspective_fov_lh(fov, aspect, near, far),
                Err(MathError::InvalidProjection { .. })
            ));
        }
    }

    // --- Layout ---

    #[test]
    fn test_memory_layout_is_row_major() {
        assert_eq!(std::mem::size_of::<Mat4>(), 64);
        assert_eq!(std::mem::align_of::<Mat4>(), std::mem::align_of::<f32>());

        let m = Mat4::from_array(std::array::from_fn(|i| i as f32));
        assert_eq!(m.rows[1][2], 6.0);
        assert_eq!(m.as_array()[6], 6.0);

        let translated = Mat4::from_translation(Vec3::new(7.0, 8.0, 9.0));
        assert_eq!(&translated.as_array()[12..], &[7.0, 8.0, 9.0, 1.0]);

        let bytes = translated.as_bytes();
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[48..52], &7.0_f32.to_ne_bytes());
    }
}
