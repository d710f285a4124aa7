use crate::{Mat3, Scalar, Vec3, Vec4};
use core::ops::Mul;

/// 4x4 homogeneous transform matrix, column-major storage.
///
/// The flat serialized form ([`to_cols_array`](Self::to_cols_array)) is the
/// OpenGL-style 16-element column-major layout: rotation block in elements
/// 0..11, translation in 12..14, element 15 = 1 for a rigid transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4<S> {
    pub c0: Vec4<S>,
    pub c1: Vec4<S>,
    pub c2: Vec4<S>,
    pub c3: Vec4<S>,
}

impl<S: Scalar> Mat4<S> {
    /// Construct from elements in row-major argument order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        m00: S, m01: S, m02: S, m03: S,
        m10: S, m11: S, m12: S, m13: S,
        m20: S, m21: S, m22: S, m23: S,
        m30: S, m31: S, m32: S, m33: S,
    ) -> Self {
        Self {
            c0: Vec4::new(m00, m10, m20, m30),
            c1: Vec4::new(m01, m11, m21, m31),
            c2: Vec4::new(m02, m12, m22, m32),
            c3: Vec4::new(m03, m13, m23, m33),
        }
    }

    #[inline]
    pub fn from_cols(c0: Vec4<S>, c1: Vec4<S>, c2: Vec4<S>, c3: Vec4<S>) -> Self {
        Self { c0, c1, c2, c3 }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(
            S::ONE,  S::ZERO, S::ZERO, S::ZERO,
            S::ZERO, S::ONE,  S::ZERO, S::ZERO,
            S::ZERO, S::ZERO, S::ONE,  S::ZERO,
            S::ZERO, S::ZERO, S::ZERO, S::ONE,
        )
    }

    /// Build from rotation (3x3) and translation
    pub fn from_rotation_translation(rot: Mat3<S>, trans: Vec3<S>) -> Self {
        Self::new(
            rot.c0.x, rot.c1.x, rot.c2.x, trans.x,
            rot.c0.y, rot.c1.y, rot.c2.y, trans.y,
            rot.c0.z, rot.c1.z, rot.c2.z, trans.z,
            S::ZERO,  S::ZERO,  S::ZERO,  S::ONE,
        )
    }

    /// Translation matrix
    pub fn translation(dx: S, dy: S, dz: S) -> Self {
        Self::from_rotation_translation(Mat3::identity(), Vec3::new(dx, dy, dz))
    }

    /// Rotation about Z axis
    pub fn rotation_z(angle: S) -> Self {
        Self::from_rotation_translation(Mat3::rotation_z(angle), Vec3::zero())
    }

    /// Element access (row, col)
    pub fn get(&self, row: usize, col: usize) -> S {
        let c = match col {
            0 => &self.c0,
            1 => &self.c1,
            2 => &self.c2,
            _ => &self.c3,
        };
        match row {
            0 => c.x,
            1 => c.y,
            2 => c.z,
            _ => c.w,
        }
    }

    /// Extract the upper-left 3x3 submatrix
    #[inline]
    pub fn upper_left_3x3(&self) -> Mat3<S> {
        Mat3::from_cols(self.c0.truncate(), self.c1.truncate(), self.c2.truncate())
    }

    /// Extract the translation column
    #[inline]
    pub fn translation_vec(&self) -> Vec3<S> {
        self.c3.truncate()
    }

    /// Matrix-Vec4 product
    #[inline]
    pub fn mul_vec4(&self, v: Vec4<S>) -> Vec4<S> {
        self.c0 * v.x + self.c1 * v.y + self.c2 * v.z + self.c3 * v.w
    }

    /// Transform a point (w=1, includes translation)
    #[inline]
    pub fn transform_point(&self, p: Vec3<S>) -> Vec3<S> {
        self.mul_vec4(p.extend(S::ONE)).truncate()
    }

    /// Transform a vector (w=0, ignores translation)
    #[inline]
    pub fn transform_vec(&self, v: Vec3<S>) -> Vec3<S> {
        self.mul_vec4(v.extend(S::ZERO)).truncate()
    }

    /// Matrix-matrix product
    pub fn mul_mat(&self, rhs: &Mat4<S>) -> Mat4<S> {
        Mat4::from_cols(
            self.mul_vec4(rhs.c0),
            self.mul_vec4(rhs.c1),
            self.mul_vec4(rhs.c2),
            self.mul_vec4(rhs.c3),
        )
    }

    /// Flat 16-element column-major layout (translation at 12..14)
    pub fn to_cols_array(&self) -> [S; 16] {
        [
            self.c0.x, self.c0.y, self.c0.z, self.c0.w,
            self.c1.x, self.c1.y, self.c1.z, self.c1.w,
            self.c2.x, self.c2.y, self.c2.z, self.c2.w,
            self.c3.x, self.c3.y, self.c3.z, self.c3.w,
        ]
    }

    /// Inverse of [`to_cols_array`](Self::to_cols_array)
    pub fn from_cols_array(a: &[S; 16]) -> Self {
        Self::from_cols(
            Vec4::new(a[0], a[1], a[2], a[3]),
            Vec4::new(a[4], a[5], a[6], a[7]),
            Vec4::new(a[8], a[9], a[10], a[11]),
            Vec4::new(a[12], a[13], a[14], a[15]),
        )
    }
}

impl<S: Scalar> Default for Mat4<S> {
    fn default() -> Self {
        Self::identity()
    }
}

// Mat4 * Vec4
impl<S: Scalar> Mul<Vec4<S>> for Mat4<S> {
    type Output = Vec4<S>;
    #[inline]
    fn mul(self, rhs: Vec4<S>) -> Vec4<S> {
        self.mul_vec4(rhs)
    }
}

// Mat4 * Mat4
impl<S: Scalar> Mul for Mat4<S> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}
