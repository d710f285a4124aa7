use crate::buffer::{self, Encoding};
use crate::{Mat3, Scalar, Vec3};

/// Quaternion: w + xi + yj + zk
///
/// Stored as scalar part `w` and vector part `v = (x, y, z)`.
/// Represents rotations when unit-length. Most operations do not enforce
/// unit length; `normalize` re-establishes it at construction boundaries.
/// The serialized component order is `[x, y, z, w]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat<S> {
    pub w: S,
    pub v: Vec3<S>,
}

impl<S: Scalar> Quat<S> {
    #[inline]
    pub fn new(w: S, x: S, y: S, z: S) -> Self {
        Self {
            w,
            v: Vec3::new(x, y, z),
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            w: S::ONE,
            v: Vec3::zero(),
        }
    }

    /// The zero quaternion (the dual part of an identity rigid transform)
    #[inline]
    pub fn zero() -> Self {
        Self {
            w: S::ZERO,
            v: Vec3::zero(),
        }
    }

    /// A pure (vector) quaternion: w = 0
    #[inline]
    pub fn from_vec(v: Vec3<S>) -> Self {
        Self { w: S::ZERO, v }
    }

    /// Quaternion from axis-angle representation
    pub fn from_axis_angle(axis: Vec3<S>, angle: S) -> Self {
        let half = angle * S::HALF;
        let (s, c) = half.sin_cos();
        Self { w: c, v: axis * s }
    }

    #[inline]
    pub fn norm_sq(&self) -> S {
        self.w * self.w + self.v.norm_sq()
    }

    #[inline]
    pub fn norm(&self) -> S {
        self.norm_sq().sqrt()
    }

    #[inline]
    pub fn dot(&self, other: &Quat<S>) -> S {
        self.w * other.w + self.v.dot(other.v)
    }

    /// Unit-length copy; inputs with `norm_sq < S::EPSILON` are returned
    /// unchanged (same fallback policy as the vector types).
    pub fn normalize(&self) -> Self {
        let n2 = self.norm_sq();
        if n2 >= S::EPSILON {
            self.scale(n2.sqrt().recip())
        } else {
            *self
        }
    }

    #[inline]
    pub fn add(&self, other: &Quat<S>) -> Quat<S> {
        Quat {
            w: self.w + other.w,
            v: self.v + other.v,
        }
    }

    #[inline]
    pub fn scale(&self, s: S) -> Quat<S> {
        Quat {
            w: self.w * s,
            v: self.v * s,
        }
    }

    /// Quaternion multiplication (Hamilton product)
    pub fn mul(&self, other: &Quat<S>) -> Quat<S> {
        Quat {
            w: self.w * other.w - self.v.dot(other.v),
            v: other.v * self.w + self.v * other.w + self.v.cross(other.v),
        }
    }

    /// Conjugate (inverse for unit quaternions)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            v: -self.v,
        }
    }

    /// Convert to 3x3 rotation matrix
    pub fn to_matrix(&self) -> Mat3<S> {
        let two = S::TWO;
        let x = self.v.x;
        let y = self.v.y;
        let z = self.v.z;
        let w = self.w;

        Mat3::new(
            S::ONE - two * (y * y + z * z), two * (x * y - w * z),         two * (x * z + w * y),
            two * (x * y + w * z),         S::ONE - two * (x * x + z * z), two * (y * z - w * x),
            two * (x * z - w * y),         two * (y * z + w * x),         S::ONE - two * (x * x + y * y),
        )
    }

    /// Convert from rotation matrix (Shepperd's method for numerical stability)
    pub fn from_matrix(m: &Mat3<S>) -> Self {
        let trace = m.trace();
        let half = S::HALF;

        if trace > S::ZERO {
            let s = (trace + S::ONE).sqrt() * S::TWO;
            let inv_s = s.recip();
            Quat::new(
                s * half * half, // s / 4
                (m.get(2, 1) - m.get(1, 2)) * inv_s,
                (m.get(0, 2) - m.get(2, 0)) * inv_s,
                (m.get(1, 0) - m.get(0, 1)) * inv_s,
            )
        } else if m.get(0, 0) > m.get(1, 1) && m.get(0, 0) > m.get(2, 2) {
            let s = (S::ONE + m.get(0, 0) - m.get(1, 1) - m.get(2, 2)).sqrt() * S::TWO;
            let inv_s = s.recip();
            Quat::new(
                (m.get(2, 1) - m.get(1, 2)) * inv_s,
                s * half * half,
                (m.get(0, 1) + m.get(1, 0)) * inv_s,
                (m.get(0, 2) + m.get(2, 0)) * inv_s,
            )
        } else if m.get(1, 1) > m.get(2, 2) {
            let s = (S::ONE + m.get(1, 1) - m.get(0, 0) - m.get(2, 2)).sqrt() * S::TWO;
            let inv_s = s.recip();
            Quat::new(
                (m.get(0, 2) - m.get(2, 0)) * inv_s,
                (m.get(0, 1) + m.get(1, 0)) * inv_s,
                s * half * half,
                (m.get(1, 2) + m.get(2, 1)) * inv_s,
            )
        } else {
            let s = (S::ONE + m.get(2, 2) - m.get(0, 0) - m.get(1, 1)).sqrt() * S::TWO;
            let inv_s = s.recip();
            Quat::new(
                (m.get(1, 0) - m.get(0, 1)) * inv_s,
                (m.get(0, 2) + m.get(2, 0)) * inv_s,
                (m.get(1, 2) + m.get(2, 1)) * inv_s,
                s * half * half,
            )
        }
    }

    /// Exponential of a pure quaternion: `(cos|v|, v·sin|v|/|v|)`.
    ///
    /// Near-zero vector parts (`|v| < EPSILON`) fall back to `(1, v)`, the
    /// first-order expansion. Inverse of [`log`](Self::log) on unit
    /// quaternions with positive scalar part.
    pub fn exp(&self) -> Quat<S> {
        let a = self.v.norm();
        if a < S::EPSILON {
            return Quat { w: S::ONE, v: self.v };
        }
        let (s, c) = a.sin_cos();
        Quat {
            w: c,
            v: self.v * (s / a),
        }
    }

    /// Logarithm of a unit quaternion: `(0, v·θ/|v|)` with `θ = atan2(|v|, w)`.
    ///
    /// Near-identity inputs (`|v| < EPSILON`) fall back to `(0, v)`.
    pub fn log(&self) -> Quat<S> {
        let n = self.v.norm();
        if n < S::EPSILON {
            return Quat { w: S::ZERO, v: self.v };
        }
        let angle = n.atan2(self.w);
        Quat {
            w: S::ZERO,
            v: self.v * (angle / n),
        }
    }

    /// Rotate a vector by this quaternion: q * v * q^-1
    pub fn rotate(&self, v: Vec3<S>) -> Vec3<S> {
        let qv = Quat { w: S::ZERO, v };
        let result = self.mul(&qv).mul(&self.conjugate());
        result.v
    }

    /// Spherical linear interpolation
    pub fn slerp(&self, other: &Quat<S>, t: S) -> Quat<S> {
        let mut dot = self.dot(other);
        let mut other = *other;

        // Ensure shortest path
        if dot < S::ZERO {
            other = Quat {
                w: -other.w,
                v: -other.v,
            };
            dot = -dot;
        }

        // Fall back to lerp for nearly-parallel quaternions
        if dot > S::ONE - S::EPSILON {
            return Quat {
                w: self.w + (other.w - self.w) * t,
                v: self.v + (other.v - self.v) * t,
            }
            .normalize();
        }

        let theta = dot.acos();
        let sin_theta = theta.sin();
        let a = ((S::ONE - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;

        Quat {
            w: self.w * a + other.w * b,
            v: self.v * a + other.v * b,
        }
    }

    /// Components in serialized order `[x, y, z, w]`
    #[inline]
    pub fn as_array(&self) -> [S; 4] {
        [self.v.x, self.v.y, self.v.z, self.w]
    }

    /// Construct from a slice in `[x, y, z, w]` order (panics if len < 4)
    #[inline]
    pub fn from_slice(s: &[S]) -> Self {
        Self::read_slice(s, 0)
    }

    /// Read `[x, y, z, w]` starting at `offset` (panics if out of range)
    #[inline]
    pub fn read_slice(s: &[S], offset: usize) -> Self {
        Self::new(s[offset + 3], s[offset], s[offset + 1], s[offset + 2])
    }

    /// Write `[x, y, z, w]` starting at `offset` (panics if out of range)
    #[inline]
    pub fn write_slice(&self, out: &mut [S], offset: usize) {
        out[offset] = self.v.x;
        out[offset + 1] = self.v.y;
        out[offset + 2] = self.v.z;
        out[offset + 3] = self.w;
    }

    /// Write `[x, y, z, w]` as raw bytes at byte offset `offset`
    pub fn write_buffer(&self, enc: Encoding, buf: &mut [u8], offset: usize) {
        let w = enc.width();
        buffer::write_scalar(enc, buf, offset, self.v.x);
        buffer::write_scalar(enc, buf, offset + w, self.v.y);
        buffer::write_scalar(enc, buf, offset + 2 * w, self.v.z);
        buffer::write_scalar(enc, buf, offset + 3 * w, self.w);
    }

    /// Read `[x, y, z, w]` from raw bytes at byte offset `offset`
    pub fn read_buffer(enc: Encoding, buf: &[u8], offset: usize) -> Self {
        let w = enc.width();
        Self::new(
            buffer::read_scalar(enc, buf, offset + 3 * w),
            buffer::read_scalar(enc, buf, offset),
            buffer::read_scalar(enc, buf, offset + w),
            buffer::read_scalar(enc, buf, offset + 2 * w),
        )
    }
}

impl<S: Scalar> Default for Quat<S> {
    fn default() -> Self {
        Self::identity()
    }
}
