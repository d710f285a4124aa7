use crate::buffer::{self, Encoding};
use crate::{Mat4, Scalar};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3<S> {
    pub x: S,
    pub y: S,
    pub z: S,
}

impl<S: Scalar> Vec3<S> {
    #[inline]
    pub fn new(x: S, y: S, z: S) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(S::ZERO, S::ZERO, S::ZERO)
    }

    /// One value fills all components
    #[inline]
    pub fn splat(v: S) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn x() -> Self {
        Self::new(S::ONE, S::ZERO, S::ZERO)
    }

    #[inline]
    pub fn y() -> Self {
        Self::new(S::ZERO, S::ONE, S::ZERO)
    }

    #[inline]
    pub fn z() -> Self {
        Self::new(S::ZERO, S::ZERO, S::ONE)
    }

    /// Barycentric combination: `v1 + (v2-v1)*f + (v3-v1)*g`
    pub fn from_barycentric(v1: Self, v2: Self, v3: Self, f: S, g: S) -> Self {
        v1 + (v2 - v1) * f + (v3 - v1) * g
    }

    /// Overwrite all components in place
    #[inline]
    pub fn set(&mut self, x: S, y: S, z: S) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> S {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[inline]
    pub fn norm_sq(self) -> S {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> S {
        self.norm_sq().sqrt()
    }

    /// Unit-length copy.
    ///
    /// If `norm_sq < S::EPSILON` the vector is returned unchanged; the
    /// degenerate fallback is a policy, not an error. The `>=` comparator
    /// at the threshold is part of the contract.
    #[inline]
    pub fn normalize(self) -> Self {
        let n2 = self.norm_sq();
        if n2 >= S::EPSILON {
            self * n2.sqrt().recip()
        } else {
            self
        }
    }

    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        let n = self.norm();
        if n > S::EPSILON {
            Some(self / n)
        } else {
            None
        }
    }

    /// Rescale so the length lands in `[min, max]`.
    ///
    /// A zero-length input divides by zero (NaN components); guarding is
    /// the caller's responsibility.
    pub fn clamp_length(self, min: S, max: S) -> Self {
        let len = self.norm();
        self * (len.clamp(min, max) / len)
    }

    /// Reflect across the plane with normal `n`: `self - n*(2*dot(self,n))`
    pub fn reflect(self, n: Self) -> Self {
        self - n * (S::TWO * self.dot(n))
    }

    /// One Gram-Schmidt step over `self` and `other`, in place.
    ///
    /// `self` is replaced by its normalized copy unconditionally. If the
    /// residual of `other` after removing its projection onto `self` has
    /// non-zero length, `other` is replaced by the normalized residual and
    /// the call returns true. Otherwise `other` is left untouched and the
    /// call returns false; note `self` has still been normalized.
    pub fn orthonormalize(&mut self, other: &mut Self) -> bool {
        let v1 = self.normalize();
        *self = v1;
        let residual = *other - v1 * v1.dot(*other);
        let n = residual.norm();
        if n > S::ZERO {
            *other = residual / n;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: S) -> Self {
        self * (S::ONE - t) + other * t
    }

    /// Returns the element-wise product (Hadamard product)
    #[inline]
    pub fn hadamard(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Homogeneous point transform: `m * (x, y, z, 1)`
    #[inline]
    pub fn transform(self, m: &Mat4<S>) -> Self {
        m.transform_point(self)
    }

    /// Extend to Vec4 with a given w component
    #[inline]
    pub fn extend(self, w: S) -> crate::Vec4<S> {
        crate::Vec4::new(self.x, self.y, self.z, w)
    }

    /// Construct from a slice (panics if len < 3)
    #[inline]
    pub fn from_slice(s: &[S]) -> Self {
        Self::read_slice(s, 0)
    }

    #[inline]
    pub fn as_array(&self) -> [S; 3] {
        [self.x, self.y, self.z]
    }

    /// Read `[x, y, z]` starting at `offset` (panics if out of range)
    #[inline]
    pub fn read_slice(s: &[S], offset: usize) -> Self {
        Self::new(s[offset], s[offset + 1], s[offset + 2])
    }

    /// Write `[x, y, z]` starting at `offset` (panics if out of range)
    #[inline]
    pub fn write_slice(&self, out: &mut [S], offset: usize) {
        out[offset] = self.x;
        out[offset + 1] = self.y;
        out[offset + 2] = self.z;
    }

    /// Write `[x, y, z]` as raw bytes at byte offset `offset`
    pub fn write_buffer(&self, enc: Encoding, buf: &mut [u8], offset: usize) {
        let w = enc.width();
        buffer::write_scalar(enc, buf, offset, self.x);
        buffer::write_scalar(enc, buf, offset + w, self.y);
        buffer::write_scalar(enc, buf, offset + 2 * w, self.z);
    }

    /// Read `[x, y, z]` from raw bytes at byte offset `offset`
    pub fn read_buffer(enc: Encoding, buf: &[u8], offset: usize) -> Self {
        let w = enc.width();
        Self::new(
            buffer::read_scalar(enc, buf, offset),
            buffer::read_scalar(enc, buf, offset + w),
            buffer::read_scalar(enc, buf, offset + 2 * w),
        )
    }
}

impl<S: Scalar> Default for Vec3<S> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<S: Scalar> From<[S; 3]> for Vec3<S> {
    fn from(a: [S; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl<S: Scalar> From<Vec3<S>> for [S; 3] {
    fn from(v: Vec3<S>) -> Self {
        [v.x, v.y, v.z]
    }
}

impl<S: Scalar> Add for Vec3<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<S: Scalar> Sub for Vec3<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<S: Scalar> Neg for Vec3<S> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<S: Scalar> Mul<S> for Vec3<S> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: S) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<S: Scalar> Div<S> for Vec3<S> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: S) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<S: Scalar> AddAssign for Vec3<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<S: Scalar> SubAssign for Vec3<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<S: Scalar> MulAssign<S> for Vec3<S> {
    #[inline]
    fn mul_assign(&mut self, rhs: S) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

// Scalar * Vec3 (commutative)
impl Mul<Vec3<f64>> for f64 {
    type Output = Vec3<f64>;
    #[inline]
    fn mul(self, rhs: Vec3<f64>) -> Vec3<f64> {
        rhs * self
    }
}

impl Mul<Vec3<f32>> for f32 {
    type Output = Vec3<f32>;
    #[inline]
    fn mul(self, rhs: Vec3<f32>) -> Vec3<f32> {
        rhs * self
    }
}

impl<S: Scalar> core::fmt::Display for Vec3<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
