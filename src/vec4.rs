use crate::buffer::{self, Encoding};
use crate::Scalar;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4<S> {
    pub x: S,
    pub y: S,
    pub z: S,
    pub w: S,
}

impl<S: Scalar> Vec4<S> {
    #[inline]
    pub fn new(x: S, y: S, z: S, w: S) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(S::ZERO, S::ZERO, S::ZERO, S::ZERO)
    }

    /// One value fills all components
    #[inline]
    pub fn splat(v: S) -> Self {
        Self::new(v, v, v, v)
    }

    /// Barycentric combination: `v1 + (v2-v1)*f + (v3-v1)*g`
    pub fn from_barycentric(v1: Self, v2: Self, v3: Self, f: S, g: S) -> Self {
        v1 + (v2 - v1) * f + (v3 - v1) * g
    }

    /// Overwrite all components in place
    #[inline]
    pub fn set(&mut self, x: S, y: S, z: S, w: S) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> S {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    #[inline]
    pub fn norm_sq(self) -> S {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> S {
        self.norm_sq().sqrt()
    }

    /// Unit-length copy; inputs with `norm_sq < S::EPSILON` are returned
    /// unchanged (same fallback policy as [`Vec3::normalize`](crate::Vec3::normalize)).
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

    /// Rescale so the length lands in `[min, max]`. Divides by zero on a
    /// zero-length input; the caller must guard.
    pub fn clamp_length(self, min: S, max: S) -> Self {
        let len = self.norm();
        self * (len.clamp(min, max) / len)
    }

    /// Reflect across the hyperplane with normal `n`
    pub fn reflect(self, n: Self) -> Self {
        self - n * (S::TWO * self.dot(n))
    }

    #[inline]
    pub fn lerp(self, other: Self, t: S) -> Self {
        self * (S::ONE - t) + other * t
    }

    /// Returns the element-wise product (Hadamard product)
    #[inline]
    pub fn hadamard(self, other: Self) -> Self {
        Self::new(
            self.x * other.x,
            self.y * other.y,
            self.z * other.z,
            self.w * other.w,
        )
    }

    /// Truncate to Vec3 (drop w)
    #[inline]
    pub fn truncate(self) -> crate::Vec3<S> {
        crate::Vec3::new(self.x, self.y, self.z)
    }

    /// Construct from a slice (panics if len < 4)
    #[inline]
    pub fn from_slice(s: &[S]) -> Self {
        Self::read_slice(s, 0)
    }

    #[inline]
    pub fn as_array(&self) -> [S; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Read `[x, y, z, w]` starting at `offset` (panics if out of range)
    #[inline]
    pub fn read_slice(s: &[S], offset: usize) -> Self {
        Self::new(s[offset], s[offset + 1], s[offset + 2], s[offset + 3])
    }

    /// Write `[x, y, z, w]` starting at `offset` (panics if out of range)
    #[inline]
    pub fn write_slice(&self, out: &mut [S], offset: usize) {
        out[offset] = self.x;
        out[offset + 1] = self.y;
        out[offset + 2] = self.z;
        out[offset + 3] = self.w;
    }

    /// Write `[x, y, z, w]` as raw bytes at byte offset `offset`
    pub fn write_buffer(&self, enc: Encoding, buf: &mut [u8], offset: usize) {
        let w = enc.width();
        buffer::write_scalar(enc, buf, offset, self.x);
        buffer::write_scalar(enc, buf, offset + w, self.y);
        buffer::write_scalar(enc, buf, offset + 2 * w, self.z);
        buffer::write_scalar(enc, buf, offset + 3 * w, self.w);
    }

    /// Read `[x, y, z, w]` from raw bytes at byte offset `offset`
    pub fn read_buffer(enc: Encoding, buf: &[u8], offset: usize) -> Self {
        let w = enc.width();
        Self::new(
            buffer::read_scalar(enc, buf, offset),
            buffer::read_scalar(enc, buf, offset + w),
            buffer::read_scalar(enc, buf, offset + 2 * w),
            buffer::read_scalar(enc, buf, offset + 3 * w),
        )
    }
}

impl<S: Scalar> Default for Vec4<S> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<S: Scalar> From<[S; 4]> for Vec4<S> {
    fn from(a: [S; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

impl<S: Scalar> From<Vec4<S>> for [S; 4] {
    fn from(v: Vec4<S>) -> Self {
        [v.x, v.y, v.z, v.w]
    }
}

impl<S: Scalar> Add for Vec4<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl<S: Scalar> Sub for Vec4<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl<S: Scalar> Neg for Vec4<S> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl<S: Scalar> Mul<S> for Vec4<S> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: S) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl<S: Scalar> Div<S> for Vec4<S> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: S) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs)
    }
}

impl<S: Scalar> AddAssign for Vec4<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.w += rhs.w;
    }
}

impl<S: Scalar> SubAssign for Vec4<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
        self.w -= rhs.w;
    }
}

impl<S: Scalar> MulAssign<S> for Vec4<S> {
    #[inline]
    fn mul_assign(&mut self, rhs: S) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
        self.w *= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_product() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(a.dot(b), 70.0); // 5+12+21+32
    }

    #[test]
    fn normalize_unit_length() {
        let v = Vec4::new(1.0, 2.0, 2.0, 0.0);
        let n = v.normalize();
        assert!((n.norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_degenerate_returns_input() {
        let v = Vec4::new(0.0, 1e-12_f64, 0.0, 0.0);
        assert_eq!(v.normalize(), v);
    }

    #[test]
    fn clamp_length_raises_to_floor() {
        let v = Vec4::new(0.0, 0.0, 0.0, 3.0);
        assert_eq!(v.clamp_length(4.0, 5.0), Vec4::new(0.0, 0.0, 0.0, 4.0));
    }

    #[test]
    fn reflect_involution() {
        let v = Vec4::new(1.0, -2.0, 3.0, 0.5);
        let n = Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert_eq!(v.reflect(n).reflect(n), v);
    }

    #[test]
    fn truncate_and_extend() {
        let v4 = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let v3 = v4.truncate();
        assert_eq!(v3, crate::Vec3::new(1.0, 2.0, 3.0));
        let v4b = v3.extend(4.0);
        assert_eq!(v4, v4b);
    }

    #[test]
    fn add_assign() {
        let mut a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        a += Vec4::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a, Vec4::new(11.0, 22.0, 33.0, 44.0));
    }

    #[test]
    fn lerp_midpoint() {
        let a = Vec4::new(0.0, 0.0, 0.0, 0.0);
        let b = Vec4::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a.lerp(b, 0.5), Vec4::new(5.0, 10.0, 15.0, 20.0));
    }

    #[test]
    fn slice_roundtrip_with_offset() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let mut out = [0.0; 6];
        v.write_slice(&mut out, 1);
        assert_eq!(out, [0.0, 1.0, 2.0, 3.0, 4.0, 0.0]);
        assert_eq!(Vec4::read_slice(&out, 1), v);
    }

    #[test]
    fn buffer_roundtrip_f64_bit_exact() {
        let v = Vec4::new(0.1, -0.2, 0.3, -0.4);
        let mut buf = [0u8; 32];
        v.write_buffer(Encoding::F64Le, &mut buf, 0);
        let back = Vec4::<f64>::read_buffer(Encoding::F64Le, &buf, 0);
        assert_eq!(v, back);
    }

    #[test]
    fn hadamard_componentwise() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(2.0, 2.0, 2.0, 2.0);
        assert_eq!(a.hadamard(b), Vec4::new(2.0, 4.0, 6.0, 8.0));
    }
}
