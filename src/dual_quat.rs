use crate::buffer::Encoding;
use crate::{Mat4, Quat, Scalar, Vec3};

/// Dual quaternion: a rigid-body transform (rotation + translation).
///
/// `real` carries the rotation (unit-length for a valid transform), `dual`
/// encodes the translation coupled with `real`; a valid rigid transform
/// satisfies `real.dot(dual) ≈ 0`. Arithmetic does not re-establish these
/// invariants automatically; [`normalize`](Self::normalize) and the
/// constructors do, at transform-construction boundaries.
///
/// Composition and interpolation stay on the rigid-motion manifold, which
/// is what makes this representation preferable to separate matrix
/// decomposition for animation blending and skeletal propagation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DualQuat<S> {
    pub real: Quat<S>,
    pub dual: Quat<S>,
}

impl<S: Scalar> DualQuat<S> {
    /// The identity transform: real = (0,0,0,1), dual = (0,0,0,0)
    #[inline]
    pub fn identity() -> Self {
        Self {
            real: Quat::identity(),
            dual: Quat::zero(),
        }
    }

    /// Construct from eight components, `[rx,ry,rz,rw, dx,dy,dz,dw]` order.
    /// No normalization is performed.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(rx: S, ry: S, rz: S, rw: S, dx: S, dy: S, dz: S, dw: S) -> Self {
        Self {
            real: Quat::new(rw, rx, ry, rz),
            dual: Quat::new(dw, dx, dy, dz),
        }
    }

    /// Construct from parts. No normalization is performed.
    #[inline]
    pub fn from_real_dual(real: Quat<S>, dual: Quat<S>) -> Self {
        Self { real, dual }
    }

    /// Build the rigid transform that rotates by `r` and then translates by `t`.
    ///
    /// `real = normalize(r)`, `dual = ½ · (0; t) ⊗ real`.
    pub fn from_translation_rotation(t: Vec3<S>, r: Quat<S>) -> Self {
        let real = r.normalize();
        let dual = Quat::from_vec(t).mul(&real).scale(S::HALF);
        Self { real, dual }
    }

    /// Recover the translation vector: vector part of `2 · dual ⊗ conj(real)`
    pub fn translation(&self) -> Vec3<S> {
        self.dual.mul(&self.real.conjugate()).scale(S::TWO).v
    }

    /// Copy of the rotation quaternion
    #[inline]
    pub fn rotation(&self) -> Quat<S> {
        self.real
    }

    /// Compose rigid transforms: apply `self` first, then `other`.
    ///
    /// `real = other.real ⊗ self.real`,
    /// `dual = other.dual ⊗ self.real + other.real ⊗ self.dual`.
    /// The operand order is load-bearing; dual-quaternion multiplication is
    /// non-commutative and the reversed order yields a plausible-looking but
    /// wrong transform chain.
    pub fn mul(&self, other: &DualQuat<S>) -> DualQuat<S> {
        DualQuat {
            real: other.real.mul(&self.real),
            dual: other.dual.mul(&self.real).add(&other.real.mul(&self.dual)),
        }
    }

    /// Rescale by the squared magnitude of the real part.
    ///
    /// Both parts are divided by `dot(real, real)`, the squared magnitude,
    /// deliberately not its square root; callers relying on unit-length
    /// `real` must construct through [`from_translation_rotation`](Self::from_translation_rotation).
    /// If the squared magnitude is not above `S::EPSILON` the value is
    /// returned unscaled.
    pub fn normalize(&self) -> Self {
        let m = self.real.dot(&self.real);
        if m > S::EPSILON {
            let inv = m.recip();
            Self {
                real: self.real.scale(inv),
                dual: self.dual.scale(inv),
            }
        } else {
            *self
        }
    }

    /// Conjugate both parts independently
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            real: self.real.conjugate(),
            dual: self.dual.conjugate(),
        }
    }

    /// Scale all eight components
    #[inline]
    pub fn scale(&self, s: S) -> Self {
        Self {
            real: self.real.scale(s),
            dual: self.dual.scale(s),
        }
    }

    /// Component-wise sum of both parts
    #[inline]
    pub fn add(&self, other: &DualQuat<S>) -> Self {
        Self {
            real: self.real.add(&other.real),
            dual: self.dual.add(&other.dual),
        }
    }

    /// Logarithm map into screw tangent space.
    ///
    /// `real' = log(real)`, `dual' = (conj(real) ⊗ dual) · k²` with
    /// `k = 1/|real|`. Supports [`pow`](Self::pow) and ScLERP.
    pub fn log(&self) -> Self {
        let k = self.real.norm().recip();
        Self {
            real: self.real.log(),
            dual: self.real.conjugate().mul(&self.dual).scale(k * k),
        }
    }

    /// Exponential map back from screw tangent space.
    ///
    /// `real' = exp(real)`, `dual' = real' ⊗ dual`.
    pub fn exp(&self) -> Self {
        let real = self.real.exp();
        let dual = real.mul(&self.dual);
        Self { real, dual }
    }

    /// Screw-motion power: `exp(p · log(self))`
    pub fn pow(&self, p: S) -> Self {
        self.log().scale(p).exp()
    }

    /// Screw linear interpolation from `self` (s = 0) to `other` (s = 1).
    ///
    /// Constant-speed interpolation along the helical path between two rigid
    /// transforms; reduces to quaternion slerp when both translations are
    /// zero and to linear translation blending for pure translations.
    pub fn sclerp(&self, other: &DualQuat<S>, s: S) -> DualQuat<S> {
        other.mul(&self.conjugate()).pow(s).mul(self).normalize()
    }

    /// Convert to a homogeneous 4x4 matrix (rotation block from `real`,
    /// translation column from [`translation`](Self::translation))
    pub fn to_mat4(&self) -> Mat4<S> {
        Mat4::from_rotation_translation(self.real.to_matrix(), self.translation())
    }

    /// Apply only the rotation
    #[inline]
    pub fn rotate(&self, v: Vec3<S>) -> Vec3<S> {
        self.real.rotate(v)
    }

    /// Apply the full transform: rotation, then translation
    #[inline]
    pub fn transform(&self, v: Vec3<S>) -> Vec3<S> {
        self.translation() + self.real.rotate(v)
    }

    /// Components in serialized order `[rx,ry,rz,rw, dx,dy,dz,dw]`
    pub fn as_array(&self) -> [S; 8] {
        let r = self.real.as_array();
        let d = self.dual.as_array();
        [r[0], r[1], r[2], r[3], d[0], d[1], d[2], d[3]]
    }

    /// Construct from a slice in serialized order (panics if len < 8)
    #[inline]
    pub fn from_slice(s: &[S]) -> Self {
        Self::read_slice(s, 0)
    }

    /// Read eight components starting at `offset` (panics if out of range)
    pub fn read_slice(s: &[S], offset: usize) -> Self {
        Self {
            real: Quat::read_slice(s, offset),
            dual: Quat::read_slice(s, offset + 4),
        }
    }

    /// Write eight components starting at `offset` (panics if out of range)
    pub fn write_slice(&self, out: &mut [S], offset: usize) {
        self.real.write_slice(out, offset);
        self.dual.write_slice(out, offset + 4);
    }

    /// Write eight components as raw bytes at byte offset `offset`
    pub fn write_buffer(&self, enc: Encoding, buf: &mut [u8], offset: usize) {
        self.real.write_buffer(enc, buf, offset);
        self.dual.write_buffer(enc, buf, offset + 4 * enc.width());
    }

    /// Read eight components from raw bytes at byte offset `offset`
    pub fn read_buffer(enc: Encoding, buf: &[u8], offset: usize) -> Self {
        Self {
            real: Quat::read_buffer(enc, buf, offset),
            dual: Quat::read_buffer(enc, buf, offset + 4 * enc.width()),
        }
    }
}

impl<S: Scalar> Default for DualQuat<S> {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_eq(a: Vec3<f64>, b: Vec3<f64>) {
        assert!((a.x - b.x).abs() < 1e-10, "{} vs {}", a, b);
        assert!((a.y - b.y).abs() < 1e-10, "{} vs {}", a, b);
        assert!((a.z - b.z).abs() < 1e-10, "{} vs {}", a, b);
    }

    #[test]
    fn identity_transform_is_identity() {
        let dq = DualQuat::<f64>::identity();
        let v = Vec3::new(1.5, -2.0, 3.25);
        assert_eq!(dq.transform(v), v);
    }

    #[test]
    fn transform_of_origin_is_translation() {
        let t = Vec3::new(1.0, 2.0, 3.0);
        let r = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 0.5).normalize(), 0.8);
        let dq = DualQuat::from_translation_rotation(t, r);
        assert_vec3_eq(dq.transform(Vec3::zero()), t);
    }

    #[test]
    fn translation_roundtrip() {
        let t = Vec3::new(-4.0, 0.5, 9.0);
        let r = Quat::from_axis_angle(Vec3::y(), 1.3);
        let dq = DualQuat::from_translation_rotation(t, r);
        assert_vec3_eq(dq.translation(), t);
    }

    #[test]
    fn real_dual_orthogonality() {
        let t = Vec3::new(2.0, -1.0, 0.5);
        let r = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 1.0).normalize(), 0.7);
        let dq = DualQuat::from_translation_rotation(t, r);
        assert!(dq.real.dot(&dq.dual).abs() < 1e-10);
    }

    #[test]
    fn transform_matches_rotate_then_translate() {
        let t = Vec3::new(1.0, 0.0, -2.0);
        let r = Quat::from_axis_angle(Vec3::z(), 0.5);
        let dq = DualQuat::from_translation_rotation(t, r);
        let v = Vec3::new(3.0, 4.0, 5.0);
        assert_vec3_eq(dq.transform(v), r.rotate(v) + t);
    }

    #[test]
    fn mul_applies_self_first() {
        let a = DualQuat::from_translation_rotation(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(Vec3::z(), 0.4),
        );
        let b = DualQuat::from_translation_rotation(
            Vec3::new(0.0, 2.0, 0.0),
            Quat::from_axis_angle(Vec3::x(), -0.9),
        );
        let v = Vec3::new(1.0, 1.0, 1.0);
        let composed = a.mul(&b).transform(v);
        let sequential = b.transform(a.transform(v));
        assert_vec3_eq(composed, sequential);
    }

    #[test]
    fn normalize_divides_by_squared_magnitude() {
        // real part of norm 2: normalize scales by 1/4, not 1/2
        let dq = DualQuat::from_real_dual(Quat::new(2.0, 0.0, 0.0, 0.0), Quat::zero());
        let n = dq.normalize();
        assert!((n.real.norm() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn normalize_degenerate_returns_unscaled() {
        let dq = DualQuat::from_real_dual(Quat::new(1e-12, 0.0, 0.0, 0.0), Quat::zero());
        assert_eq!(dq.normalize(), dq);
    }

    #[test]
    fn conjugate_of_unit_is_inverse_rotation() {
        let r = Quat::from_axis_angle(Vec3::x(), 0.6);
        let dq = DualQuat::from_translation_rotation(Vec3::zero(), r);
        let id = dq.mul(&dq.conjugate());
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec3_eq(id.transform(v), v);
    }

    #[test]
    fn log_exp_roundtrip() {
        let dq = DualQuat::from_translation_rotation(
            Vec3::new(0.5, -1.0, 2.0),
            Quat::from_axis_angle(Vec3::new(1.0, 0.5, -0.5).normalize(), 0.9),
        );
        let back = dq.log().exp();
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec3_eq(back.transform(v), dq.transform(v));
    }

    #[test]
    fn pow_one_is_identity_map() {
        let dq = DualQuat::from_translation_rotation(
            Vec3::new(2.0, 0.0, 1.0),
            Quat::from_axis_angle(Vec3::y(), 0.8),
        );
        let p = dq.pow(1.0);
        let v = Vec3::new(0.5, 0.5, 0.5);
        assert_vec3_eq(p.transform(v), dq.transform(v));
    }

    #[test]
    fn sclerp_endpoints() {
        let a = DualQuat::from_translation_rotation(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_axis_angle(Vec3::z(), 0.3),
        );
        let b = DualQuat::from_translation_rotation(
            Vec3::new(-2.0, 0.0, 1.0),
            Quat::from_axis_angle(Vec3::x(), 1.1),
        );
        let v = Vec3::new(1.0, -1.0, 0.5);
        assert_vec3_eq(a.sclerp(&b, 0.0).transform(v), a.transform(v));
        assert_vec3_eq(a.sclerp(&b, 1.0).transform(v), b.transform(v));
    }

    #[test]
    fn sclerp_pure_translation_is_linear() {
        let a = DualQuat::<f64>::identity();
        let b = DualQuat::from_translation_rotation(Vec3::new(2.0, -4.0, 6.0), Quat::identity());
        let mid = a.sclerp(&b, 0.5);
        assert_vec3_eq(mid.translation(), Vec3::new(1.0, -2.0, 3.0));
        let quarter = a.sclerp(&b, 0.25);
        assert_vec3_eq(quarter.translation(), Vec3::new(0.5, -1.0, 1.5));
    }

    #[test]
    fn sclerp_zero_translation_matches_slerp() {
        let r1 = Quat::from_axis_angle(Vec3::z(), 0.2);
        let r2 = Quat::from_axis_angle(Vec3::z(), 1.0);
        let a = DualQuat::from_translation_rotation(Vec3::zero(), r1);
        let b = DualQuat::from_translation_rotation(Vec3::zero(), r2);
        let s = 0.37;
        let v = Vec3::new(1.0, 2.0, 0.0);
        let via_sclerp = a.sclerp(&b, s).rotate(v);
        let via_slerp = r1.slerp(&r2, s).rotate(v);
        assert_vec3_eq(via_sclerp, via_slerp);
    }

    #[test]
    fn sclerp_constant_speed() {
        // screw interpolation advances the rotation angle linearly
        let a = DualQuat::from_translation_rotation(Vec3::zero(), Quat::identity());
        let b = DualQuat::from_translation_rotation(
            Vec3::new(0.0, 0.0, 4.0),
            Quat::from_axis_angle(Vec3::z(), 1.2),
        );
        let third = a.sclerp(&b, 1.0 / 3.0);
        let expected_rot = Quat::from_axis_angle(Vec3::z(), 0.4);
        assert!((third.rotation().dot(&expected_rot).abs() - 1.0).abs() < 1e-10);
        assert_vec3_eq(third.translation(), Vec3::new(0.0, 0.0, 4.0 / 3.0));
    }

    #[test]
    fn to_mat4_matches_transform() {
        let dq = DualQuat::from_translation_rotation(
            Vec3::new(1.0, -2.0, 0.5),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 1.0).normalize(), 0.7),
        );
        let m = dq.to_mat4();
        let v = Vec3::new(2.0, 3.0, -1.0);
        assert_vec3_eq(m.transform_point(v), dq.transform(v));
        // flat layout: translation at 12..14, corner at 15
        let a = m.to_cols_array();
        assert_vec3_eq(Vec3::new(a[12], a[13], a[14]), dq.translation());
        assert_eq!(a[15], 1.0);
    }

    #[test]
    fn default_is_identity() {
        let dq = DualQuat::<f64>::default();
        assert_eq!(dq.real, Quat::identity());
        assert_eq!(dq.dual, Quat::zero());
    }

    #[test]
    fn array_layout_and_roundtrip() {
        let dq = DualQuat::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        assert_eq!(dq.as_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let mut out = [0.0; 10];
        dq.write_slice(&mut out, 1);
        assert_eq!(DualQuat::read_slice(&out, 1), dq);
    }

    #[test]
    fn buffer_roundtrip_f64_bit_exact() {
        let dq = DualQuat::from_translation_rotation(
            Vec3::new(0.1, 0.2, 0.3),
            Quat::from_axis_angle(Vec3::x(), 0.4),
        );
        let mut buf = [0u8; 72];
        dq.write_buffer(Encoding::F64Le, &mut buf, 8);
        assert_eq!(DualQuat::<f64>::read_buffer(Encoding::F64Le, &buf, 8), dq);
    }

    #[test]
    fn rotate_ignores_translation() {
        let dq = DualQuat::from_translation_rotation(
            Vec3::new(100.0, 100.0, 100.0),
            Quat::from_axis_angle(Vec3::z(), std::f64::consts::FRAC_PI_2),
        );
        let r = dq.rotate(Vec3::new(1.0, 0.0, 0.0));
        assert_vec3_eq(r, Vec3::new(0.0, 1.0, 0.0));
    }
}
