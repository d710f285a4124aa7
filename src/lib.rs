//! screw: dual-quaternion algebra for rigid-body transforms
//!
//! Value types (3/4-component vectors, quaternions, dual quaternions) and
//! the operations to construct, compose, and interpolate rigid motions:
//! Hamilton products, log/exp maps, screw linear interpolation (ScLERP),
//! matrix conversion, and flat array/byte-buffer serialization for
//! animation assets and GPU upload.
//!
//! # Design principles
//! - Generic over `Scalar` type (f32, f64, Dual<S> for autodiff)
//! - `#[repr(C)]` everywhere for GPU interop
//! - Plain value semantics: operations return new values; in-place
//!   mutation only through explicit `set`/`read_*`/`orthonormalize`
//! - No panics in the algebra: degenerate inputs take documented
//!   epsilon-threshold fallbacks instead of errors

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod scalar;
mod vec3;
mod vec4;
mod mat3;
mod mat4;
mod quat;
mod dual_quat;
mod dual;
pub mod buffer;

pub use scalar::Scalar;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use quat::Quat;
pub use dual_quat::DualQuat;
pub use dual::Dual;
pub use buffer::Encoding;

// Bytemuck impls for concrete f32/f64 types (generic structs can't derive Pod)
#[cfg(feature = "bytemuck")]
mod bytemuck_impls {
    use super::*;

    macro_rules! impl_pod {
        ($t:ty) => {
            // SAFETY: All fields are the same float type, #[repr(C)], no padding
            unsafe impl bytemuck::Zeroable for $t {}
            unsafe impl bytemuck::Pod for $t {}
        };
    }

    impl_pod!(Vec3<f32>);
    impl_pod!(Vec3<f64>);
    impl_pod!(Vec4<f32>);
    impl_pod!(Vec4<f64>);
    impl_pod!(Mat3<f32>);
    impl_pod!(Mat3<f64>);
    impl_pod!(Mat4<f32>);
    impl_pod!(Mat4<f64>);
    impl_pod!(Quat<f32>);
    impl_pod!(Quat<f64>);
    impl_pod!(DualQuat<f32>);
    impl_pod!(DualQuat<f64>);
}
