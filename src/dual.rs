use crate::Scalar;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Forward-mode automatic differentiation via dual numbers.
///
/// `Dual<S>` represents a value `a + bε` where ε² = 0. The `re` part
/// carries the function value, the `eps` part carries the derivative.
///
/// Because `Dual<S>` implements [`Scalar`], every operation in this crate
/// propagates derivatives, including ScLERP, so the velocity of an
/// interpolated transform with respect to the blend parameter comes for
/// free.
///
/// # Example
/// ```
/// use screw::{Dual, Scalar};
///
/// // f(x) = x² at x = 3
/// let x = Dual::var(3.0_f64);
/// let y = x * x;
/// assert_eq!(y.re, 9.0);  // f(3) = 9
/// assert_eq!(y.eps, 6.0); // f'(3) = 2*3 = 6
/// ```
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dual<S> {
    pub re: S,
    pub eps: S,
}

impl<S: Scalar> Dual<S> {
    /// Constant (derivative = 0)
    #[inline]
    pub fn constant(re: S) -> Self {
        Self { re, eps: S::ZERO }
    }

    /// Variable (derivative = 1)
    #[inline]
    pub fn var(re: S) -> Self {
        Self { re, eps: S::ONE }
    }

    /// Construct with explicit derivative
    #[inline]
    pub fn new(re: S, eps: S) -> Self {
        Self { re, eps }
    }
}

impl<S: Scalar> PartialEq for Dual<S> {
    fn eq(&self, other: &Self) -> bool {
        self.re == other.re
    }
}

impl<S: Scalar> PartialOrd for Dual<S> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.re.partial_cmp(&other.re)
    }
}

impl<S: Scalar> Default for Dual<S> {
    fn default() -> Self {
        Self::constant(S::ZERO)
    }
}

impl<S: Scalar> fmt::Display for Dual<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}+{}ε", self.re, self.eps)
    }
}

// Arithmetic: dual number rules
// (a + bε) + (c + dε) = (a+c) + (b+d)ε
// (a + bε) * (c + dε) = ac + (ad + bc)ε
// (a + bε) / (c + dε) = a/c + (bc - ad)/c²ε

impl<S: Scalar> Add for Dual<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            eps: self.eps + rhs.eps,
        }
    }
}

impl<S: Scalar> Sub for Dual<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            eps: self.eps - rhs.eps,
        }
    }
}

impl<S: Scalar> Mul for Dual<S> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re,
            eps: self.re * rhs.eps + self.eps * rhs.re,
        }
    }
}

impl<S: Scalar> Div for Dual<S> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let inv = rhs.re.recip();
        Self {
            re: self.re * inv,
            eps: (self.eps * rhs.re - self.re * rhs.eps) * inv * inv,
        }
    }
}

impl<S: Scalar> Neg for Dual<S> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            eps: -self.eps,
        }
    }
}

impl<S: Scalar> AddAssign for Dual<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.eps += rhs.eps;
    }
}

impl<S: Scalar> SubAssign for Dual<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.re -= rhs.re;
        self.eps -= rhs.eps;
    }
}

impl<S: Scalar> MulAssign for Dual<S> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        let eps = self.re * rhs.eps + self.eps * rhs.re;
        self.re *= rhs.re;
        self.eps = eps;
    }
}

impl<S: Scalar> DivAssign for Dual<S> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

/// The impl that makes every type in the crate automatically differentiable.
impl<S: Scalar> Scalar for Dual<S> {
    const ZERO: Self = Dual {
        re: S::ZERO,
        eps: S::ZERO,
    };
    const ONE: Self = Dual {
        re: S::ONE,
        eps: S::ZERO,
    };
    const TWO: Self = Dual {
        re: S::TWO,
        eps: S::ZERO,
    };
    const HALF: Self = Dual {
        re: S::HALF,
        eps: S::ZERO,
    };
    const PI: Self = Dual {
        re: S::PI,
        eps: S::ZERO,
    };
    const FRAC_PI_2: Self = Dual {
        re: S::FRAC_PI_2,
        eps: S::ZERO,
    };
    const EPSILON: Self = Dual {
        re: S::EPSILON,
        eps: S::ZERO,
    };

    // d/dx sqrt(x) = 1/(2*sqrt(x))
    #[inline]
    fn sqrt(self) -> Self {
        let r = self.re.sqrt();
        Dual {
            re: r,
            eps: self.eps / (S::TWO * r),
        }
    }

    // d/dx |x| = sign(x)
    #[inline]
    fn abs(self) -> Self {
        Dual {
            re: self.re.abs(),
            eps: self.eps * self.re.signum(),
        }
    }

    #[inline]
    fn signum(self) -> Self {
        Dual::constant(self.re.signum())
    }

    // d/dx sin(x) = cos(x)
    #[inline]
    fn sin(self) -> Self {
        Dual {
            re: self.re.sin(),
            eps: self.eps * self.re.cos(),
        }
    }

    // d/dx cos(x) = -sin(x)
    #[inline]
    fn cos(self) -> Self {
        Dual {
            re: self.re.cos(),
            eps: -self.eps * self.re.sin(),
        }
    }

    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        let (s, c) = self.re.sin_cos();
        (
            Dual {
                re: s,
                eps: self.eps * c,
            },
            Dual {
                re: c,
                eps: -self.eps * s,
            },
        )
    }

    // d/dx acos(x) = -1/sqrt(1-x²)
    #[inline]
    fn acos(self) -> Self {
        Dual {
            re: self.re.acos(),
            eps: -self.eps / (S::ONE - self.re * self.re).sqrt(),
        }
    }

    // d/dx atan2(y,x) requires both partials
    #[inline]
    fn atan2(self, other: Self) -> Self {
        let denom = self.re * self.re + other.re * other.re;
        Dual {
            re: self.re.atan2(other.re),
            eps: (self.eps * other.re - self.re * other.eps) / denom,
        }
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        if self.re < other.re {
            self
        } else {
            other
        }
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        if self.re > other.re {
            self
        } else {
            other
        }
    }

    #[inline]
    fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    #[inline]
    fn recip(self) -> Self {
        let inv = self.re.recip();
        Dual {
            re: inv,
            eps: -self.eps * inv * inv,
        }
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Dual::constant(S::from_f64(v))
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.re.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_of_square() {
        let x = Dual::var(3.0_f64);
        let y = x * x;
        assert_eq!(y.re, 9.0);
        assert_eq!(y.eps, 6.0); // d/dx x² = 2x = 6
    }

    #[test]
    fn derivative_of_reciprocal() {
        let x = Dual::var(2.0_f64);
        let y = x.recip();
        assert!((y.re - 0.5).abs() < 1e-10);
        assert!((y.eps - (-0.25)).abs() < 1e-10); // d/dx 1/x = -1/x²
    }

    #[test]
    fn derivative_of_sqrt() {
        let x = Dual::var(4.0_f64);
        let y = x.sqrt();
        assert!((y.re - 2.0).abs() < 1e-10);
        assert!((y.eps - 0.25).abs() < 1e-10); // d/dx sqrt(x) = 1/(2*sqrt(x))
    }

    #[test]
    fn derivative_of_sin() {
        let x = Dual::var(0.0_f64);
        let y = x.sin();
        assert!(y.re.abs() < 1e-10); // sin(0) = 0
        assert!((y.eps - 1.0).abs() < 1e-10); // cos(0) = 1
    }

    #[test]
    fn chain_rule() {
        // d/dx sin(x²) = 2x * cos(x²)
        let x = Dual::var(1.0_f64);
        let y = (x * x).sin();
        let expected = 2.0 * 1.0_f64.cos();
        assert!((y.eps - expected).abs() < 1e-10);
    }

    #[test]
    fn derivative_of_atan2() {
        // d/dy atan2(y, 1) at y=0 is 1
        let y = Dual::var(0.0_f64);
        let x = Dual::constant(1.0_f64);
        let a = y.atan2(x);
        assert!(a.re.abs() < 1e-10);
        assert!((a.eps - 1.0).abs() < 1e-10);
    }

    #[test]
    fn vec3_norm_with_dual() {
        use crate::Vec3;
        // Derivative of norm([x, 0, 0]) = |x| → d/dx = sign(x) = 1
        let v = Vec3::new(
            Dual::var(3.0_f64),
            Dual::constant(0.0),
            Dual::constant(0.0),
        );
        let n = v.norm();
        assert!((n.re - 3.0).abs() < 1e-10);
        assert!((n.eps - 1.0).abs() < 1e-10);
    }

    #[test]
    fn sclerp_velocity_with_dual() {
        use crate::{DualQuat, Quat, Vec3};
        // Pure translation by (2, 0, 0): the interpolated x-translation is
        // 2s, so its derivative with respect to s is 2 everywhere.
        let a = DualQuat::<Dual<f64>>::identity();
        let b = DualQuat::from_translation_rotation(
            Vec3::new(
                Dual::constant(2.0),
                Dual::constant(0.0),
                Dual::constant(0.0),
            ),
            Quat::identity(),
        );
        let s = Dual::var(0.25_f64);
        let t = a.sclerp(&b, s).translation();
        assert!((t.x.re - 0.5).abs() < 1e-10);
        assert!((t.x.eps - 2.0).abs() < 1e-10);
    }
}
