//! Approximate equality of floating-point values.
//!
//! Rasterization is full of computations whose results differ from the
//! exact answer by a few ulps: perspective divides, barycentric weights,
//! interpolated attributes. Tests compare such results with
//! [`assert_approx_eq!`][crate::assert_approx_eq] rather than `assert_eq!`.

use core::iter::zip;

use super::{Mat4, Vec2, Vec3, Vec4};

/// The relative tolerance used when none is given explicitly.
pub const DEFAULT_EPS: f32 = 1e-6;

/// Trait for comparing values for approximate equality.
///
/// Two scalars are approximately equal if their difference is at most
/// `eps` times the larger of their magnitudes, or `eps` itself for values
/// smaller than one. Composite values are approximately equal if all their
/// components are. Non-finite values are never approximately equal to
/// anything.
pub trait ApproxEq {
    /// Returns whether `self` and `other` are equal within relative
    /// tolerance `eps`.
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool;

    /// Returns whether `self` and `other` are equal within
    /// [`DEFAULT_EPS`].
    fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_eps(other, DEFAULT_EPS)
    }
}

impl ApproxEq for f32 {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        let scale = self.abs().max(other.abs()).max(1.0);
        (self - other).abs() <= eps * scale
    }
}

macro_rules! impl_approx_eq_via_array {
    ($($ty:ty => $to_array:ident),+) => {$(
        impl ApproxEq for $ty {
            fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
                self.$to_array().approx_eq_eps(&other.$to_array(), eps)
            }
        }
    )+};
}

impl_approx_eq_via_array!(
    Vec2 => to_array,
    Vec3 => to_array,
    Vec4 => to_array,
    Mat4 => to_cols_array
);

impl<T: ApproxEq> ApproxEq for [T] {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        self.len() == other.len()
            && zip(self, other).all(|(s, o)| s.approx_eq_eps(o, eps))
    }
}

impl<T: ApproxEq, const N: usize> ApproxEq for [T; N] {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        self[..].approx_eq_eps(&other[..], eps)
    }
}

impl<T: ApproxEq> ApproxEq for Option<T> {
    fn approx_eq_eps(&self, other: &Self, eps: f32) -> bool {
        match (self, other) {
            (Some(s), Some(o)) => s.approx_eq_eps(o, eps),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Asserts that two values are approximately equal.
///
/// The left operand must implement [`ApproxEq`], and both operands must
/// implement `Debug` unless a custom message is given. The tolerance
/// defaults to [`DEFAULT_EPS`] and can be set with `eps = <expr>`, which
/// must precede a custom message.
///
/// # Panics
/// If the values are not approximately equal.
///
/// # Examples
/// ```
/// use rastrum_core::assert_approx_eq;
///
/// assert_ne!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(0.1 + 0.2, 0.3);
///
/// // The tolerance is relative to the magnitude of the values
/// assert_approx_eq!(1e7, 1e7 + 1.0);
/// assert_approx_eq!(100.0, 101.0, eps = 0.01);
/// ```
/// ```should_panic
/// # use rastrum_core::assert_approx_eq;
/// assert_approx_eq!(f32::sin(3.14), 0.0, eps = 1e-4,
///     "{} is not close enough to pi", 3.14);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::assert_approx_eq!(
            $a, $b, eps = $crate::math::approx::DEFAULT_EPS
        )
    };
    ($a:expr, $b:expr, eps = $eps:expr $(,)?) => {
        match (&$a, &$b) {
            (a, b) => assert!(
                $crate::math::approx::ApproxEq::approx_eq_eps(a, b, $eps),
                "assertion failed: `{a:?} ≈ {b:?}` (eps = {:e})",
                $eps
            ),
        }
    };
    ($a:expr, $b:expr, eps = $eps:expr, $($msg:tt)+) => {
        match (&$a, &$b) {
            (a, b) => assert!(
                $crate::math::approx::ApproxEq::approx_eq_eps(a, b, $eps),
                $($msg)+
            ),
        }
    };
}
