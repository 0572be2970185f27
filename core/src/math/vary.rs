//! Interpolation of varyings.

use core::array;

use super::{Vec2, Vec3, Vec4};

/// A trait for types that can be interpolated across the face of a polygon.
///
/// This is the contract every *varying* type must satisfy: the clipper
/// blends two values when it splits an edge, and the rasterizer blends the
/// three vertex values of a triangle with barycentric weights. Every
/// component of an implementing type must be blended with the same weights;
/// the [`impl_vary`][crate::impl_vary] macro generates such an impl for
/// structs whose fields are all `Vary`.
pub trait Vary: Sized {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// If `t` = 0, returns `self`; if `t` = 1, returns `other`.
    ///
    /// # Examples
    /// ```
    /// use rastrum_core::math::Vary;
    ///
    /// assert_eq!(Vary::lerp(&1.0f32, &5.0, 0.25), 2.0);
    /// ```
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Returns the weighted sum of three values.
    ///
    /// The weights are usually barycentric coordinates summing to one,
    /// but this is not required.
    ///
    /// # Examples
    /// ```
    /// use rastrum_core::math::{Vary, vec2};
    ///
    /// let [a, b, c] = [vec2(0.0, 0.0), vec2(4.0, 0.0), vec2(0.0, 4.0)];
    /// let v = Vary::weighted([&a, &b, &c], [0.5, 0.25, 0.25]);
    /// assert_eq!(v, vec2(1.0, 1.0));
    /// ```
    fn weighted(vs: [&Self; 3], ws: [f32; 3]) -> Self;

    /// Returns the (unweighted) average of `self` and `other`.
    fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }
}

/// Linearly interpolates between two values.
///
/// For more information, see [`Vary::lerp`].
#[inline]
pub fn lerp<T: Vary>(t: f32, from: T, to: T) -> T {
    from.lerp(&to, t)
}

/// Implements [`Vary`] for a struct by blending each listed field.
///
/// Every field must itself implement `Vary`, and every field of the struct
/// must be listed.
///
/// # Examples
/// ```
/// use rastrum_core::{impl_vary, math::{Vary, Vec3}};
///
/// #[derive(Copy, Clone, Debug, PartialEq)]
/// struct Shading {
///     normal: Vec3,
///     light: f32,
/// }
/// impl_vary!(Shading { normal, light });
///
/// let a = Shading { normal: Vec3::X, light: 0.0 };
/// let b = Shading { normal: Vec3::Y, light: 1.0 };
/// assert_eq!(a.lerp(&b, 0.5).light, 0.5);
/// ```
#[macro_export]
macro_rules! impl_vary {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::math::vary::Vary for $ty {
            #[inline]
            fn lerp(&self, other: &Self, t: f32) -> Self {
                Self {
                    $($field: $crate::math::vary::Vary::lerp(
                        &self.$field, &other.$field, t
                    ),)+
                }
            }
            #[inline]
            fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
                Self {
                    $($field: $crate::math::vary::Vary::weighted(
                        [&a.$field, &b.$field, &c.$field], ws
                    ),)+
                }
            }
        }
    };
}

macro_rules! impl_vary_linear {
    ($($ty:ty),+) => {$(
        impl Vary for $ty {
            #[inline]
            fn lerp(&self, other: &Self, t: f32) -> Self {
                *self + (*other - *self) * t
            }
            #[inline]
            fn weighted([a, b, c]: [&Self; 3], [wa, wb, wc]: [f32; 3]) -> Self {
                *a * wa + *b * wb + *c * wc
            }
        }
    )+};
}

impl_vary_linear!(f32, Vec2, Vec3, Vec4);

impl Vary for () {
    fn lerp(&self, _: &Self, _: f32) {}
    fn weighted(_: [&Self; 3], _: [f32; 3]) {}
}

impl<T: Vary, U: Vary> Vary for (T, U) {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        (self.0.lerp(&other.0, t), self.1.lerp(&other.1, t))
    }
    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        (
            T::weighted([&a.0, &b.0, &c.0], ws),
            U::weighted([&a.1, &b.1, &c.1], ws),
        )
    }
}

impl<T: Vary, U: Vary, V: Vary> Vary for (T, U, V) {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        (
            self.0.lerp(&other.0, t),
            self.1.lerp(&other.1, t),
            self.2.lerp(&other.2, t),
        )
    }
    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        (
            T::weighted([&a.0, &b.0, &c.0], ws),
            U::weighted([&a.1, &b.1, &c.1], ws),
            V::weighted([&a.2, &b.2, &c.2], ws),
        )
    }
}

impl<T: Vary, const N: usize> Vary for [T; N] {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        array::from_fn(|i| self[i].lerp(&other[i], t))
    }
    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        array::from_fn(|i| T::weighted([&a[i], &b[i], &c[i]], ws))
    }
}
