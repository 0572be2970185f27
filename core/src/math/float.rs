//! Floating-point compatibility API.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! provides the few the renderer needs, using either `std` or the `libm`
//! crate, depending on which feature is enabled. One of the two must be;
//! the vector library has the same requirement.

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::floorf as floor;
    pub use libm::powf;
}

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use self::libm as f32;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("either the `std` or the `libm` feature must be enabled");
