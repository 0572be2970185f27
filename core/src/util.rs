//! Various utility types and functions.

pub mod buf;
pub mod pixfmt;
#[cfg(feature = "std")]
pub mod pnm;
