//! Meshes, mesh loading, and built-in solids for `rastrum`.
//!
//! # Crate features
//!
//! * `std`:
//!   Enables loading meshes from files. Enabled by default.

#![no_std]

extern crate alloc;
extern crate core;
#[cfg(feature = "std")]
extern crate std;

pub mod io;
pub mod mesh;
pub mod solids;

pub use mesh::Mesh;
