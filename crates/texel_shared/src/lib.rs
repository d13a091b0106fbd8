//! # TEXEL Shared
//!
//! Plain value types used by every TEXEL crate.
//!
//! ## CRITICAL RULE
//!
//! Everything here is `Copy`, `#[repr(C)]` and `Pod`. Pixel buffers may be
//! viewed as flat `f32` channel slices through `bytemuck`, so no type in
//! this crate may grow padding or a non-`Pod` field.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod math;

pub use color::Color;
pub use math::{Vec2, Vec3};
