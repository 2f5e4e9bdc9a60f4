//! Shared geometry, pixel and error primitives.

/// Canvas size, premultiplied pixels and re-exported `kurbo` geometry.
pub mod core;
/// Crate error type.
pub mod error;
/// Small numeric helpers shared by the crop and raster code.
pub mod math;
