//! Asset loading and decoding.

/// Color literals accepted in scene JSON.
pub mod color;
/// Raster and SVG decoding to premultiplied RGBA8.
pub mod decode;
/// Loaders, prepared images and text layout.
pub mod store;
