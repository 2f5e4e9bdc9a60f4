//! Mapping between logical canvas pixels and on-screen display pixels.

/// Display scale fitting and coordinate conversion.
pub mod scale;
