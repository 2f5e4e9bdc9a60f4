//! Per-photo pan/zoom adjustment inside a region.

/// Drag, pinch and wheel tool producing a [`crate::layout::model::CropAdjustment`].
pub mod tool;
