//! Frame templates: placeholder regions, fixed overlays and their JSON form.

/// Serde model for placeholders, overlays, crop adjustments and stickers.
pub mod model;
