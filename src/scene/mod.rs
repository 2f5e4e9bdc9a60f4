//! Scene description and asset load state.
//!
//! A [`model::SceneDesc`] names every asset a frame needs; [`state::SceneState`] tracks which of
//! them have arrived. Rendering only ever draws what the state reports as loaded.

/// Serde boundary model for a full scene.
pub mod model;
/// Asset slot tracking and the event reducer.
pub mod state;
/// Free-form stickers placed on the canvas.
pub mod stickers;
