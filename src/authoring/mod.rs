//! Interactive placeholder authoring.
//!
//! Pointer input arrives in display pixels, is converted to logical canvas coordinates through
//! [`crate::viewport::scale::ScaleFit`] and mutates a [`crate::layout::model::FrameLayout`].

/// Draw, move and resize state machine over a layout.
pub mod editor;
/// Pointer ids, capture and gesture states.
pub mod gesture;
/// Resize handles and canvas-bounded rect edits.
pub mod handles;
