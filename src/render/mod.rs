//! Rendering: CPU rasterization and the compositor driving it.

/// Rendered frame buffers.
pub mod backend;
/// Stateful compositor that owns the scene, its load state and the surface.
pub mod compositor;
/// `vello_cpu` renderer for preview and export.
pub mod cpu;
