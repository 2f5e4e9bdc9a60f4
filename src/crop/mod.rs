//! Cover-fit cropping and shape masking of photos into regions.
//!
//! The same math drives the interactive preview and the final export, so a photo framed in the
//! adjust tool lands on identical pixels in the output.

/// Cover-fit crop windows and the preview transform.
pub mod cover;
/// Rectangle and circle clip masks.
pub mod mask;
