//! framecomp composes captured photos into decorated frame templates.
//!
//! A frame is a logical canvas (for example 1080×1920) carrying placeholder regions, fixed
//! decorative overlays, free-form stickers, an optional message and logo. The crate covers:
//!
//! - Authoring templates with [`PlaceholderEditor`] (draw, move, resize, auto-layout)
//! - Framing each photo inside its region with [`CropAdjustTool`] (pan and zoom)
//! - Loading a [`SceneDesc`] into a [`SceneState`] through an [`AssetLoader`]
//! - Previewing and exporting through [`Compositor`], backed by the `vello_cpu` [`CpuRenderer`]
//!
//! Photo placement is cover-fit followed by the adjustment's pan/zoom, clipped by the region's
//! shape. Preview and export share that math, so what is framed on screen is what is exported.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Pan/zoom adjustment tool.
pub mod adjust;
/// Asset loading and decoding.
pub mod assets;
/// Placeholder authoring.
pub mod authoring;
/// Cover-fit crop and masks.
pub mod crop;
/// Core types and errors.
pub mod foundation;
/// Frame layout model.
pub mod layout;
/// Rendering backends and the compositor.
pub mod render;
/// Scene description and load state.
pub mod scene;
/// Display scale fitting.
pub mod viewport;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{FrameError, FrameResult};

pub use crate::adjust::tool::{AdjustOpts, CropAdjustTool};
pub use crate::assets::color::ColorDef;
pub use crate::assets::store::{AssetLoader, FsAssetLoader, InMemoryAssetLoader, PreparedImage};
pub use crate::authoring::editor::{
    EditTarget, EditorOpts, PlaceholderEditor, PlaceholderField, auto_layout,
};
pub use crate::authoring::gesture::{GestureState, PointerEvent, PointerId, PointerKind};
pub use crate::authoring::handles::Handle;
pub use crate::crop::cover::{
    CropWindow, PreviewTransform, cover_fit, crop_window, preview_matches_export,
};
pub use crate::crop::mask::MaskKind;
pub use crate::layout::model::{
    CropAdjustment, FixedOverlay, FrameLayout, PlacedSticker, Placeholder, PlaceholderCoverage,
    PlaceholderShape, Region,
};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::compositor::Compositor;
pub use crate::render::cpu::{CpuRenderer, RenderMode, RenderOpts};
pub use crate::scene::model::{MessageDesc, PhotoDesc, SceneDesc};
pub use crate::scene::state::{
    LoadReport, LoadedAsset, SceneEvent, SceneState, SlotId, SlotStatus, load_scene_assets,
};
pub use crate::scene::stickers::StickerBoard;
pub use crate::viewport::scale::{ScaleFit, ScaleFitOpts};
