//! Session-facing compositor: scene + load state + display scale + optional surface.

use crate::assets::store::AssetLoader;
use crate::foundation::core::Rect;
use crate::layout::model::{CropAdjustment, PlaceholderCoverage};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuRenderer, RenderMode, RenderOpts};
use crate::scene::model::SceneDesc;
use crate::scene::state::{LoadReport, SceneEvent, SceneState, SlotId, load_scene_assets};
use crate::viewport::scale::{ScaleFit, ScaleFitOpts};

/// Combines a scene with its asynchronously loaded assets into previews and exports.
///
/// Nothing here fails hard: unloaded layers are omitted, and export without a surface yields
/// `None` so the caller can offer a retry.
#[derive(Debug)]
pub struct Compositor {
    desc: SceneDesc,
    state: SceneState,
    scale: ScaleFit,
    opts: RenderOpts,
    surface: Option<CpuRenderer>,
}

impl Compositor {
    /// New compositor with every asset slot pending and no surface.
    pub fn new(desc: SceneDesc, opts: RenderOpts, scale_opts: ScaleFitOpts) -> Self {
        let state = SceneState::for_scene(&desc);
        let scale = ScaleFit::new(desc.layout.canvas(), scale_opts);
        Self {
            desc,
            state,
            scale,
            opts,
            surface: None,
        }
    }

    /// Scene being composited.
    pub fn desc(&self) -> &SceneDesc {
        &self.desc
    }

    /// Current asset state.
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Display scale.
    pub fn scale(&self) -> &ScaleFit {
        &self.scale
    }

    /// Create the rendering surface.
    pub fn attach_surface(&mut self) {
        if self.surface.is_none() {
            self.surface = Some(CpuRenderer::new(self.opts));
        }
    }

    /// Drop the rendering surface.
    pub fn detach_surface(&mut self) {
        self.surface = None;
    }

    /// `true` once a surface exists.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Fold one load event into the state; `true` means a re-render is due.
    pub fn apply(&mut self, event: SceneEvent) -> bool {
        self.state.reduce(event)
    }

    /// Load every pending slot through `loader`.
    pub fn load_pending(&mut self, loader: &dyn AssetLoader) -> LoadReport {
        let report = load_scene_assets(&self.desc, loader, &mut self.state);
        tracing::debug!(loaded = report.loaded, failed = report.failed, "assets loaded");
        report
    }

    /// Recompute the display scale after a viewport change.
    pub fn resize_viewport(&mut self, container_width: f64, viewport_height: f64) -> f64 {
        self.scale.update(container_width, viewport_height)
    }

    /// Regions vs. photos, for the UI's count warning.
    pub fn coverage(&self) -> PlaceholderCoverage {
        self.desc.layout.coverage(self.desc.photos.len())
    }

    /// Store a committed crop adjustment on photo `i`.
    pub fn set_photo_adjustment(&mut self, i: usize, adjustment: CropAdjustment) -> bool {
        self.desc.set_photo_adjustment(i, adjustment)
    }

    /// Live preview at the current display scale; `None` without a surface or on render failure.
    pub fn render_preview(&mut self) -> Option<FrameRGBA> {
        let mode = RenderMode::Preview {
            scale: self.scale.scale(),
        };
        self.render_with(mode)
    }

    /// Full-resolution frame at scale 1 regardless of the display scale.
    #[tracing::instrument(skip_all)]
    pub fn export(&mut self) -> Option<FrameRGBA> {
        if !self.state.is_settled() {
            tracing::info!(
                pending = self.state.pending().count(),
                "exporting with pending assets; those layers are omitted"
            );
        }
        self.render_with(RenderMode::Export)
    }

    /// [`Self::export`] encoded as PNG.
    #[tracing::instrument(skip_all)]
    pub fn export_png(&mut self) -> Option<Vec<u8>> {
        let frame = self.export()?;
        match frame.encode_png() {
            Ok(png) => Some(png),
            Err(e) => {
                tracing::warn!(error = %e, "png encoding failed");
                None
            }
        }
    }

    fn render_with(&mut self, mode: RenderMode) -> Option<FrameRGBA> {
        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!("render requested before a surface exists");
            return None;
        };
        match surface.render(&self.desc, &self.state, mode) {
            Ok(frame) => Some(frame),
            Err(e) => {
                tracing::warn!(error = %e, ?mode, "render failed");
                None
            }
        }
    }

    // ---- stickers ----

    /// Place a sticker; its asset slot starts pending. Returns the instance id.
    pub fn add_sticker(&mut self, sticker_id: &str, url: &str, rect: Rect) -> String {
        let id = self.desc.stickers.add(sticker_id, url, rect);
        self.state.reduce(SceneEvent::SlotAdded(SlotId::Sticker(id.clone())));
        id
    }

    /// Translate a sticker.
    pub fn move_sticker(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        self.desc.stickers.move_by(id, dx, dy)
    }

    /// Set a sticker's scale factors.
    pub fn resize_sticker(&mut self, id: &str, scale_x: f64, scale_y: f64) -> bool {
        self.desc.stickers.resize(id, scale_x, scale_y)
    }

    /// Set a sticker's rotation in degrees.
    pub fn rotate_sticker(&mut self, id: &str, degrees: f64) -> bool {
        self.desc.stickers.rotate(id, degrees)
    }

    /// Remove a sticker and forget its asset.
    pub fn delete_sticker(&mut self, id: &str) -> bool {
        let removed = self.desc.stickers.delete(id).is_some();
        if removed {
            self.state
                .reduce(SceneEvent::SlotRemoved(SlotId::Sticker(id.to_owned())));
        }
        removed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
