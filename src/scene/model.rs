//! Compositor input: everything needed to rasterize one frame.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::assets::color::ColorDef;
use crate::foundation::error::{FrameError, FrameResult};
use crate::layout::model::{CropAdjustment, FrameLayout};
use crate::scene::state::SlotId;
use crate::scene::stickers::StickerBoard;

/// One captured photo and its optional guest adjustment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhotoDesc {
    /// Asset source.
    pub source: String,
    /// Pan/zoom; absent means identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<CropAdjustment>,
}

impl PhotoDesc {
    /// Photo without an adjustment.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            adjustment: None,
        }
    }

    /// Effective adjustment, clamped.
    pub fn effective_adjustment(&self) -> CropAdjustment {
        self.adjustment.unwrap_or_default().clamped()
    }
}

/// Centered text drawn near the bottom of the frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessageDesc {
    /// Text; may contain newlines.
    pub text: String,
    /// Font file source (TTF/OTF).
    pub font_source: String,
    /// Font size in logical px; falls back to the renderer default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_px: Option<f32>,
    /// Fill color; falls back to the renderer default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorDef>,
}

/// Full scene: layout, captured photos, decorations.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDesc {
    /// Template geometry.
    pub layout: FrameLayout,
    /// Template background image, stretched to the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Photos in capture order; photo *i* goes into placeholder *i*.
    #[serde(default)]
    pub photos: Vec<PhotoDesc>,
    /// Optional message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageDesc>,
    /// Optional brand logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Guest stickers, topmost.
    #[serde(default)]
    pub stickers: StickerBoard,
}

impl SceneDesc {
    /// Scene with only a layout.
    pub fn new(layout: FrameLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Parse a scene from a JSON reader, validate it and clamp its layout into the canvas.
    pub fn from_reader<R: std::io::Read>(r: R) -> FrameResult<Self> {
        let mut scene: SceneDesc = serde_json::from_reader(r)
            .map_err(|e| FrameError::serde(format!("parse scene JSON: {e}")))?;
        scene.validate()?;
        scene.layout.clamp_to_canvas();
        Ok(scene)
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> FrameResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject scenes that cannot be rendered.
    pub fn validate(&self) -> FrameResult<()> {
        self.layout.validate()?;
        fn non_empty(what: &str, s: &str) -> FrameResult<()> {
            if s.trim().is_empty() {
                return Err(FrameError::validation(format!("{what} source must be non-empty")));
            }
            Ok(())
        }
        if let Some(bg) = &self.background {
            non_empty("background", bg)?;
        }
        for (i, p) in self.photos.iter().enumerate() {
            non_empty(&format!("photo {i}"), &p.source)?;
        }
        for o in &self.layout.overlays {
            non_empty(&format!("overlay '{}'", o.id), &o.url)?;
        }
        if let Some(logo) = &self.logo {
            non_empty("logo", logo)?;
        }
        if let Some(m) = &self.message {
            non_empty("message font", &m.font_source)?;
            if let Some(size) = m.size_px
                && (!size.is_finite() || size <= 0.0)
            {
                return Err(FrameError::validation("message size_px must be finite and > 0"));
            }
        }
        self.stickers.validate()
    }

    /// Asset source behind every slot the scene uses, in layer order.
    pub fn slot_sources(&self) -> Vec<(SlotId, String)> {
        let mut out = Vec::new();
        if let Some(bg) = &self.background {
            out.push((SlotId::Background, bg.clone()));
        }
        for (i, p) in self.photos.iter().enumerate() {
            out.push((SlotId::Photo(i), p.source.clone()));
        }
        for (i, o) in self.layout.overlays.iter().enumerate() {
            out.push((SlotId::Overlay(i), o.url.clone()));
        }
        if let Some(m) = &self.message {
            out.push((SlotId::MessageFont, m.font_source.clone()));
        }
        if let Some(logo) = &self.logo {
            out.push((SlotId::Logo, logo.clone()));
        }
        for s in self.stickers.iter() {
            out.push((SlotId::Sticker(s.id.clone()), s.url.clone()));
        }
        out
    }

    /// Effective adjustment of photo `i`; identity when unknown.
    pub fn photo_adjustment(&self, i: usize) -> CropAdjustment {
        self.photos
            .get(i)
            .map(PhotoDesc::effective_adjustment)
            .unwrap_or_default()
    }

    /// Store a committed adjustment on photo `i`.
    pub fn set_photo_adjustment(&mut self, i: usize, adjustment: CropAdjustment) -> bool {
        match self.photos.get_mut(i) {
            Some(p) => {
                p.adjustment = Some(adjustment.clamped());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
