use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{FrameError, FrameResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Solid-color image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(premul.repeat(n)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Normalize and validate scene-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> FrameResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FrameError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(FrameError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FrameError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(FrameError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Source of asset bytes.
///
/// Fetching is the caller's concern: a loader turns a scene `source` string into bytes, and the
/// default [`AssetLoader::load_image`] decodes them.
pub trait AssetLoader {
    /// Raw bytes for `source`.
    fn load_bytes(&self, source: &str) -> FrameResult<Vec<u8>>;

    /// Decoded image for `source` (raster or SVG).
    fn load_image(&self, source: &str) -> FrameResult<PreparedImage> {
        let bytes = self.load_bytes(source)?;
        crate::assets::decode::decode_asset(source, &bytes)
    }
}

/// Loads assets from files below a root directory.
#[derive(Clone, Debug)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    /// Resolve sources relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetLoader for FsAssetLoader {
    fn load_bytes(&self, source: &str) -> FrameResult<Vec<u8>> {
        let rel = normalize_rel_path(source)?;
        let path = self.root.join(&rel);
        std::fs::read(&path)
            .map_err(|e| FrameError::asset(format!("read '{}': {e}", path.display())))
    }
}

/// Loads assets from an in-memory map keyed by normalized source.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAssetLoader {
    files: BTreeMap<String, Arc<Vec<u8>>>,
}

impl InMemoryAssetLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `source`.
    pub fn insert(&mut self, source: &str, bytes: Vec<u8>) -> FrameResult<()> {
        self.files
            .insert(normalize_rel_path(source)?, Arc::new(bytes));
        Ok(())
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, source: &str, bytes: Vec<u8>) -> FrameResult<Self> {
        self.insert(source, bytes)?;
        Ok(self)
    }
}

impl AssetLoader for InMemoryAssetLoader {
    fn load_bytes(&self, source: &str) -> FrameResult<Vec<u8>> {
        let key = normalize_rel_path(source)?;
        self.files
            .get(&key)
            .map(|b| b.as_ref().clone())
            .ok_or_else(|| FrameError::asset(format!("asset '{key}' not found")))
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: BTreeMap<u64, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("families", &self.families)
            .finish_non_exhaustive()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: BTreeMap::new(),
        }
    }

    fn family_for(&mut self, font_bytes: &[u8]) -> FrameResult<String> {
        let key = {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            font_bytes.hash(&mut h);
            h.finish()
        };
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font_bytes.to_vec()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| FrameError::asset("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FrameError::asset("registered font family has no name"))?
            .to_string();
        self.families.insert(key, family_name.clone());
        Ok(family_name)
    }

    /// Shape and lay out plain text using provided font bytes and styling.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> FrameResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FrameError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
