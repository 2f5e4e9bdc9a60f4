//! Geometry model: placeholder regions, fixed overlays, crop adjustments and stickers.
//!
//! These are plain value types with no back-references. Coordinates are logical canvas pixels
//! (see [`Canvas`]); the JSON shape matches what the surrounding application persists.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{FrameError, FrameResult};

/// Shape a photo is masked into when composited into a placeholder.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderShape {
    /// Axis-aligned rectangle (no mask).
    #[default]
    Rectangle,
    /// Circle inscribed in the region's bounding box.
    Circle,
}

impl PlaceholderShape {
    /// The other shape.
    pub fn toggled(self) -> Self {
        match self {
            Self::Rectangle => Self::Circle,
            Self::Circle => Self::Rectangle,
        }
    }
}

/// Anything with an editable axis-aligned bounding box.
pub trait Region {
    /// Current bounds in logical canvas pixels.
    fn rect(&self) -> Rect;
    /// Replace the bounds. Callers are responsible for clamping.
    fn set_rect(&mut self, rect: Rect);

    /// `true` when `p` lies inside the bounds (edges inclusive).
    fn contains(&self, p: Point) -> bool {
        let r = self.rect();
        p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
    }
}

/// A region on the background where photo *i* is composited, in list order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placeholder {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, always `> 0`.
    pub width: f64,
    /// Height, always `> 0`.
    pub height: f64,
    /// Mask shape; absent in JSON means rectangle.
    #[serde(default)]
    pub shape: PlaceholderShape,
}

impl Placeholder {
    /// Construct a placeholder.
    pub fn new(x: f64, y: f64, width: f64, height: f64, shape: PlaceholderShape) -> Self {
        Self {
            x,
            y,
            width,
            height,
            shape,
        }
    }

    /// Construct from a (possibly un-normalized) rectangle.
    pub fn from_rect(rect: Rect, shape: PlaceholderShape) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height(), shape)
    }

    fn check(&self, what: &str) -> FrameResult<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(FrameError::validation(format!(
                "{what} has non-finite geometry"
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FrameError::validation(format!(
                "{what} must have width > 0 and height > 0"
            )));
        }
        Ok(())
    }
}

impl Region for Placeholder {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    fn set_rect(&mut self, rect: Rect) {
        let r = rect.abs();
        self.x = r.x0;
        self.y = r.y0;
        self.width = r.width();
        self.height = r.height();
    }
}

/// Operator-placed decorative image rendered above all photos.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FixedOverlay {
    /// Stable identifier.
    pub id: String,
    /// Asset source (relative path or URL understood by the asset loader).
    pub url: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Region for FixedOverlay {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    fn set_rect(&mut self, rect: Rect) {
        let r = rect.abs();
        self.x = r.x0;
        self.y = r.y0;
        self.width = r.width();
        self.height = r.height();
    }
}

/// Guest pan/zoom applied on top of the cover-fit crop of one photo.
///
/// `offset_x`/`offset_y` are in `[-1, 1]` with 0 centered; positive `offset_x` moves the visible
/// window toward the source image's right side. `zoom` is in `[1, 3]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAdjustment {
    /// Horizontal pan, `[-1, 1]`.
    pub offset_x: f64,
    /// Vertical pan, `[-1, 1]`.
    pub offset_y: f64,
    /// Zoom factor, `[1, 3]`.
    pub zoom: f64,
}

impl CropAdjustment {
    /// Smallest zoom (no zoom).
    pub const ZOOM_MIN: f64 = 1.0;
    /// Largest zoom.
    pub const ZOOM_MAX: f64 = 3.0;

    /// `{0, 0, 1}`: the plain cover-fit crop.
    pub const IDENTITY: CropAdjustment = CropAdjustment {
        offset_x: 0.0,
        offset_y: 0.0,
        zoom: 1.0,
    };

    /// Construct an adjustment, clamping every field into range.
    pub fn new(offset_x: f64, offset_y: f64, zoom: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            zoom,
        }
        .clamped()
    }

    /// Copy with offsets clamped to `[-1, 1]` and zoom to `[1, 3]`. NaN falls back to identity.
    pub fn clamped(self) -> Self {
        fn or(v: f64, fallback: f64) -> f64 {
            if v.is_finite() { v } else { fallback }
        }
        Self {
            offset_x: or(self.offset_x, 0.0).clamp(-1.0, 1.0),
            offset_y: or(self.offset_y, 0.0).clamp(-1.0, 1.0),
            zoom: or(self.zoom, 1.0).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX),
        }
    }

    /// `true` for `{0, 0, 1}`.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for CropAdjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn one() -> f64 {
    1.0
}

/// Guest-placed, freely transformable decoration; the topmost layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSticker {
    /// Instance identifier, unique within the session.
    pub id: String,
    /// Catalog identifier of the sticker artwork.
    pub sticker_id: String,
    /// Asset source.
    pub url: String,
    /// Left edge of the unrotated box; also the rotation pivot.
    pub x: f64,
    /// Top edge of the unrotated box; also the rotation pivot.
    pub y: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Horizontal scale factor.
    #[serde(default = "one")]
    pub scale_x: f64,
    /// Vertical scale factor.
    #[serde(default = "one")]
    pub scale_y: f64,
}

fn default_width() -> u32 {
    Canvas::DEFAULT.width
}

fn default_height() -> u32 {
    Canvas::DEFAULT.height
}

/// A frame template: logical resolution plus the regions and overlays drawn on it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameLayout {
    /// Logical width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Logical height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Photo regions, ordinally significant.
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
    /// Decorative layers above the photos.
    #[serde(default)]
    pub overlays: Vec<FixedOverlay>,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self::new(Canvas::DEFAULT)
    }
}

impl FrameLayout {
    /// Empty layout at the given resolution.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            placeholders: Vec::new(),
            overlays: Vec::new(),
        }
    }

    /// Logical resolution.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Reject layouts that cannot be rendered at all.
    ///
    /// Regions that merely stick out of the canvas are not errors; use [`Self::clamp_to_canvas`].
    pub fn validate(&self) -> FrameResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::validation("layout width/height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(FrameError::validation(format!(
                "layout {}x{} exceeds the {} px raster limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        for (i, p) in self.placeholders.iter().enumerate() {
            p.check(&format!("placeholder {i}"))?;
        }
        for o in &self.overlays {
            if o.id.trim().is_empty() {
                return Err(FrameError::validation("overlay id must be non-empty"));
            }
            let as_region = Placeholder::new(o.x, o.y, o.width, o.height, Default::default());
            as_region.check(&format!("overlay '{}'", o.id))?;
        }
        Ok(())
    }

    /// Pull every region fully inside `[0, width] × [0, height]`, shrinking only when a region
    /// is larger than the canvas itself.
    pub fn clamp_to_canvas(&mut self) {
        let canvas = self.canvas();
        for p in &mut self.placeholders {
            let r = crate::authoring::handles::translate_into(p.rect(), canvas);
            p.set_rect(r);
        }
        for o in &mut self.overlays {
            let r = crate::authoring::handles::translate_into(o.rect(), canvas);
            o.set_rect(r);
        }
    }

    /// Compare the region count against the number of captured photos.
    pub fn coverage(&self, photo_count: usize) -> PlaceholderCoverage {
        PlaceholderCoverage::new(self.placeholders.len(), photo_count)
    }

    /// Parse a layout from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> FrameResult<Self> {
        let mut layout: FrameLayout = serde_json::from_reader(r)
            .map_err(|e| FrameError::serde(format!("parse layout JSON: {e}")))?;
        layout.validate()?;
        layout.clamp_to_canvas();
        Ok(layout)
    }

    /// Parse a layout from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> FrameResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a layout from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FrameResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open layout JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> FrameResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FrameError::serde(e.to_string()))
    }
}

/// Soft check of regions vs. photos, surfaced to the UI as a warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlaceholderCoverage {
    /// Number of regions in the layout.
    pub placeholders: usize,
    /// Number of captured photos.
    pub photos: usize,
    /// Photos that will actually be composited.
    pub rendered: usize,
    /// Regions left empty.
    pub missing_regions: usize,
    /// Photos dropped because there is no region for them.
    pub excess_photos: usize,
}

impl PlaceholderCoverage {
    fn new(placeholders: usize, photos: usize) -> Self {
        Self {
            placeholders,
            photos,
            rendered: placeholders.min(photos),
            missing_regions: placeholders.saturating_sub(photos),
            excess_photos: photos.saturating_sub(placeholders),
        }
    }

    /// `true` when every photo has a region.
    pub fn is_sufficient(&self) -> bool {
        self.excess_photos == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
