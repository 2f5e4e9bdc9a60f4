//! Cover-fit crop math.
//!
//! One formula, two views of it:
//!
//! - [`crop_window`] produces the source-pixel rectangle the exporter samples.
//! - [`PreviewTransform`] is the `scale(..) translate(..%)` transform a live preview applies to
//!   an element that already shows the plain cover-fit crop.
//!
//! [`PreviewTransform::visible_window`] maps the preview back into source pixels so the two views
//! can be checked against each other.

use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::math::clamp_span;
use crate::layout::model::CropAdjustment;

/// A rectangle in source-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropWindow {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl CropWindow {
    /// Construct a window.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// As a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Window center.
    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// `true` when the window lies inside `[0, iw] × [0, ih]`, within `eps`.
    pub fn is_within(self, iw: f64, ih: f64, eps: f64) -> bool {
        self.x >= -eps
            && self.y >= -eps
            && self.x + self.width <= iw + eps
            && self.y + self.height <= ih + eps
    }

    /// Affine taking source pixels in this window onto `region` (canvas pixels).
    pub fn source_to_region(self, region: Rect) -> Affine {
        let sx = region.width() / self.width.max(f64::EPSILON);
        let sy = region.height() / self.height.max(f64::EPSILON);
        Affine::translate(Vec2::new(region.x0, region.y0))
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(Vec2::new(-self.x, -self.y))
    }

    fn approx_eq(self, other: CropWindow, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.width - other.width).abs() <= eps
            && (self.height - other.height).abs() <= eps
    }
}

fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Minimal centered crop of an `iw × ih` image that exactly fills an `rw × rh` region.
///
/// Degenerate sizes (zero, negative or non-finite) fall back to the whole image.
pub fn cover_fit(iw: f64, ih: f64, rw: f64, rh: f64) -> CropWindow {
    if !(usable(iw) && usable(ih) && usable(rw) && usable(rh)) {
        return CropWindow::new(0.0, 0.0, iw.max(0.0), ih.max(0.0));
    }
    let img_ratio = iw / ih;
    let region_ratio = rw / rh;
    if img_ratio > region_ratio {
        // Too wide: keep full height.
        let w = ih * region_ratio;
        CropWindow::new((iw - w) * 0.5, 0.0, w, ih)
    } else {
        // Too tall: keep full width.
        let h = iw / region_ratio;
        CropWindow::new(0.0, (ih - h) * 0.5, iw, h)
    }
}

/// Cover-fit crop narrowed by an optional guest adjustment.
///
/// With `zoom > 1` the cover window shrinks by `1/zoom` around its center, and the center then
/// shifts by `offset * (cover - zoomed) / 2` per axis, so the zoomed window never leaves the
/// cover window. The result is clamped to the image bounds.
pub fn crop_window(
    iw: f64,
    ih: f64,
    rw: f64,
    rh: f64,
    adjustment: Option<&CropAdjustment>,
) -> CropWindow {
    let cover = cover_fit(iw, ih, rw, rh);
    let Some(adj) = adjustment.map(|a| a.clamped()) else {
        return cover;
    };
    if adj.zoom <= 1.0 {
        return cover;
    }

    let zw = cover.width / adj.zoom;
    let zh = cover.height / adj.zoom;
    let max_dx = (cover.width - zw) * 0.5;
    let max_dy = (cover.height - zh) * 0.5;
    let c = cover.center();
    let cx = c.x + adj.offset_x * max_dx;
    let cy = c.y + adj.offset_y * max_dy;

    CropWindow::new(
        clamp_span(cx - zw * 0.5, 0.0, iw - zw),
        clamp_span(cy - zh * 0.5, 0.0, ih - zh),
        zw.min(iw),
        zh.min(ih),
    )
}

/// Percentage-space preview transform: `scale(zoom) translate(tx%, ty%)`, origin at the center.
///
/// Percentages are relative to the previewed element's own size, which shows the unadjusted
/// cover-fit crop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PreviewTransform {
    /// Uniform scale.
    pub scale: f64,
    /// Horizontal translation in percent of the element width (applied before scaling).
    pub translate_x_pct: f64,
    /// Vertical translation in percent of the element height (applied before scaling).
    pub translate_y_pct: f64,
}

impl PreviewTransform {
    /// Identity transform.
    pub const IDENTITY: PreviewTransform = PreviewTransform {
        scale: 1.0,
        translate_x_pct: 0.0,
        translate_y_pct: 0.0,
    };

    /// Largest translation in percent reachable at `zoom`: `50 * (zoom - 1) / zoom`.
    pub fn max_offset_percent(zoom: f64) -> f64 {
        let z = zoom.max(CropAdjustment::ZOOM_MIN);
        50.0 * (z - 1.0) / z
    }

    /// Preview transform for an adjustment.
    pub fn from_adjustment(adjustment: &CropAdjustment) -> Self {
        let adj = adjustment.clamped();
        let max_pct = Self::max_offset_percent(adj.zoom);
        Self {
            scale: adj.zoom,
            translate_x_pct: -adj.offset_x * max_pct,
            translate_y_pct: -adj.offset_y * max_pct,
        }
    }

    /// CSS text, e.g. `scale(2) translate(-12.5%, 0%)`.
    pub fn to_css(&self) -> String {
        format!(
            "scale({}) translate({}%, {}%)",
            self.scale, self.translate_x_pct, self.translate_y_pct
        )
    }

    /// The transform as an affine over a `width × height` element with top-left origin.
    pub fn to_affine(&self, width: f64, height: f64) -> Affine {
        let half = Vec2::new(width * 0.5, height * 0.5);
        Affine::translate(half)
            * Affine::scale(self.scale)
            * Affine::translate(Vec2::new(
                self.translate_x_pct * 0.01 * width,
                self.translate_y_pct * 0.01 * height,
            ))
            * Affine::translate(-half)
    }

    /// Source-pixel window visible through the element after the transform.
    pub fn visible_window(&self, cover: CropWindow) -> CropWindow {
        let inv = self.to_affine(cover.width, cover.height).inverse();
        let p0 = inv * Point::ORIGIN;
        let p1 = inv * Point::new(cover.width, cover.height);
        CropWindow::new(cover.x + p0.x, cover.y + p0.y, p1.x - p0.x, p1.y - p0.y)
    }

    /// Affine taking source pixels onto `region` through the preview path: cover-fit mapping
    /// followed by this transform.
    pub fn source_to_region(&self, cover: CropWindow, region: Rect) -> Affine {
        Affine::translate(Vec2::new(region.x0, region.y0))
            * self.to_affine(region.width(), region.height())
            * Affine::translate(Vec2::new(-region.x0, -region.y0))
            * cover.source_to_region(region)
    }
}

/// `true` when the preview path and the pixel path show the same window for this input.
pub fn preview_matches_export(
    iw: f64,
    ih: f64,
    rw: f64,
    rh: f64,
    adjustment: &CropAdjustment,
    eps: f64,
) -> bool {
    let cover = cover_fit(iw, ih, rw, rh);
    let preview = PreviewTransform::from_adjustment(adjustment).visible_window(cover);
    let export = crop_window(iw, ih, rw, rh, Some(adjustment));
    preview.approx_eq(export, eps)
}

#[cfg(test)]
#[path = "../../tests/unit/crop/cover.rs"]
mod tests;
