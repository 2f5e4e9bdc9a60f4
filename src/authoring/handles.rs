//! Resize handles and the clamping rules shared by every region edit.

use crate::foundation::core::{Canvas, Point, Rect, Vec2};
use crate::foundation::error::FrameError;
use crate::foundation::math::clamp_span;

/// One of the eight resize handles on a selected region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// Top edge.
    N,
    /// Bottom edge.
    S,
    /// Right edge.
    E,
    /// Left edge.
    W,
    /// Top-right corner.
    NE,
    /// Top-left corner.
    NW,
    /// Bottom-right corner.
    SE,
    /// Bottom-left corner.
    SW,
}

impl Handle {
    /// Corners first, so a corner wins over an overlapping edge handle on tiny regions.
    pub const ALL: [Handle; 8] = [
        Handle::NW,
        Handle::NE,
        Handle::SE,
        Handle::SW,
        Handle::N,
        Handle::E,
        Handle::S,
        Handle::W,
    ];

    /// Short lowercase name (`"nw"`, `"e"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Handle::N => "n",
            Handle::S => "s",
            Handle::E => "e",
            Handle::W => "w",
            Handle::NE => "ne",
            Handle::NW => "nw",
            Handle::SE => "se",
            Handle::SW => "sw",
        }
    }

    fn moves_left(self) -> bool {
        matches!(self, Handle::W | Handle::NW | Handle::SW)
    }

    fn moves_right(self) -> bool {
        matches!(self, Handle::E | Handle::NE | Handle::SE)
    }

    fn moves_top(self) -> bool {
        matches!(self, Handle::N | Handle::NE | Handle::NW)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Handle::S | Handle::SE | Handle::SW)
    }

    /// Where this handle is drawn on `rect`.
    pub fn anchor(self, rect: Rect) -> Point {
        let x = if self.moves_left() {
            rect.x0
        } else if self.moves_right() {
            rect.x1
        } else {
            (rect.x0 + rect.x1) * 0.5
        };
        let y = if self.moves_top() {
            rect.y0
        } else if self.moves_bottom() {
            rect.y1
        } else {
            (rect.y0 + rect.y1) * 0.5
        };
        Point::new(x, y)
    }
}

impl std::str::FromStr for Handle {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FrameError::validation(format!("unknown handle '{s}'")))
    }
}

/// Handle of `rect` within `radius` of `p`, nearest first.
pub fn hit_handle(rect: Rect, p: Point, radius: f64) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .map(|h| (h, h.anchor(rect).distance(p)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h)
}

/// Translate `rect` so it lies inside the canvas, shrinking only when it is larger than the
/// canvas.
pub fn translate_into(rect: Rect, canvas: Canvas) -> Rect {
    let r = rect.abs();
    let cw = canvas.width_f();
    let ch = canvas.height_f();
    let w = r.width().min(cw);
    let h = r.height().min(ch);
    let x = clamp_span(r.x0, 0.0, cw - w);
    let y = clamp_span(r.y0, 0.0, ch - h);
    Rect::new(x, y, x + w, y + h)
}

/// `original` translated by `delta`, kept inside the canvas at its original size.
pub fn moved(original: Rect, delta: Vec2, canvas: Canvas) -> Rect {
    translate_into(original + delta, canvas)
}

/// `original` with the edges implied by `handle` moved by `delta`.
///
/// A moving edge stops `min_dim` short of the opposite edge, so the rect never inverts; the result
/// is then intersected with the canvas.
pub fn resized(original: Rect, handle: Handle, delta: Vec2, min_dim: f64, canvas: Canvas) -> Rect {
    let o = original.abs();
    let mut r = o;
    if handle.moves_left() {
        r.x0 = (o.x0 + delta.x).min(o.x1 - min_dim);
    }
    if handle.moves_right() {
        r.x1 = (o.x1 + delta.x).max(o.x0 + min_dim);
    }
    if handle.moves_top() {
        r.y0 = (o.y0 + delta.y).min(o.y1 - min_dim);
    }
    if handle.moves_bottom() {
        r.y1 = (o.y1 + delta.y).max(o.y0 + min_dim);
    }
    let bounds = canvas.bounds();
    Rect::new(
        r.x0.max(bounds.x0),
        r.y0.max(bounds.y0),
        r.x1.min(bounds.x1),
        r.y1.min(bounds.y1),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/authoring/handles.rs"]
mod tests;
