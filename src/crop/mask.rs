//! Shape masks applied to a composited photo.
//!
//! The mask only decides the outline a photo is drawn into; which source pixels are sampled is
//! decided independently by [`crate::crop::cover`].

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect};
use crate::layout::model::PlaceholderShape;

const PATH_TOLERANCE: f64 = 0.1;

/// Closed set of clip outlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskKind {
    /// Draw straight into the bounding box.
    None,
    /// Circle inscribed in the bounding box.
    Circle,
}

impl From<PlaceholderShape> for MaskKind {
    fn from(shape: PlaceholderShape) -> Self {
        match shape {
            PlaceholderShape::Rectangle => Self::None,
            PlaceholderShape::Circle => Self::Circle,
        }
    }
}

impl MaskKind {
    /// Inscribed circle: center of the box, radius `min(w, h) / 2`.
    pub fn inscribed_circle(region: Rect) -> kurbo::Circle {
        let r = region.abs();
        kurbo::Circle::new(r.center(), r.width().min(r.height()) * 0.5)
    }

    /// Outline to fill, in the same coordinates as `region`.
    pub fn clip_path(self, region: Rect) -> BezPath {
        match self {
            Self::None => region.abs().to_path(PATH_TOLERANCE),
            Self::Circle => Self::inscribed_circle(region).to_path(PATH_TOLERANCE),
        }
    }

    /// `true` when `p` is inside the mask outline.
    pub fn contains(self, region: Rect, p: Point) -> bool {
        match self {
            Self::None => {
                let r = region.abs();
                p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
            }
            Self::Circle => {
                let c = Self::inscribed_circle(region);
                (p - c.center).hypot() <= c.radius
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/mask.rs"]
mod tests;
