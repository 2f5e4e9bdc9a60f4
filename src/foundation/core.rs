pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical output resolution in pixels.
///
/// Every placeholder, overlay and sticker coordinate lives in this space, independent of the
/// on-screen display scale and of the background image's own pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Portrait 1080×1920, the most common frame layout.
    pub const DEFAULT: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Construct a canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as `f64`.
    pub fn width_f(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f(self) -> f64 {
        f64::from(self.height)
    }

    /// Full canvas bounds `[0, width] × [0, height]`.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f(), self.height_f())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a16 = u16::from(a);
        Self {
            r: crate::foundation::math::mul_div255_u8(u16::from(r), a16),
            g: crate::foundation::math::mul_div255_u8(u16::from(g), a16),
            b: crate::foundation::math::mul_div255_u8(u16::from(b), a16),
            a,
        }
    }

    /// Return the channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
