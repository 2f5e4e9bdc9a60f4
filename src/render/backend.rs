use std::io::Cursor;

use crate::foundation::error::{FrameError, FrameResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A rendered frame as RGBA8 pixels.
///
/// Frames come out of the renderer **premultiplied**; the `premultiplied` flag makes this explicit
/// at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 at `(x, y)`, `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy with straight alpha.
    pub fn to_straight(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    /// Encode as PNG (straight alpha, lossless).
    pub fn encode_png(&self) -> FrameResult<Vec<u8>> {
        let straight = self.to_straight();
        let img = image::RgbaImage::from_raw(straight.width, straight.height, straight.data)
            .ok_or_else(|| FrameError::render("frame buffer size does not match dimensions"))?;
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| FrameError::render(format!("encode png: {e}")))?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
