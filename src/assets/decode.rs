use std::sync::Arc;

use anyhow::Context;

use crate::assets::store::PreparedImage;
use crate::foundation::error::{FrameError, FrameResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest edge accepted for a rasterized SVG.
const MAX_SVG_DIM: u32 = 16_384;

/// Decode PNG/JPEG/WebP/... bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> FrameResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes.
pub fn parse_svg(bytes: &[u8]) -> FrameResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize `tree` at its intrinsic size.
pub fn rasterize_svg(tree: &usvg::Tree) -> FrameResult<PreparedImage> {
    fn to_px(v: f32) -> FrameResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(FrameError::asset("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > MAX_SVG_DIM || height > MAX_SVG_DIM {
        return Err(FrameError::asset(format!(
            "svg raster size too large: {width}x{height} (max {MAX_SVG_DIM}x{MAX_SVG_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FrameError::asset("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

fn looks_like_svg(source: &str, bytes: &[u8]) -> bool {
    let ext_svg = std::path::Path::new(source)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if ext_svg {
        return true;
    }
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Decode any supported asset, dispatching on extension and content sniffing.
pub fn decode_asset(source: &str, bytes: &[u8]) -> FrameResult<PreparedImage> {
    if looks_like_svg(source, bytes) {
        let tree = parse_svg(bytes)?;
        rasterize_svg(&tree)
    } else {
        decode_image(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
