use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::color::ColorDef;
use crate::assets::store::{PreparedImage, TextBrushRgba8, TextLayoutEngine};
use crate::crop::cover::{PreviewTransform, cover_fit, crop_window};
use crate::crop::mask::MaskKind;
use crate::foundation::core::{Affine, Canvas, Rect};
use crate::foundation::error::{FrameError, FrameResult};
use crate::layout::model::Region;
use crate::render::backend::FrameRGBA;
use crate::scene::model::SceneDesc;
use crate::scene::state::{SceneState, SlotId, SlotStatus};
use crate::scene::stickers::sticker_transform;

/// Fixed styling for layers the scene does not position explicitly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    /// Canvas is cleared to this before the background.
    pub clear: ColorDef,
    /// Message font size in logical px when the scene gives none.
    pub message_size_px: f32,
    /// Message color when the scene gives none.
    pub message_color: ColorDef,
    /// Gap between the message block and the bottom edge.
    pub message_bottom_px: f64,
    /// Left/right margin the message wraps within.
    pub message_side_margin_px: f64,
    /// Logo is contain-fit into a square of this size.
    pub logo_box_px: f64,
    /// Logo distance from the top and right edges.
    pub logo_margin_px: f64,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            clear: ColorDef::TRANSPARENT,
            message_size_px: 48.0,
            message_color: ColorDef::WHITE,
            message_bottom_px: 80.0,
            message_side_margin_px: 60.0,
            logo_box_px: 160.0,
            logo_margin_px: 40.0,
        }
    }
}

/// Which numeric path photos are drawn through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderMode {
    /// Live preview at a display scale, photos through the percentage transform.
    Preview {
        /// Logical → output pixel factor.
        scale: f64,
    },
    /// Full-resolution output, photos through the pixel crop window.
    Export,
}

impl RenderMode {
    fn scale(self) -> f64 {
        match self {
            RenderMode::Preview { scale } => scale,
            RenderMode::Export => 1.0,
        }
    }
}

/// Output pixel size for `canvas` at `scale`.
pub fn output_size(canvas: Canvas, scale: f64) -> FrameResult<(u16, u16)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(FrameError::render("render scale must be finite and > 0"));
    }
    let dim = |v: f64| -> FrameResult<u16> {
        let px = (v * scale).round().max(1.0);
        if px > f64::from(u16::MAX) {
            return Err(FrameError::render(format!(
                "output dimension {px} exceeds {}",
                u16::MAX
            )));
        }
        Ok(px as u16)
    };
    Ok((dim(canvas.width_f())?, dim(canvas.height_f())?))
}

/// CPU rasterizer for one scene.
///
/// Layers are drawn in a fixed order: background, photos, overlays, message, logo, stickers.
/// A layer whose asset is not loaded is skipped; nothing else is affected.
pub struct CpuRenderer {
    opts: RenderOpts,
    ctx: Option<vello_cpu::RenderContext>,
    text_engine: TextLayoutEngine,
    image_cache: HashMap<SlotId, (Arc<PreparedImage>, vello_cpu::Image)>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("opts", &self.opts)
            .field("cached_images", &self.image_cache.len())
            .finish_non_exhaustive()
    }
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self::new(RenderOpts::default())
    }
}

impl CpuRenderer {
    /// Create a renderer.
    pub fn new(opts: RenderOpts) -> Self {
        Self {
            opts,
            ctx: None,
            text_engine: TextLayoutEngine::new(),
            image_cache: HashMap::new(),
        }
    }

    /// Options in effect.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Rasterize `desc` with whatever `state` has loaded so far.
    #[tracing::instrument(skip_all, fields(mode = ?mode, revision = state.revision()))]
    pub fn render(
        &mut self,
        desc: &SceneDesc,
        state: &SceneState,
        mode: RenderMode,
    ) -> FrameResult<FrameRGBA> {
        let canvas = desc.layout.canvas();
        let (width, height) = output_size(canvas, mode.scale())?;
        self.retain_cache(state);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let base = Affine::scale(mode.scale());

        let drawn = self.draw_layers(&mut ctx, desc, state, mode, base);
        let out = drawn.map(|()| {
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            FrameRGBA {
                width: u32::from(width),
                height: u32::from(height),
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            }
        });
        self.ctx = Some(ctx);
        out
    }

    fn draw_layers(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        desc: &SceneDesc,
        state: &SceneState,
        mode: RenderMode,
        base: Affine,
    ) -> FrameResult<()> {
        let canvas = desc.layout.canvas();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let clear = self.opts.clear.to_rgba8_premul();
        if clear.a > 0 {
            ctx.set_transform(affine_to_cpu(base));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                clear.r, clear.g, clear.b, clear.a,
            ));
            ctx.fill_rect(&rect_to_cpu(canvas.bounds()));
        }

        if desc.background.is_some() {
            self.draw_image_into(ctx, state, &SlotId::Background, base, canvas.bounds())?;
        }

        let photo_count = desc.photos.len().min(desc.layout.placeholders.len());
        for (i, region) in desc.layout.placeholders.iter().take(photo_count).enumerate() {
            let slot = SlotId::Photo(i);
            let Some((prepared, paint)) = self.paint_for(state, &slot) else {
                continue;
            };
            let rect = region.rect();
            let iw = f64::from(prepared.width);
            let ih = f64::from(prepared.height);
            let adj = desc.photo_adjustment(i);
            let source_to_region = match mode {
                RenderMode::Export => {
                    crop_window(iw, ih, rect.width(), rect.height(), Some(&adj))
                        .source_to_region(rect)
                }
                RenderMode::Preview { .. } => PreviewTransform::from_adjustment(&adj)
                    .source_to_region(cover_fit(iw, ih, rect.width(), rect.height()), rect),
            };
            let clip = MaskKind::from(region.shape).clip_path(rect);

            ctx.set_transform(affine_to_cpu(base));
            ctx.set_paint_transform(affine_to_cpu(source_to_region));
            ctx.set_paint(paint);
            ctx.fill_path(&bezpath_to_cpu(&clip));
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        }
        if desc.photos.len() > photo_count {
            tracing::debug!(
                photos = desc.photos.len(),
                placeholders = desc.layout.placeholders.len(),
                "excess photos not rendered"
            );
        }

        for (i, overlay) in desc.layout.overlays.iter().enumerate() {
            self.draw_image_into(ctx, state, &SlotId::Overlay(i), base, overlay.rect())?;
        }

        if let Some(message) = &desc.message {
            self.draw_message(ctx, desc, state, base, message)?;
        }

        if desc.logo.is_some() {
            self.draw_logo(ctx, state, canvas, base)?;
        }

        for sticker in desc.stickers.iter() {
            let slot = SlotId::Sticker(sticker.id.clone());
            let Some((prepared, paint)) = self.paint_for(state, &slot) else {
                continue;
            };
            let iw = f64::from(prepared.width);
            let ih = f64::from(prepared.height);
            let tr = base
                * sticker_transform(sticker)
                * Affine::scale_non_uniform(sticker.width / iw, sticker.height / ih);
            ctx.set_transform(affine_to_cpu(tr));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        }
        Ok(())
    }

    /// Stretch the image in `slot` over `dst`.
    fn draw_image_into(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        state: &SceneState,
        slot: &SlotId,
        base: Affine,
        dst: Rect,
    ) -> FrameResult<()> {
        let Some((prepared, paint)) = self.paint_for(state, slot) else {
            return Ok(());
        };
        let iw = f64::from(prepared.width);
        let ih = f64::from(prepared.height);
        let tr = base
            * Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / iw, dst.height() / ih);
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        Ok(())
    }

    fn draw_logo(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        state: &SceneState,
        canvas: Canvas,
        base: Affine,
    ) -> FrameResult<()> {
        let Some(prepared) = state.image(&SlotId::Logo) else {
            log_skipped(state, &SlotId::Logo);
            return Ok(());
        };
        let side = self.opts.logo_box_px;
        let margin = self.opts.logo_margin_px;
        let iw = f64::from(prepared.width);
        let ih = f64::from(prepared.height);
        let k = (side / iw).min(side / ih);
        let (w, h) = (iw * k, ih * k);
        let x0 = canvas.width_f() - margin - side + (side - w) * 0.5;
        let y0 = margin + (side - h) * 0.5;
        let dst = Rect::new(x0, y0, x0 + w, y0 + h);
        self.draw_image_into(ctx, state, &SlotId::Logo, base, dst)
    }

    fn draw_message(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        desc: &SceneDesc,
        state: &SceneState,
        base: Affine,
        message: &crate::scene::model::MessageDesc,
    ) -> FrameResult<()> {
        if message.text.trim().is_empty() {
            return Ok(());
        }
        let Some(font_bytes) = state.font(&SlotId::MessageFont) else {
            log_skipped(state, &SlotId::MessageFont);
            return Ok(());
        };
        let canvas = desc.layout.canvas();
        let [r, g, b, a] = message.color.unwrap_or(self.opts.message_color).to_rgba8();
        let brush = TextBrushRgba8 { r, g, b, a };
        let size = message.size_px.unwrap_or(self.opts.message_size_px);
        let max_w = (canvas.width_f() - 2.0 * self.opts.message_side_margin_px).max(1.0);

        let layout = match self.text_engine.layout_plain(
            &message.text,
            font_bytes,
            size,
            brush,
            Some(max_w as f32),
        ) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::warn!(error = %e, "message layout failed; layer omitted");
                return Ok(());
            }
        };
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
            0,
        );

        let left = self.opts.message_side_margin_px;
        let top = canvas.height_f() - self.opts.message_bottom_px - f64::from(layout.height());
        for line in layout.lines() {
            // Lines are laid out start-aligned; center each one inside the wrap width.
            let line_shift = (max_w as f32 - line.metrics().advance).max(0.0) * 0.5;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_transform(affine_to_cpu(base * Affine::translate((left, top))));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let baseline = run.baseline();
                let mut x = run.offset() + line_shift;
                let glyphs = run
                    .glyphs()
                    .map(|g| {
                        let glyph = vello_cpu::Glyph {
                            id: g.id,
                            x: x + g.x,
                            y: baseline - g.y,
                        };
                        x += g.advance;
                        glyph
                    })
                    .collect::<Vec<_>>();
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }
        Ok(())
    }

    /// Image paint for a loaded slot, converted once per decoded image.
    fn paint_for(
        &mut self,
        state: &SceneState,
        slot: &SlotId,
    ) -> Option<(Arc<PreparedImage>, vello_cpu::Image)> {
        let Some(prepared) = state.image(slot) else {
            log_skipped(state, slot);
            return None;
        };
        if prepared.width == 0 || prepared.height == 0 {
            tracing::warn!(?slot, "empty image; layer omitted");
            return None;
        }
        if let Some((cached, paint)) = self.image_cache.get(slot)
            && Arc::ptr_eq(cached, prepared)
        {
            return Some((cached.clone(), paint.clone()));
        }
        let paint =
            match rgba_premul_to_image(&prepared.rgba8_premul, prepared.width, prepared.height) {
                Ok(paint) => paint,
                Err(e) => {
                    tracing::warn!(
                        ?slot,
                        width = prepared.width,
                        height = prepared.height,
                        error = %e,
                        "image not drawable; layer omitted"
                    );
                    return None;
                }
            };
        self.image_cache
            .insert(slot.clone(), (prepared.clone(), paint.clone()));
        Some((prepared.clone(), paint))
    }

    fn retain_cache(&mut self, state: &SceneState) {
        self.image_cache.retain(|slot, (cached, _)| {
            state
                .image(slot)
                .is_some_and(|current| Arc::ptr_eq(current, cached))
        });
    }
}

fn log_skipped(state: &SceneState, slot: &SlotId) {
    match state.status(slot) {
        Some(SlotStatus::Failed) => tracing::warn!(?slot, "asset failed; layer omitted"),
        Some(SlotStatus::Pending) => tracing::debug!(?slot, "asset pending; layer omitted"),
        _ => tracing::debug!(?slot, "no asset for layer"),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &crate::foundation::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> FrameResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FrameError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FrameError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FrameError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> FrameResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
