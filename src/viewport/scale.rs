//! Display scale shared by the authoring tool, the adjustment tool and the live preview.

use crate::foundation::core::{Canvas, Point};

/// Tuning for [`ScaleFit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFitOpts {
    /// Fraction of the viewport height the canvas may occupy.
    pub height_budget_fraction: f64,
}

impl Default for ScaleFitOpts {
    fn default() -> Self {
        Self {
            height_budget_fraction: 0.7,
        }
    }
}

/// Uniform logical→screen scale, never upscaling.
///
/// Screen coordinates are relative to the top-left of the displayed canvas element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFit {
    canvas: Canvas,
    opts: ScaleFitOpts,
    scale: f64,
}

impl ScaleFit {
    /// Start at scale 1 until the first [`Self::update`].
    pub fn new(canvas: Canvas, opts: ScaleFitOpts) -> Self {
        Self {
            canvas,
            opts,
            scale: 1.0,
        }
    }

    /// Recompute `min(container_w / canvas_w, budget_h / canvas_h, 1)`.
    ///
    /// Idempotent; unusable measurements (zero, negative, NaN) keep the previous scale.
    pub fn update(&mut self, container_width: f64, viewport_height: f64) -> f64 {
        let budget = viewport_height * self.opts.height_budget_fraction;
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !(usable(container_width) && usable(budget)) || self.canvas.width == 0 {
            return self.scale;
        }
        let next = (container_width / self.canvas.width_f())
            .min(budget / self.canvas.height_f())
            .min(1.0);
        if next != self.scale {
            tracing::debug!(from = self.scale, to = next, "display scale changed");
        }
        self.scale = next;
        self.scale
    }

    /// Change the logical resolution; the scale is kept until the next update.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Current scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Logical resolution this scale applies to.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Screen → logical.
    pub fn to_logical(&self, screen: Point) -> Point {
        Point::new(screen.x / self.scale, screen.y / self.scale)
    }

    /// Logical → screen.
    pub fn to_screen(&self, logical: Point) -> Point {
        Point::new(logical.x * self.scale, logical.y * self.scale)
    }

    /// Screen distance → logical distance.
    pub fn len_to_logical(&self, screen_len: f64) -> f64 {
        screen_len / self.scale
    }

    /// On-screen size of the canvas element.
    pub fn display_size(&self) -> (f64, f64) {
        (
            self.canvas.width_f() * self.scale,
            self.canvas.height_f() * self.scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/scale.rs"]
mod tests;
