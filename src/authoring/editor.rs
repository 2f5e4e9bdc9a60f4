//! Placeholder authoring tool.
//!
//! Owns the region list for one authoring session. Input arrives either as pointer samples
//! (screen coordinates, converted through [`ScaleFit`]) or as direct commands from surrounding UI.
//! Every edit is clamped into the canvas; nothing here returns an error.

use crate::authoring::gesture::{GestureState, PointerCapture, PointerEvent};
use crate::authoring::handles::{self, Handle};
use crate::foundation::core::{Canvas, Point, Rect, Vec2};
use crate::layout::model::{FixedOverlay, FrameLayout, Placeholder, PlaceholderShape, Region};
use crate::viewport::scale::{ScaleFit, ScaleFitOpts};

/// Tuning for [`PlaceholderEditor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorOpts {
    /// Smallest committed draw, in logical px on both axes.
    pub min_draw_size: f64,
    /// Floor for width/height while resizing, in logical px.
    pub min_resize_dim: f64,
    /// Handle hit radius in screen px.
    pub handle_hit_px: f64,
    /// Upper bound on the region list.
    pub max_regions: usize,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            min_draw_size: 30.0,
            min_resize_dim: 20.0,
            handle_hit_px: 12.0,
            max_regions: 12,
        }
    }
}

/// What a move/resize acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditTarget {
    /// Index into the placeholder list.
    Placeholder(usize),
    /// Index into the overlay list.
    Overlay(usize),
}

/// Field addressed by [`PlaceholderEditor::set_field`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaceholderField {
    /// Left edge.
    X,
    /// Top edge.
    Y,
    /// Width.
    Width,
    /// Height.
    Height,
}

impl std::str::FromStr for PlaceholderField {
    type Err = crate::foundation::error::FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "width" | "w" => Ok(Self::Width),
            "height" | "h" => Ok(Self::Height),
            other => Err(crate::foundation::error::FrameError::validation(format!(
                "unknown placeholder field '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Active {
    Idle,
    Draw {
        start: Point,
        current: Point,
    },
    Move {
        target: EditTarget,
        original: Rect,
        start: Point,
    },
    Resize {
        target: EditTarget,
        handle: Handle,
        original: Rect,
        start: Point,
    },
}

/// Interactive editor over a [`FrameLayout`]'s placeholders and overlays.
#[derive(Clone, Debug)]
pub struct PlaceholderEditor {
    layout: FrameLayout,
    opts: EditorOpts,
    scale: ScaleFit,
    draw_shape: PlaceholderShape,
    selected: Option<EditTarget>,
    active: Active,
    capture: PointerCapture,
    dirty: bool,
}

impl PlaceholderEditor {
    /// Start a session over `layout`, clamping any region that sticks out of the canvas.
    pub fn new(mut layout: FrameLayout, opts: EditorOpts) -> Self {
        layout.clamp_to_canvas();
        let scale = ScaleFit::new(layout.canvas(), ScaleFitOpts::default());
        Self {
            layout,
            opts,
            scale,
            draw_shape: PlaceholderShape::Rectangle,
            selected: None,
            active: Active::Idle,
            capture: PointerCapture::default(),
            dirty: false,
        }
    }

    /// Empty session at `canvas` with default options.
    pub fn empty(canvas: Canvas) -> Self {
        Self::new(FrameLayout::new(canvas), EditorOpts::default())
    }

    /// Replace the display scale tracker (e.g. to share one configured elsewhere).
    pub fn with_scale(mut self, mut scale: ScaleFit) -> Self {
        scale.set_canvas(self.layout.canvas());
        self.scale = scale;
        self
    }

    /// Current layout.
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Consume the session, returning the edited layout.
    pub fn into_layout(self) -> FrameLayout {
        self.layout
    }

    /// Region list in composite order.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.layout.placeholders
    }

    /// Overlay list in draw order.
    pub fn overlays(&self) -> &[FixedOverlay] {
        &self.layout.overlays
    }

    /// Options in effect.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Display scale.
    pub fn scale(&self) -> &ScaleFit {
        &self.scale
    }

    /// Recompute the display scale after a viewport change.
    pub fn resize_viewport(&mut self, container_width: f64, viewport_height: f64) -> f64 {
        self.scale.update(container_width, viewport_height)
    }

    /// `true` if anything changed since the last [`Self::mark_saved`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after the caller persisted [`Self::layout`].
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Selected region, if any.
    pub fn selected(&self) -> Option<EditTarget> {
        self.selected
    }

    /// Select a region; out-of-range targets clear the selection.
    pub fn select(&mut self, target: Option<EditTarget>) {
        self.selected = target.filter(|t| self.rect_of(*t).is_some());
    }

    /// Shape given to newly drawn or generated regions.
    pub fn draw_shape(&self) -> PlaceholderShape {
        self.draw_shape
    }

    /// Set the shape for subsequent draws and auto-generation.
    pub fn set_draw_shape(&mut self, shape: PlaceholderShape) {
        self.draw_shape = shape;
    }

    /// Gesture currently in progress.
    pub fn gesture(&self) -> GestureState {
        match self.active {
            Active::Idle => GestureState::Idle,
            Active::Draw { .. } => GestureState::Draw,
            Active::Move { .. } => GestureState::Move,
            Active::Resize { .. } => GestureState::Resize,
        }
    }

    /// Live rubber-band rectangle while drawing, normalized.
    pub fn draw_preview(&self) -> Option<Rect> {
        match self.active {
            Active::Draw { start, current } => Some(Rect::from_points(start, current)),
            _ => None,
        }
    }

    /// Handle anchors of the selected region, in logical coordinates.
    pub fn selection_handles(&self) -> Vec<(Handle, Point)> {
        self.selected
            .and_then(|t| self.rect_of(t))
            .map(|r| Handle::ALL.iter().map(|h| (*h, h.anchor(r))).collect())
            .unwrap_or_default()
    }

    fn canvas(&self) -> Canvas {
        self.layout.canvas()
    }

    fn rect_of(&self, target: EditTarget) -> Option<Rect> {
        match target {
            EditTarget::Placeholder(i) => self.layout.placeholders.get(i).map(Region::rect),
            EditTarget::Overlay(i) => self.layout.overlays.get(i).map(Region::rect),
        }
    }

    fn set_rect_of(&mut self, target: EditTarget, rect: Rect) -> bool {
        let region: Option<&mut dyn Region> = match target {
            EditTarget::Placeholder(i) => self
                .layout
                .placeholders
                .get_mut(i)
                .map(|p| p as &mut dyn Region),
            EditTarget::Overlay(i) => self.layout.overlays.get_mut(i).map(|o| o as &mut dyn Region),
        };
        let Some(region) = region else {
            return false;
        };
        if region.rect() == rect {
            return false;
        }
        region.set_rect(rect);
        self.dirty = true;
        true
    }

    fn to_logical(&self, screen: Point) -> Point {
        let p = self.scale.to_logical(screen);
        let b = self.canvas().bounds();
        Point::new(p.x.clamp(b.x0, b.x1), p.y.clamp(b.y0, b.y1))
    }

    fn hit_region(&self, p: Point) -> Option<(EditTarget, Rect)> {
        let overlay = self
            .layout
            .overlays
            .iter()
            .rposition(|o| o.contains(p))
            .map(EditTarget::Overlay);
        let target = overlay.or_else(|| {
            self.layout
                .placeholders
                .iter()
                .rposition(|ph| ph.contains(p))
                .map(EditTarget::Placeholder)
        })?;
        Some((target, self.rect_of(target)?))
    }

    // ---- pointer input ----

    /// Begin a gesture. Returns `false` when ignored because another gesture owns input.
    pub fn pointer_down(&mut self, ev: PointerEvent) -> bool {
        if self.capture.is_captured() {
            return false;
        }
        let p = self.to_logical(ev.pos);
        let radius = self.scale.len_to_logical(self.opts.handle_hit_px);

        let on_handle = self.selected.and_then(|t| {
            let r = self.rect_of(t)?;
            handles::hit_handle(r, p, radius).map(|h| (t, h, r))
        });

        self.active = if let Some((target, handle, original)) = on_handle {
            Active::Resize {
                target,
                handle,
                original,
                start: p,
            }
        } else if let Some((target, original)) = self.hit_region(p) {
            self.selected = Some(target);
            Active::Move {
                target,
                original,
                start: p,
            }
        } else {
            self.selected = None;
            Active::Draw {
                start: p,
                current: p,
            }
        };
        self.capture.capture(ev.id);
        tracing::debug!(pointer = ev.id, gesture = ?self.gesture(), "gesture start");
        true
    }

    /// Continue the active gesture. Samples from non-owning pointers are ignored.
    pub fn pointer_move(&mut self, ev: PointerEvent) -> bool {
        if !self.capture.is_owner(ev.id) {
            return false;
        }
        let p = self.to_logical(ev.pos);
        let canvas = self.canvas();
        match self.active {
            Active::Idle => false,
            Active::Draw { start, .. } => {
                self.active = Active::Draw { start, current: p };
                true
            }
            Active::Move {
                target,
                original,
                start,
            } => {
                let r = handles::moved(original, p - start, canvas);
                self.set_rect_of(target, r)
            }
            Active::Resize {
                target,
                handle,
                original,
                start,
            } => {
                let r = handles::resized(
                    original,
                    handle,
                    p - start,
                    self.opts.min_resize_dim,
                    canvas,
                );
                self.set_rect_of(target, r)
            }
        }
    }

    /// End the active gesture, committing a draw if it is large enough.
    pub fn pointer_up(&mut self, ev: PointerEvent) -> bool {
        if !self.capture.is_owner(ev.id) {
            return false;
        }
        if let Active::Draw { start, .. } = self.active {
            let end = self.to_logical(ev.pos);
            self.add_from_draw(Rect::from_points(start, end));
        }
        tracing::debug!(pointer = ev.id, gesture = ?self.gesture(), "gesture end");
        self.active = Active::Idle;
        self.capture.release(ev.id);
        true
    }

    /// Pointer left the element; ends a captured gesture exactly like pointer-up.
    pub fn pointer_leave(&mut self, ev: PointerEvent) -> bool {
        self.pointer_up(ev)
    }

    // ---- commands ----

    /// Commit `rect` as a new region in the current draw shape and select it.
    ///
    /// Returns the new index, or `None` when the rect is below the minimum draw size or the list
    /// is full.
    pub fn add_from_draw(&mut self, rect: Rect) -> Option<usize> {
        let r = rect.abs().intersect(self.canvas().bounds());
        if r.width() < self.opts.min_draw_size || r.height() < self.opts.min_draw_size {
            tracing::debug!(w = r.width(), h = r.height(), "draw below minimum size discarded");
            return None;
        }
        if self.layout.placeholders.len() >= self.opts.max_regions {
            tracing::debug!(max = self.opts.max_regions, "region list full");
            return None;
        }
        self.layout
            .placeholders
            .push(Placeholder::from_rect(r, self.draw_shape));
        let idx = self.layout.placeholders.len() - 1;
        self.selected = Some(EditTarget::Placeholder(idx));
        self.dirty = true;
        tracing::debug!(idx, ?r, shape = ?self.draw_shape, "region added");
        Some(idx)
    }

    /// Translate a region by `(dx, dy)` logical px, clamped inside the canvas.
    pub fn move_by(&mut self, target: EditTarget, dx: f64, dy: f64) -> bool {
        if !(dx.is_finite() && dy.is_finite()) {
            return false;
        }
        let canvas = self.canvas();
        self.rect_of(target)
            .map(|r| handles::moved(r, Vec2::new(dx, dy), canvas))
            .is_some_and(|r| self.set_rect_of(target, r))
    }

    /// Drag `handle` of a region by `(dx, dy)` logical px.
    pub fn resize_by(&mut self, target: EditTarget, handle: Handle, dx: f64, dy: f64) -> bool {
        if !(dx.is_finite() && dy.is_finite()) {
            return false;
        }
        let canvas = self.canvas();
        let min = self.opts.min_resize_dim;
        self.rect_of(target)
            .map(|r| handles::resized(r, handle, Vec2::new(dx, dy), min, canvas))
            .is_some_and(|r| self.set_rect_of(target, r))
    }

    /// Remove region `idx`, keeping the selection pointed at the same region when possible.
    pub fn delete(&mut self, idx: usize) -> Option<Placeholder> {
        if idx >= self.layout.placeholders.len() {
            return None;
        }
        self.abort_gesture_on(EditTarget::Placeholder(idx));
        let removed = self.layout.placeholders.remove(idx);
        self.selected = match self.selected {
            Some(EditTarget::Placeholder(s)) if s == idx => None,
            Some(EditTarget::Placeholder(s)) if s > idx => Some(EditTarget::Placeholder(s - 1)),
            other => other,
        };
        self.dirty = true;
        tracing::debug!(idx, "region deleted");
        Some(removed)
    }

    /// Flip region `idx` between rectangle and circle.
    pub fn toggle_shape(&mut self, idx: usize) -> Option<PlaceholderShape> {
        let p = self.layout.placeholders.get_mut(idx)?;
        p.shape = p.shape.toggled();
        self.dirty = true;
        Some(p.shape)
    }

    /// Set one numeric field of region `idx`, then clamp like a gesture would.
    ///
    /// Position edits keep the size; size edits keep the top-left corner unless the region would
    /// leave the canvas. Non-finite values are ignored.
    pub fn set_field(&mut self, idx: usize, field: PlaceholderField, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let Some(r) = self.rect_of(EditTarget::Placeholder(idx)) else {
            return false;
        };
        let min = self.opts.min_resize_dim;
        let next = match field {
            PlaceholderField::X => r.with_origin((value, r.y0)),
            PlaceholderField::Y => r.with_origin((r.x0, value)),
            PlaceholderField::Width => r.with_size((value.max(min), r.height())),
            PlaceholderField::Height => r.with_size((r.width(), value.max(min))),
        };
        let clamped = handles::translate_into(next, self.canvas());
        self.set_rect_of(EditTarget::Placeholder(idx), clamped)
    }

    /// Replace the region list with `count` equal-height regions stacked top to bottom.
    ///
    /// Regions are horizontally centered inside a 5% side margin, sized 4:3 where the canvas
    /// height allows and separated by a gap of 2% of the canvas height. `count` is capped at the
    /// list bound; 0 clears the list.
    pub fn auto_generate(&mut self, count: usize) -> usize {
        let n = count.min(self.opts.max_regions);
        self.abort_gesture();
        self.layout.placeholders = auto_layout(self.canvas(), n, self.draw_shape);
        self.selected = None;
        self.dirty = true;
        tracing::debug!(requested = count, generated = n, "auto-generated regions");
        n
    }

    /// Remove every region.
    pub fn clear_all(&mut self) {
        self.abort_gesture();
        if !self.layout.placeholders.is_empty() {
            self.dirty = true;
        }
        self.layout.placeholders.clear();
        if matches!(self.selected, Some(EditTarget::Placeholder(_))) {
            self.selected = None;
        }
    }

    /// Append an overlay, clamped into the canvas, and select it.
    pub fn add_overlay(&mut self, mut overlay: FixedOverlay) -> usize {
        let r = handles::translate_into(overlay.rect(), self.canvas());
        overlay.set_rect(r);
        self.layout.overlays.push(overlay);
        let idx = self.layout.overlays.len() - 1;
        self.selected = Some(EditTarget::Overlay(idx));
        self.dirty = true;
        idx
    }

    /// Remove overlay `idx`.
    pub fn delete_overlay(&mut self, idx: usize) -> Option<FixedOverlay> {
        if idx >= self.layout.overlays.len() {
            return None;
        }
        self.abort_gesture_on(EditTarget::Overlay(idx));
        let removed = self.layout.overlays.remove(idx);
        self.selected = match self.selected {
            Some(EditTarget::Overlay(s)) if s == idx => None,
            Some(EditTarget::Overlay(s)) if s > idx => Some(EditTarget::Overlay(s - 1)),
            other => other,
        };
        self.dirty = true;
        Some(removed)
    }

    fn abort_gesture(&mut self) {
        self.active = Active::Idle;
        self.capture.clear();
    }

    fn abort_gesture_on(&mut self, target: EditTarget) {
        let busy = match self.active {
            Active::Move { target: t, .. } | Active::Resize { target: t, .. } => t == target,
            _ => false,
        };
        if busy {
            self.abort_gesture();
        }
    }
}

/// Evenly stacked regions for `count` photos on `canvas`.
pub fn auto_layout(canvas: Canvas, count: usize, shape: PlaceholderShape) -> Vec<Placeholder> {
    if count == 0 {
        return Vec::new();
    }
    let cw = canvas.width_f();
    let ch = canvas.height_f();
    let margin_x = cw * 0.05;
    let margin_y = ch * 0.05;
    let gap = ch * 0.02;
    let n = count as f64;

    let avail_w = cw - 2.0 * margin_x;
    let avail_h = (ch - 2.0 * margin_y - (n - 1.0) * gap) / n;
    let h = (avail_w * 3.0 / 4.0).min(avail_h).max(1.0);
    let w = avail_w.min(h * 4.0 / 3.0).max(1.0);
    let x = (cw - w) / 2.0;

    (0..count)
        .map(|i| {
            let y = margin_y + i as f64 * (h + gap);
            Placeholder::new(x, y, w, h, shape)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/authoring/editor.rs"]
mod tests;
