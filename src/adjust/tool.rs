//! Guest-facing pan/zoom editor for one photo.

use crate::authoring::gesture::{
    GestureState, PointerCapture, PointerEvent, PointerId, PointerKind,
};
use crate::crop::cover::PreviewTransform;
use crate::foundation::core::Point;
use crate::layout::model::CropAdjustment;

/// Tuning for [`CropAdjustTool`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdjustOpts {
    /// Offset change per preview-width of drag.
    pub drag_sensitivity: f64,
    /// Zoom change per wheel notch.
    pub wheel_step: f64,
    /// Lower zoom bound.
    pub zoom_min: f64,
    /// Upper zoom bound.
    pub zoom_max: f64,
}

impl Default for AdjustOpts {
    fn default() -> Self {
        Self {
            drag_sensitivity: 8.0,
            wheel_step: 0.1,
            zoom_min: CropAdjustment::ZOOM_MIN,
            zoom_max: CropAdjustment::ZOOM_MAX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    Pan {
        pointer: PointerId,
        kind: PointerKind,
        anchor: Point,
        last: Point,
        start: CropAdjustment,
    },
    Pinch {
        a: (PointerId, Point),
        b: (PointerId, Point),
        initial_distance: f64,
        initial_zoom: f64,
    },
}

/// Pan (drag) and zoom (pinch, wheel) one photo inside its region's aspect ratio.
///
/// The session starts from the photo's stored adjustment; [`Self::commit`] yields the edited
/// value and [`Self::cancel`] the untouched original.
#[derive(Clone, Debug)]
pub struct CropAdjustTool {
    opts: AdjustOpts,
    original: CropAdjustment,
    current: CropAdjustment,
    preview_size: (f64, f64),
    gesture: Gesture,
    capture: PointerCapture,
}

impl CropAdjustTool {
    /// Open a session. `preview_width`/`preview_height` are the on-screen size of the preview box.
    pub fn new(
        initial: Option<CropAdjustment>,
        preview_width: f64,
        preview_height: f64,
        opts: AdjustOpts,
    ) -> Self {
        let original = initial.unwrap_or_default().clamped();
        let mut tool = Self {
            opts,
            original,
            current: original,
            preview_size: (1.0, 1.0),
            gesture: Gesture::Idle,
            capture: PointerCapture::default(),
        };
        tool.set_preview_size(preview_width, preview_height);
        tool
    }

    /// Update the preview box size after a layout change; unusable sizes are ignored.
    pub fn set_preview_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.preview_size = (width, height);
        }
    }

    /// Adjustment being edited.
    pub fn current(&self) -> CropAdjustment {
        self.current
    }

    /// Adjustment the session started from.
    pub fn original(&self) -> CropAdjustment {
        self.original
    }

    /// Percentage transform for the live preview.
    pub fn preview_transform(&self) -> PreviewTransform {
        PreviewTransform::from_adjustment(&self.current)
    }

    /// Gesture in progress.
    pub fn gesture(&self) -> GestureState {
        match self.gesture {
            Gesture::Idle => GestureState::Idle,
            Gesture::Pan { .. } => GestureState::Move,
            Gesture::Pinch { .. } => GestureState::Pinch,
        }
    }

    fn clamp_zoom(&self, z: f64) -> f64 {
        if z.is_finite() {
            z.clamp(self.opts.zoom_min, self.opts.zoom_max)
        } else {
            self.current.zoom
        }
    }

    fn pan_from(&self, ev: PointerEvent) -> Gesture {
        Gesture::Pan {
            pointer: ev.id,
            kind: ev.kind,
            anchor: ev.pos,
            last: ev.pos,
            start: self.current,
        }
    }

    /// Pointer down: starts a pan, or upgrades a one-finger pan to a pinch on a second touch.
    pub fn pointer_down(&mut self, ev: PointerEvent) -> bool {
        match self.gesture {
            Gesture::Idle => {
                self.capture.capture(ev.id);
                self.gesture = self.pan_from(ev);
                true
            }
            Gesture::Pan {
                pointer,
                kind: PointerKind::Touch,
                last: first,
                ..
            } if ev.kind == PointerKind::Touch && ev.id != pointer => {
                let initial_distance = first.distance(ev.pos).max(1.0);
                self.gesture = Gesture::Pinch {
                    a: (pointer, first),
                    b: (ev.id, ev.pos),
                    initial_distance,
                    initial_zoom: self.current.zoom,
                };
                tracing::debug!(initial_distance, "pinch start");
                true
            }
            _ => false,
        }
    }

    /// Pointer move: pans by drag distance or zooms by pinch ratio.
    pub fn pointer_move(&mut self, ev: PointerEvent) -> bool {
        match self.gesture {
            Gesture::Pan {
                pointer,
                kind,
                anchor,
                start,
                ..
            } if pointer == ev.id => {
                let (w, h) = self.preview_size;
                let k = self.opts.drag_sensitivity;
                let dx = (ev.pos.x - anchor.x) / w;
                let dy = (ev.pos.y - anchor.y) / h;
                // The photo follows the pointer, so dragging right reveals more of the left side.
                self.current = CropAdjustment::new(
                    start.offset_x - k * dx,
                    start.offset_y - k * dy,
                    start.zoom,
                );
                self.gesture = Gesture::Pan {
                    pointer,
                    kind,
                    anchor,
                    last: ev.pos,
                    start,
                };
                true
            }
            Gesture::Pinch {
                mut a,
                mut b,
                initial_distance,
                initial_zoom,
            } => {
                if ev.id == a.0 {
                    a.1 = ev.pos;
                } else if ev.id == b.0 {
                    b.1 = ev.pos;
                } else {
                    return false;
                }
                let d = a.1.distance(b.1);
                let zoom = self.clamp_zoom(initial_zoom * d / initial_distance);
                self.current =
                    CropAdjustment::new(self.current.offset_x, self.current.offset_y, zoom);
                self.gesture = Gesture::Pinch {
                    a,
                    b,
                    initial_distance,
                    initial_zoom,
                };
                true
            }
            _ => false,
        }
    }

    /// Pointer up: ends a pan, or drops a pinch back to a pan on the remaining finger.
    pub fn pointer_up(&mut self, ev: PointerEvent) -> bool {
        match self.gesture {
            Gesture::Pan { pointer, .. } if pointer == ev.id => {
                self.gesture = Gesture::Idle;
                self.capture.release(ev.id);
                true
            }
            Gesture::Pinch { a, b, .. } if ev.id == a.0 || ev.id == b.0 => {
                let remaining = if ev.id == a.0 { b } else { a };
                self.capture.transfer(remaining.0);
                let (id, pos) = remaining;
                self.gesture = self.pan_from(PointerEvent::touch(id, pos.x, pos.y));
                tracing::debug!(zoom = self.current.zoom, "pinch end");
                true
            }
            _ => false,
        }
    }

    /// Pointer left the preview; same as pointer-up.
    pub fn pointer_leave(&mut self, ev: PointerEvent) -> bool {
        self.pointer_up(ev)
    }

    /// One wheel notch; negative `delta_y` (scroll up) zooms in.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        if delta_y != 0.0 && delta_y.is_finite() {
            let step = -delta_y.signum() * self.opts.wheel_step;
            let zoom = self.clamp_zoom(self.current.zoom + step);
            self.current =
                CropAdjustment::new(self.current.offset_x, self.current.offset_y, zoom);
        }
        self.current.zoom
    }

    /// Back to the identity adjustment. Still needs [`Self::commit`] to take effect.
    pub fn reset(&mut self) {
        self.current = CropAdjustment::IDENTITY;
        self.end_gesture();
    }

    /// "Done": the adjustment to store on the photo.
    pub fn commit(mut self) -> CropAdjustment {
        self.end_gesture();
        tracing::debug!(adjustment = ?self.current, "crop adjustment committed");
        self.current
    }

    /// "Cancel": discard the session, returning the adjustment it started with.
    pub fn cancel(self) -> CropAdjustment {
        self.original
    }

    fn end_gesture(&mut self) {
        self.gesture = Gesture::Idle;
        self.capture.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/adjust/tool.rs"]
mod tests;
