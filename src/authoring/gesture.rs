//! Pointer input and exclusive gesture ownership shared by the interactive tools.

use crate::foundation::core::Point;

/// Identifier a platform assigns to one pointer for the life of a contact.
pub type PointerId = u64;

/// Kind of device behind a pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

/// One pointer sample in screen coordinates relative to the tool's element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer identity.
    pub id: PointerId,
    /// Screen position.
    pub pos: Point,
    /// Device kind.
    pub kind: PointerKind,
}

impl PointerEvent {
    /// Mouse sample; mice always use pointer id 1.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            id: 1,
            pos: Point::new(x, y),
            kind: PointerKind::Mouse,
        }
    }

    /// Touch sample for finger `id`.
    pub fn touch(id: PointerId, x: f64, y: f64) -> Self {
        Self {
            id,
            pos: Point::new(x, y),
            kind: PointerKind::Touch,
        }
    }
}

/// Which gesture, if any, currently owns input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No gesture.
    #[default]
    Idle,
    /// Rubber-band drawing of a new region.
    Draw,
    /// Translating a region, or panning a photo.
    Move,
    /// Dragging a resize handle.
    Resize,
    /// Two-finger zoom.
    Pinch,
}

/// Single "active gesture owner" token.
///
/// Capture is taken on gesture start and released on pointer-up or leave; while held, only the
/// owning pointer may drive the gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerCapture {
    owner: Option<PointerId>,
}

impl PointerCapture {
    /// Claim capture for `id`. Fails if another pointer already holds it.
    pub fn capture(&mut self, id: PointerId) -> bool {
        match self.owner {
            None => {
                self.owner = Some(id);
                true
            }
            Some(owner) => owner == id,
        }
    }

    /// `true` when `id` owns capture.
    pub fn is_owner(&self, id: PointerId) -> bool {
        self.owner == Some(id)
    }

    /// Current owner.
    pub fn owner(&self) -> Option<PointerId> {
        self.owner
    }

    /// `true` when some pointer holds capture.
    pub fn is_captured(&self) -> bool {
        self.owner.is_some()
    }

    /// Release capture if `id` holds it; returns whether it did.
    pub fn release(&mut self, id: PointerId) -> bool {
        if self.is_owner(id) {
            self.owner = None;
            true
        } else {
            false
        }
    }

    /// Hand capture to `id` unconditionally.
    pub fn transfer(&mut self, id: PointerId) {
        self.owner = Some(id);
    }

    /// Drop capture regardless of owner.
    pub fn clear(&mut self) {
        self.owner = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/authoring/gesture.rs"]
mod tests;
