//! Live sticker manipulation.

use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{FrameError, FrameResult};
use crate::layout::model::PlacedSticker;

/// Smallest accepted scale factor.
const MIN_SCALE: f64 = 0.05;
/// Largest accepted scale factor.
const MAX_SCALE: f64 = 20.0;

/// Stickers placed during a session, in z-order (last on top).
///
/// Instance ids handed out by [`StickerBoard::add`] are never reused within a board, so a late
/// load for a deleted sticker cannot land on a newer one.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StickerBoard {
    stickers: Vec<PlacedSticker>,
    #[serde(skip)]
    last_seq: u64,
}

impl PartialEq for StickerBoard {
    fn eq(&self, other: &Self) -> bool {
        self.stickers == other.stickers
    }
}

impl StickerBoard {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stickers in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlacedSticker> {
        self.stickers.iter()
    }

    /// Number of stickers.
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// `true` when no sticker is placed.
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Look up by instance id.
    pub fn get(&self, id: &str) -> Option<&PlacedSticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut PlacedSticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    fn fresh_id(&mut self) -> String {
        let highest = self
            .stickers
            .iter()
            .filter_map(|s| s.id.strip_prefix("sticker-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.last_seq = self.last_seq.max(highest) + 1;
        format!("sticker-{}", self.last_seq)
    }

    /// Place a new sticker with its top-left at `(x, y)`; returns its instance id.
    pub fn add(
        &mut self,
        sticker_id: impl Into<String>,
        url: impl Into<String>,
        rect: Rect,
    ) -> String {
        let r = rect.abs();
        let id = self.fresh_id();
        self.stickers.push(PlacedSticker {
            id: id.clone(),
            sticker_id: sticker_id.into(),
            url: url.into(),
            x: r.x0,
            y: r.y0,
            width: r.width().max(1.0),
            height: r.height().max(1.0),
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        });
        tracing::debug!(%id, "sticker added");
        id
    }

    /// Translate by `(dx, dy)`.
    pub fn move_by(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        if !(dx.is_finite() && dy.is_finite()) {
            return false;
        }
        match self.get_mut(id) {
            Some(s) => {
                s.x += dx;
                s.y += dy;
                true
            }
            None => false,
        }
    }

    /// Set scale factors, clamped to a sane range.
    pub fn resize(&mut self, id: &str, scale_x: f64, scale_y: f64) -> bool {
        if !(scale_x.is_finite() && scale_y.is_finite()) {
            return false;
        }
        match self.get_mut(id) {
            Some(s) => {
                s.scale_x = scale_x.clamp(MIN_SCALE, MAX_SCALE);
                s.scale_y = scale_y.clamp(MIN_SCALE, MAX_SCALE);
                true
            }
            None => false,
        }
    }

    /// Set clockwise rotation in degrees, normalized to `[0, 360)`.
    pub fn rotate(&mut self, id: &str, degrees: f64) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        match self.get_mut(id) {
            Some(s) => {
                s.rotation = degrees.rem_euclid(360.0);
                true
            }
            None => false,
        }
    }

    /// Remove a sticker.
    pub fn delete(&mut self, id: &str) -> Option<PlacedSticker> {
        let idx = self.stickers.iter().position(|s| s.id == id)?;
        Some(self.stickers.remove(idx))
    }

    /// Topmost sticker whose transformed box contains `p`.
    pub fn hit(&self, p: Point) -> Option<&PlacedSticker> {
        self.stickers.iter().rev().find(|s| {
            let local = sticker_transform(s).inverse() * p;
            local.x >= 0.0 && local.y >= 0.0 && local.x <= s.width && local.y <= s.height
        })
    }

    pub(crate) fn validate(&self) -> FrameResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for s in &self.stickers {
            if s.id.trim().is_empty() {
                return Err(FrameError::validation("sticker id must be non-empty"));
            }
            if !seen.insert(s.id.as_str()) {
                return Err(FrameError::validation(format!(
                    "duplicate sticker id '{}'",
                    s.id
                )));
            }
            let nums = [s.x, s.y, s.width, s.height, s.rotation, s.scale_x, s.scale_y];
            if !nums.iter().all(|v| v.is_finite()) {
                return Err(FrameError::validation(format!(
                    "sticker '{}' has non-finite geometry",
                    s.id
                )));
            }
            if s.width <= 0.0 || s.height <= 0.0 || s.scale_x <= 0.0 || s.scale_y <= 0.0 {
                return Err(FrameError::validation(format!(
                    "sticker '{}' must have positive size and scale",
                    s.id
                )));
            }
            if s.url.trim().is_empty() {
                return Err(FrameError::validation(format!(
                    "sticker '{}' source must be non-empty",
                    s.id
                )));
            }
        }
        Ok(())
    }
}

impl From<Vec<PlacedSticker>> for StickerBoard {
    fn from(stickers: Vec<PlacedSticker>) -> Self {
        Self {
            stickers,
            last_seq: 0,
        }
    }
}

/// Maps the sticker's unscaled box `[0, w] × [0, h]` into canvas space.
///
/// The top-left corner `(x, y)` is the pivot for rotation and scale.
pub fn sticker_transform(s: &PlacedSticker) -> Affine {
    Affine::translate((s.x, s.y))
        * Affine::rotate(s.rotation.to_radians())
        * Affine::scale_non_uniform(s.scale_x, s.scale_y)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stickers.rs"]
mod tests;
