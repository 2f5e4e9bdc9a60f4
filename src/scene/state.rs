//! Per-slot asset state fed by load events.
//!
//! Loads finish in any order. Each completion is a [`SceneEvent`]; [`SceneState::reduce`] folds it
//! into the current value and the renderer reads that value without waiting on anything.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assets::store::{AssetLoader, PreparedImage};
use crate::scene::model::SceneDesc;

/// One independently loaded asset of a scene.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotId {
    /// Template background.
    Background,
    /// Captured photo by index.
    Photo(usize),
    /// Fixed overlay by index.
    Overlay(usize),
    /// Brand logo.
    Logo,
    /// Font for the message text.
    MessageFont,
    /// Sticker by instance id.
    Sticker(String),
}

impl SlotId {
    /// `true` for slots that hold fonts rather than images.
    pub fn is_font(&self) -> bool {
        matches!(self, SlotId::MessageFont)
    }
}

/// Decoded payload of a loaded slot.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadedAsset {
    /// Raster image.
    Image(Arc<PreparedImage>),
    /// Raw font bytes.
    Font(Arc<Vec<u8>>),
}

/// Load status of one slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SlotStatus {
    /// Not loaded yet.
    #[default]
    Pending,
    /// Ready to draw.
    Loaded(LoadedAsset),
    /// Failed; the layer is omitted.
    Failed,
}

/// Discrete load event.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// An image finished decoding.
    ImageLoaded(SlotId, Arc<PreparedImage>),
    /// A font finished loading.
    FontLoaded(SlotId, Arc<Vec<u8>>),
    /// Fetching or decoding failed.
    ImageFailed(SlotId),
    /// Start tracking a slot (e.g. a sticker added mid-session).
    SlotAdded(SlotId),
    /// Stop tracking a slot.
    SlotRemoved(SlotId),
}

/// Current status of every slot plus a revision counter bumped on each change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneState {
    slots: BTreeMap<SlotId, SlotStatus>,
    revision: u64,
}

impl SceneState {
    /// All slots of `desc`, pending.
    pub fn for_scene(desc: &SceneDesc) -> Self {
        Self {
            slots: desc
                .slot_sources()
                .into_iter()
                .map(|(slot, _)| (slot, SlotStatus::Pending))
                .collect(),
            revision: 0,
        }
    }

    /// Apply one event. Returns `true` when the state changed and a re-render is due.
    ///
    /// Events for untracked slots are ignored, so a late completion for a removed sticker is
    /// harmless.
    pub fn reduce(&mut self, event: SceneEvent) -> bool {
        let changed = match event {
            SceneEvent::ImageLoaded(slot, img) => {
                self.set(slot, SlotStatus::Loaded(LoadedAsset::Image(img)))
            }
            SceneEvent::FontLoaded(slot, bytes) => {
                self.set(slot, SlotStatus::Loaded(LoadedAsset::Font(bytes)))
            }
            SceneEvent::ImageFailed(slot) => self.set(slot, SlotStatus::Failed),
            SceneEvent::SlotAdded(slot) => {
                if self.slots.contains_key(&slot) {
                    false
                } else {
                    self.slots.insert(slot, SlotStatus::Pending);
                    true
                }
            }
            SceneEvent::SlotRemoved(slot) => self.slots.remove(&slot).is_some(),
        };
        if changed {
            self.revision += 1;
        }
        changed
    }

    fn set(&mut self, slot: SlotId, status: SlotStatus) -> bool {
        match self.slots.get_mut(&slot) {
            Some(cur) if *cur != status => {
                *cur = status;
                true
            }
            Some(_) => false,
            None => {
                tracing::debug!(?slot, "event for untracked slot ignored");
                false
            }
        }
    }

    /// Status of `slot`, `None` if untracked.
    pub fn status(&self, slot: &SlotId) -> Option<&SlotStatus> {
        self.slots.get(slot)
    }

    /// Loaded image in `slot`.
    pub fn image(&self, slot: &SlotId) -> Option<&Arc<PreparedImage>> {
        match self.slots.get(slot) {
            Some(SlotStatus::Loaded(LoadedAsset::Image(img))) => Some(img),
            _ => None,
        }
    }

    /// Loaded font bytes in `slot`.
    pub fn font(&self, slot: &SlotId) -> Option<&Arc<Vec<u8>>> {
        match self.slots.get(slot) {
            Some(SlotStatus::Loaded(LoadedAsset::Font(bytes))) => Some(bytes),
            _ => None,
        }
    }

    /// Slots still waiting.
    pub fn pending(&self) -> impl Iterator<Item = &SlotId> {
        self.slots
            .iter()
            .filter(|(_, s)| matches!(s, SlotStatus::Pending))
            .map(|(k, _)| k)
    }

    /// `true` once every slot is loaded or failed.
    pub fn is_settled(&self) -> bool {
        self.pending().next().is_none()
    }

    /// Incremented on every effective change.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Outcome of [`load_scene_assets`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Slots now loaded.
    pub loaded: usize,
    /// Slots that failed.
    pub failed: usize,
}

/// Synchronously load every pending slot of `desc` through `loader`.
///
/// Failures are recorded as [`SceneEvent::ImageFailed`] and logged; they never abort the scene.
pub fn load_scene_assets(
    desc: &SceneDesc,
    loader: &dyn AssetLoader,
    state: &mut SceneState,
) -> LoadReport {
    let mut report = LoadReport::default();
    for (slot, source) in desc.slot_sources() {
        if !matches!(state.status(&slot), Some(SlotStatus::Pending)) {
            continue;
        }
        let event = if slot.is_font() {
            match loader.load_bytes(&source) {
                Ok(bytes) => SceneEvent::FontLoaded(slot, Arc::new(bytes)),
                Err(e) => {
                    tracing::warn!(?slot, %source, error = %e, "font load failed");
                    SceneEvent::ImageFailed(slot)
                }
            }
        } else {
            match loader.load_image(&source) {
                Ok(img) => SceneEvent::ImageLoaded(slot, Arc::new(img)),
                Err(e) => {
                    tracing::warn!(?slot, %source, error = %e, "image load failed");
                    SceneEvent::ImageFailed(slot)
                }
            }
        };
        match &event {
            SceneEvent::ImageFailed(_) => report.failed += 1,
            _ => report.loaded += 1,
        }
        state.reduce(event);
    }
    report
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
