use super::*;
use crate::assets::store::InMemoryAssetLoader;
use crate::layout::model::{FrameLayout, Placeholder, PlaceholderShape};
use crate::scene::model::PhotoDesc;

fn scene() -> SceneDesc {
    let mut layout = FrameLayout::new(crate::foundation::core::Canvas::new(100, 100));
    layout
        .placeholders
        .push(Placeholder::new(0.0, 0.0, 50.0, 50.0, PlaceholderShape::Rectangle));
    let mut scene = SceneDesc::new(layout);
    scene.background = Some("bg.png".into());
    scene.photos.push(PhotoDesc::new("p0.png"));
    scene
}

fn img() -> Arc<PreparedImage> {
    Arc::new(PreparedImage::solid(2, 2, [255, 0, 0, 255]))
}

#[test]
fn slots_start_pending_and_settle_in_any_order() {
    let mut st = SceneState::for_scene(&scene());
    assert_eq!(st.pending().count(), 2);
    assert!(!st.is_settled());

    assert!(st.reduce(SceneEvent::ImageLoaded(SlotId::Photo(0), img())));
    assert!(st.image(&SlotId::Photo(0)).is_some());
    assert!(st.image(&SlotId::Background).is_none());

    assert!(st.reduce(SceneEvent::ImageFailed(SlotId::Background)));
    assert_eq!(st.status(&SlotId::Background), Some(&SlotStatus::Failed));
    assert!(st.is_settled());
    assert_eq!(st.revision(), 2);
}

#[test]
fn untracked_and_duplicate_events_do_not_bump_revision() {
    let mut st = SceneState::for_scene(&scene());
    assert!(!st.reduce(SceneEvent::ImageLoaded(SlotId::Logo, img())));
    assert!(st.reduce(SceneEvent::ImageFailed(SlotId::Background)));
    assert!(!st.reduce(SceneEvent::ImageFailed(SlotId::Background)));
    assert_eq!(st.revision(), 1);
}

#[test]
fn failed_slot_can_be_retried() {
    let mut st = SceneState::for_scene(&scene());
    st.reduce(SceneEvent::ImageFailed(SlotId::Photo(0)));
    assert!(st.reduce(SceneEvent::ImageLoaded(SlotId::Photo(0), img())));
    assert!(st.image(&SlotId::Photo(0)).is_some());
}

#[test]
fn slots_can_be_added_and_removed() {
    let mut st = SceneState::for_scene(&scene());
    let s = SlotId::Sticker("sticker-1".into());
    assert!(st.reduce(SceneEvent::SlotAdded(s.clone())));
    assert!(!st.reduce(SceneEvent::SlotAdded(s.clone())));
    assert_eq!(st.status(&s), Some(&SlotStatus::Pending));
    assert!(st.reduce(SceneEvent::SlotRemoved(s.clone())));
    assert!(!st.reduce(SceneEvent::ImageLoaded(s, img())));
}

#[test]
fn loader_failures_become_failed_slots() {
    let png = {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([0, 0, 255, 255]),
        ))
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
        buf
    };
    let loader = InMemoryAssetLoader::new().with("p0.png", png).unwrap();
    let desc = scene();
    let mut st = SceneState::for_scene(&desc);
    let report = load_scene_assets(&desc, &loader, &mut st);
    assert_eq!(report, LoadReport { loaded: 1, failed: 1 });
    assert_eq!(st.status(&SlotId::Background), Some(&SlotStatus::Failed));
    assert_eq!(st.image(&SlotId::Photo(0)).unwrap().width, 4);

    // nothing pending: second pass is a no-op
    assert_eq!(load_scene_assets(&desc, &loader, &mut st), LoadReport::default());
}
