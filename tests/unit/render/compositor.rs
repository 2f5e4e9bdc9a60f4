use std::sync::Arc;

use super::*;
use crate::assets::store::PreparedImage;
use crate::foundation::core::Canvas;
use crate::layout::model::{FrameLayout, Placeholder, PlaceholderShape};
use crate::scene::model::PhotoDesc;

fn compositor() -> Compositor {
    let mut layout = FrameLayout::new(Canvas::new(200, 400));
    layout
        .placeholders
        .push(Placeholder::new(0.0, 0.0, 100.0, 100.0, PlaceholderShape::Rectangle));
    let mut desc = SceneDesc::new(layout);
    desc.photos.push(PhotoDesc::new("a.png"));
    desc.photos.push(PhotoDesc::new("b.png"));
    Compositor::new(desc, RenderOpts::default(), ScaleFitOpts::default())
}

#[test]
fn export_without_surface_is_none() {
    let mut c = compositor();
    assert!(!c.has_surface());
    assert!(c.export().is_none());
    assert!(c.export_png().is_none());
    assert!(c.render_preview().is_none());
}

#[test]
fn export_ignores_display_scale() {
    let mut c = compositor();
    c.attach_surface();
    assert_eq!(c.resize_viewport(50.0, 10_000.0), 0.25);

    let preview = c.render_preview().unwrap();
    assert_eq!((preview.width, preview.height), (50, 100));
    let frame = c.export().unwrap();
    assert_eq!((frame.width, frame.height), (200, 400));
    assert_eq!(c.scale().scale(), 0.25);
}

#[test]
fn apply_reports_changes_and_export_png_decodes() {
    let mut c = compositor();
    c.attach_surface();
    let img = Arc::new(PreparedImage::solid(4, 4, [0, 0, 255, 255]));
    assert!(c.apply(SceneEvent::ImageLoaded(SlotId::Photo(0), img.clone())));
    assert!(!c.apply(SceneEvent::ImageLoaded(SlotId::Photo(0), img)));

    let png = c.export_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (200, 400));
    assert_eq!(decoded.get_pixel(50, 50).0[2], 255);
    assert_eq!(decoded.get_pixel(150, 300).0[3], 0);
}

#[test]
fn coverage_reports_excess_photos() {
    let c = compositor();
    let cov = c.coverage();
    assert_eq!(cov.rendered, 1);
    assert_eq!(cov.excess_photos, 1);
    assert!(!cov.is_sufficient());
}

#[test]
fn sticker_slots_follow_sticker_lifecycle() {
    let mut c = compositor();
    let id = c.add_sticker("heart", "heart.png", Rect::new(0.0, 0.0, 20.0, 20.0));
    let slot = SlotId::Sticker(id.clone());
    assert!(c.state().status(&slot).is_some());
    assert!(c.move_sticker(&id, 5.0, 5.0));
    assert!(c.rotate_sticker(&id, 45.0));
    assert!(c.resize_sticker(&id, 1.5, 1.5));
    assert!(c.delete_sticker(&id));
    assert!(c.state().status(&slot).is_none());
    assert!(!c.delete_sticker(&id));
}

#[test]
fn detach_drops_the_surface() {
    let mut c = compositor();
    c.attach_surface();
    assert!(c.export().is_some());
    c.detach_surface();
    assert!(c.export().is_none());
    assert!(c.set_photo_adjustment(1, CropAdjustment::new(0.5, 0.5, 2.0)));
    assert_eq!(c.desc().photo_adjustment(1).zoom, 2.0);
}

#[test]
fn late_load_for_deleted_sticker_does_not_reach_a_new_one() {
    let mut c = compositor();
    c.add_sticker("heart", "a.png", Rect::new(0.0, 0.0, 10.0, 10.0));
    let removed = c.add_sticker("heart", "b.png", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(c.delete_sticker(&removed));
    let fresh = c.add_sticker("star", "d.png", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_ne!(fresh, removed);

    let stale = Arc::new(PreparedImage::solid(2, 2, [255, 0, 0, 255]));
    assert!(!c.apply(SceneEvent::ImageLoaded(SlotId::Sticker(removed), stale)));
    assert_eq!(
        c.state().status(&SlotId::Sticker(fresh)),
        Some(&crate::scene::state::SlotStatus::Pending)
    );
}
