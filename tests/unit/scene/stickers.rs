use super::*;

fn board() -> (StickerBoard, String) {
    let mut b = StickerBoard::new();
    let id = b.add("heart", "stickers/heart.png", Rect::new(100.0, 100.0, 150.0, 140.0));
    (b, id)
}

#[test]
fn add_assigns_unique_ids() {
    let (mut b, first) = board();
    assert_eq!(first, "sticker-1");
    let second = b.add("star", "stickers/star.svg", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_ne!(first, second);
    b.delete(&first);
    let third = b.add("star", "stickers/star.svg", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_ne!(third, second);
    assert_eq!(b.len(), 2);
}

#[test]
fn move_resize_rotate_delete() {
    let (mut b, id) = board();
    assert!(b.move_by(&id, 5.0, -5.0));
    assert!(b.resize(&id, 2.0, 100.0));
    assert!(b.rotate(&id, -90.0));
    let s = b.get(&id).unwrap();
    assert_eq!((s.x, s.y), (105.0, 95.0));
    assert_eq!((s.scale_x, s.scale_y), (2.0, MAX_SCALE));
    assert_eq!(s.rotation, 270.0);

    assert!(!b.move_by("nope", 1.0, 1.0));
    assert!(!b.rotate(&id, f64::NAN));
    assert!(b.delete(&id).is_some());
    assert!(b.is_empty());
}

#[test]
fn transform_pivots_on_top_left() {
    let (mut b, id) = board();
    b.rotate(&id, 90.0);
    let s = b.get(&id).unwrap();
    let p = sticker_transform(s) * Point::new(10.0, 0.0);
    assert!((p.x - 100.0).abs() < 1e-9);
    assert!((p.y - 110.0).abs() < 1e-9);
}

#[test]
fn hit_test_follows_transform() {
    let (mut b, id) = board();
    assert_eq!(b.hit(Point::new(120.0, 120.0)).map(|s| s.id.as_str()), Some(id.as_str()));
    b.resize(&id, 0.5, 0.5);
    assert!(b.hit(Point::new(140.0, 135.0)).is_none());
}

#[test]
fn serializes_as_plain_array() {
    let (b, _) = board();
    let v = serde_json::to_value(&b).unwrap();
    assert!(v.is_array());
    assert_eq!(v[0]["stickerId"], "heart");
    let back: StickerBoard = serde_json::from_value(v).unwrap();
    assert_eq!(back, b);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut b = StickerBoard::new();
    let a = b.add("heart", "a.png", Rect::new(0.0, 0.0, 10.0, 10.0));
    let second = b.add("heart", "b.png", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(b.delete(&second).is_some());
    let third = b.add("heart", "c.png", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_ne!(third, second);
    assert_ne!(third, a);
    assert_eq!(third, "sticker-3");
}

#[test]
fn fresh_ids_skip_past_loaded_suffixes() {
    let mut b: StickerBoard = serde_json::from_str(
        r#"[{ "id": "sticker-7", "stickerId": "star", "url": "star.png",
              "x": 0, "y": 0, "width": 10, "height": 10 }]"#,
    )
    .unwrap();
    let id = b.add("star", "star.png", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(id, "sticker-8");
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut dup = board().0.iter().cloned().collect::<Vec<_>>();
    dup.push(dup[0].clone());
    let b = StickerBoard::from(dup);
    assert!(matches!(b.validate(), Err(FrameError::Validation(_))));
}
