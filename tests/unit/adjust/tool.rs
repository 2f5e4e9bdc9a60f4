use super::*;

fn tool() -> CropAdjustTool {
    CropAdjustTool::new(None, 400.0, 400.0, AdjustOpts::default())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn drag_pans_with_sensitivity_and_clamps() {
    let mut t = tool();
    assert!(t.pointer_down(PointerEvent::mouse(200.0, 200.0)));
    t.pointer_move(PointerEvent::mouse(225.0, 200.0));
    assert!(close(t.current().offset_x, -0.5));
    assert!(close(t.current().offset_y, 0.0));

    t.pointer_move(PointerEvent::mouse(200.0, 150.0));
    assert!(close(t.current().offset_x, 0.0));
    assert!(close(t.current().offset_y, 1.0));

    t.pointer_move(PointerEvent::mouse(-1000.0, 200.0));
    assert_eq!(t.current().offset_x, 1.0);
    assert!(t.pointer_up(PointerEvent::mouse(-1000.0, 200.0)));
    assert_eq!(t.gesture(), GestureState::Idle);
}

#[test]
fn second_touch_switches_to_pinch() {
    let mut t = tool();
    assert!(t.pointer_down(PointerEvent::touch(1, 100.0, 200.0)));
    assert!(t.pointer_down(PointerEvent::touch(2, 300.0, 200.0)));
    assert_eq!(t.gesture(), GestureState::Pinch);

    t.pointer_move(PointerEvent::touch(2, 500.0, 200.0));
    assert!(close(t.current().zoom, 2.0));
    t.pointer_move(PointerEvent::touch(2, 900.0, 200.0));
    assert_eq!(t.current().zoom, 3.0);
    t.pointer_move(PointerEvent::touch(2, 150.0, 200.0));
    assert_eq!(t.current().zoom, 1.0);
}

#[test]
fn pinch_uses_the_first_finger_position_after_panning() {
    let mut t = tool();
    t.pointer_down(PointerEvent::touch(1, 100.0, 200.0));
    t.pointer_move(PointerEvent::touch(1, 110.0, 200.0));
    t.pointer_down(PointerEvent::touch(2, 210.0, 200.0));
    // 100px apart at pinch start
    t.pointer_move(PointerEvent::touch(2, 260.0, 200.0));
    assert!(close(t.current().zoom, 1.5));
}

#[test]
fn lifting_one_finger_falls_back_to_pan() {
    let mut t = tool();
    t.pointer_down(PointerEvent::touch(1, 100.0, 200.0));
    t.pointer_down(PointerEvent::touch(2, 300.0, 200.0));
    t.pointer_move(PointerEvent::touch(2, 500.0, 200.0));
    assert!(t.pointer_up(PointerEvent::touch(2, 500.0, 200.0)));
    assert_eq!(t.gesture(), GestureState::Move);

    t.pointer_move(PointerEvent::touch(1, 125.0, 200.0));
    assert!(close(t.current().offset_x, -0.5));
    assert!(close(t.current().zoom, 2.0));
}

#[test]
fn extra_pointers_are_ignored() {
    let mut t = tool();
    t.pointer_down(PointerEvent::mouse(100.0, 100.0));
    assert!(!t.pointer_down(PointerEvent::touch(5, 300.0, 300.0)));

    let mut t = tool();
    t.pointer_down(PointerEvent::touch(1, 100.0, 200.0));
    t.pointer_down(PointerEvent::touch(2, 300.0, 200.0));
    assert!(!t.pointer_down(PointerEvent::touch(3, 0.0, 0.0)));
    assert!(!t.pointer_move(PointerEvent::touch(3, 50.0, 50.0)));
}

#[test]
fn wheel_steps_zoom_within_range() {
    let mut t = tool();
    assert!(close(t.wheel(-120.0), 1.1));
    for _ in 0..40 {
        t.wheel(-1.0);
    }
    assert_eq!(t.current().zoom, 3.0);
    assert!(close(t.wheel(3.0), 2.9));
    for _ in 0..40 {
        t.wheel(1.0);
    }
    assert_eq!(t.current().zoom, 1.0);
    assert_eq!(t.wheel(0.0), 1.0);
}

#[test]
fn reset_commit_and_cancel() {
    let start = CropAdjustment::new(0.2, -0.3, 1.5);
    let mut t = CropAdjustTool::new(Some(start), 400.0, 300.0, AdjustOpts::default());
    t.wheel(-1.0);
    assert_eq!(t.clone().cancel(), start);

    t.reset();
    assert!(t.current().is_identity());
    assert_eq!(t.preview_transform(), PreviewTransform::IDENTITY);
    assert_eq!(t.original(), start);
    assert!(t.commit().is_identity());
}

#[test]
fn preview_transform_tracks_current_adjustment() {
    let mut t = CropAdjustTool::new(
        Some(CropAdjustment::new(0.5, 0.0, 2.0)),
        100.0,
        100.0,
        AdjustOpts::default(),
    );
    let pt = t.preview_transform();
    assert_eq!(pt.scale, 2.0);
    assert!(close(pt.translate_x_pct, -12.5));
    t.set_preview_size(0.0, 10.0);
    t.pointer_down(PointerEvent::mouse(0.0, 0.0));
    t.pointer_move(PointerEvent::mouse(12.5, 0.0));
    // preview size unchanged by the bad update: 12.5 / 100 * 8 = 1.0
    assert!(close(t.current().offset_x, -0.5));
}
