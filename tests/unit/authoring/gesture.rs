use super::*;

#[test]
fn capture_is_exclusive() {
    let mut c = PointerCapture::default();
    assert!(c.capture(7));
    assert!(c.capture(7));
    assert!(!c.capture(8));
    assert!(c.is_owner(7));
    assert!(!c.release(8));
    assert!(c.release(7));
    assert!(!c.is_captured());
    assert!(c.capture(8));
}

#[test]
fn transfer_and_clear() {
    let mut c = PointerCapture::default();
    c.capture(1);
    c.transfer(2);
    assert_eq!(c.owner(), Some(2));
    c.clear();
    assert_eq!(c.owner(), None);
}

#[test]
fn constructors_tag_device_kind() {
    assert_eq!(PointerEvent::mouse(1.0, 2.0).kind, PointerKind::Mouse);
    let t = PointerEvent::touch(5, 1.0, 2.0);
    assert_eq!((t.id, t.kind), (5, PointerKind::Touch));
    assert_eq!(GestureState::default(), GestureState::Idle);
}
