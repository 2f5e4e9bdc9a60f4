use super::*;

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    }
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = frame();
    assert_eq!(f.pixel(0, 0), Some([128, 0, 0, 128]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn png_round_trip_is_straight_alpha() {
    let png = frame().encode_png().unwrap();
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 1));
    assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(back.get_pixel(1, 0).0[3], 0);
}

#[test]
fn mismatched_buffer_is_a_render_error() {
    let mut f = frame();
    f.data.pop();
    assert!(matches!(f.encode_png(), Err(FrameError::Render(_))));
}
