use super::*;

#[test]
fn default_canvas_is_portrait_full_hd() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1080, 1920));
    assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 1080.0, 1920.0));
}

#[test]
fn straight_to_premul_scales_color_channels() {
    let c = Rgba8Premul::from_straight_rgba(200, 100, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, ((200u16 * 128 + 127) / 255) as u8);
    assert_eq!(c.g, ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(c.b, 0);

    let opaque = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    assert_eq!(opaque.to_array(), [10, 20, 30, 255]);
}
