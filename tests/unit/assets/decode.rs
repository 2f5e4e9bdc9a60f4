use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(decode_image(b"not an image").is_err());
    assert!(parse_svg(br#"<svg"#).is_err());
}

#[test]
fn svg_is_rasterized_at_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
        <rect x="0" y="0" width="8" height="4" fill="#ff0000"/>
    </svg>"##;
    let img = decode_asset("stickers/star.svg", svg).unwrap();
    assert_eq!((img.width, img.height), (8, 4));
    assert_eq!(&img.rgba8_premul[..4], &[255, 0, 0, 255]);
}

#[test]
fn decode_asset_sniffs_content() {
    let svg = br#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"></svg>"#;
    let img = decode_asset("no-extension", svg).unwrap();
    assert_eq!((img.width, img.height), (2, 2));

    let png = png_bytes(3, 2, [0, 0, 0, 255]);
    let img = decode_asset("photo.png", &png).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
}
