use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn in_memory_loader_resolves_normalized_keys() {
    let loader = InMemoryAssetLoader::new()
        .with("photos/p0.png", png(4, 3))
        .unwrap();
    let img = loader.load_image("./photos\\p0.png").unwrap();
    assert_eq!((img.width, img.height), (4, 3));
    assert!(matches!(
        loader.load_bytes("photos/missing.png"),
        Err(FrameError::Asset(_))
    ));
}

#[test]
fn fs_loader_reads_below_root_only() {
    let dir = std::env::temp_dir().join(format!("framecomp-store-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("bg")).unwrap();
    std::fs::write(dir.join("bg/frame.png"), png(2, 2)).unwrap();

    let loader = FsAssetLoader::new(&dir);
    assert_eq!(loader.root(), dir.as_path());
    let img = loader.load_image("bg/frame.png").unwrap();
    assert_eq!((img.width, img.height), (2, 2));
    assert!(loader.load_bytes("../etc/passwd").is_err());
    assert!(matches!(
        loader.load_bytes("bg/nope.png"),
        Err(FrameError::Asset(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn solid_image_has_expected_len() {
    let img = PreparedImage::solid(3, 2, [1, 2, 3, 4]);
    assert_eq!(img.rgba8_premul.len(), 24);
    assert_eq!(&img.rgba8_premul[20..], &[1, 2, 3, 4]);
}

#[test]
fn text_layout_rejects_bad_size_and_bad_font() {
    let mut engine = TextLayoutEngine::new();
    let junk = vec![0u8; 16];
    assert!(engine
        .layout_plain("hi", &junk, 0.0, TextBrushRgba8::default(), None)
        .is_err());
    assert!(engine
        .layout_plain("hi", &junk, 12.0, TextBrushRgba8::default(), None)
        .is_err());
}
