use super::*;

const EPS: f64 = 1e-9;

fn grid() -> Vec<CropAdjustment> {
    let mut out = Vec::new();
    for &zoom in &[1.0, 1.25, 1.5, 2.0, 2.75, 3.0] {
        for &ox in &[-1.0, -0.5, 0.0, 0.3, 1.0] {
            for &oy in &[-1.0, -0.2, 0.0, 0.5, 1.0] {
                out.push(CropAdjustment::new(ox, oy, zoom));
            }
        }
    }
    out
}

const SIZES: &[(f64, f64, f64, f64)] = &[
    (400.0, 300.0, 100.0, 100.0),
    (300.0, 400.0, 100.0, 100.0),
    (1920.0, 1080.0, 972.0, 729.0),
    (1080.0, 1920.0, 200.0, 500.0),
    (640.0, 640.0, 300.0, 100.0),
    (17.0, 911.0, 3.0, 2.0),
];

#[test]
fn cover_fit_crops_the_excess_dimension_centered() {
    let wide = cover_fit(400.0, 300.0, 100.0, 100.0);
    assert_eq!(wide, CropWindow::new(50.0, 0.0, 300.0, 300.0));

    let tall = cover_fit(300.0, 400.0, 100.0, 100.0);
    assert_eq!(tall, CropWindow::new(0.0, 50.0, 300.0, 300.0));

    let same = cover_fit(800.0, 600.0, 4.0, 3.0);
    assert_eq!(same, CropWindow::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn cover_fit_matches_region_aspect() {
    for &(iw, ih, rw, rh) in SIZES {
        let w = cover_fit(iw, ih, rw, rh);
        assert!((w.width / w.height - rw / rh).abs() < 1e-9);
        assert!(w.is_within(iw, ih, EPS));
    }
}

#[test]
fn zoom_one_is_identity_for_any_offset() {
    for &(iw, ih, rw, rh) in SIZES {
        let cover = cover_fit(iw, ih, rw, rh);
        for &ox in &[-1.0, -0.4, 0.0, 0.7, 1.0] {
            for &oy in &[-1.0, 0.0, 1.0] {
                let adj = CropAdjustment::new(ox, oy, 1.0);
                assert_eq!(crop_window(iw, ih, rw, rh, Some(&adj)), cover);
            }
        }
        assert_eq!(crop_window(iw, ih, rw, rh, None), cover);
    }
}

#[test]
fn adjusted_window_stays_inside_image_and_cover() {
    for &(iw, ih, rw, rh) in SIZES {
        let cover = cover_fit(iw, ih, rw, rh);
        for adj in grid() {
            let w = crop_window(iw, ih, rw, rh, Some(&adj));
            assert!(w.is_within(iw, ih, 1e-9), "{w:?} escapes {iw}x{ih}");
            assert!(w.x >= cover.x - 1e-9 && w.y >= cover.y - 1e-9);
            assert!(w.x + w.width <= cover.x + cover.width + 1e-9);
            assert!(w.y + w.height <= cover.y + cover.height + 1e-9);
            assert!((w.width - cover.width / adj.zoom).abs() < 1e-9);
        }
    }
}

#[test]
fn documented_example_window() {
    let adj = CropAdjustment::new(0.5, 0.0, 2.0);
    let w = crop_window(400.0, 300.0, 100.0, 100.0, Some(&adj));
    assert_eq!(w, CropWindow::new(162.5, 75.0, 150.0, 150.0));
}

#[test]
fn positive_offset_x_reveals_the_right_side() {
    let cover = cover_fit(400.0, 300.0, 100.0, 100.0);
    let right = crop_window(400.0, 300.0, 100.0, 100.0, Some(&CropAdjustment::new(1.0, 0.0, 2.0)));
    let left = crop_window(400.0, 300.0, 100.0, 100.0, Some(&CropAdjustment::new(-1.0, 0.0, 2.0)));
    assert!(right.center().x > cover.center().x);
    assert!(left.center().x < cover.center().x);
    assert!((right.x + right.width - (cover.x + cover.width)).abs() < EPS);
    assert!((left.x - cover.x).abs() < EPS);
}

#[test]
fn preview_percentages_match_pixel_windows() {
    for &(iw, ih, rw, rh) in SIZES {
        for adj in grid() {
            assert!(
                preview_matches_export(iw, ih, rw, rh, &adj, 1e-6),
                "mismatch for {adj:?} on {iw}x{ih} into {rw}x{rh}"
            );
        }
    }
}

#[test]
fn preview_and_export_affines_agree() {
    let region = Rect::new(40.0, 60.0, 140.0, 160.0);
    for adj in grid() {
        let cover = cover_fit(400.0, 300.0, region.width(), region.height());
        let window = crop_window(400.0, 300.0, region.width(), region.height(), Some(&adj));
        let a = PreviewTransform::from_adjustment(&adj)
            .source_to_region(cover, region)
            .as_coeffs();
        let b = window.source_to_region(region).as_coeffs();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn max_offset_percent_formula() {
    assert_eq!(PreviewTransform::max_offset_percent(1.0), 0.0);
    assert_eq!(PreviewTransform::max_offset_percent(2.0), 25.0);
    let t = PreviewTransform::from_adjustment(&CropAdjustment::new(0.5, -1.0, 2.0));
    assert_eq!(t.translate_x_pct, -12.5);
    assert_eq!(t.translate_y_pct, 25.0);
    assert_eq!(t.to_css(), "scale(2) translate(-12.5%, 25%)");
    assert_eq!(
        PreviewTransform::from_adjustment(&CropAdjustment::IDENTITY),
        PreviewTransform::IDENTITY
    );
}

#[test]
fn degenerate_sizes_fall_back_to_full_image() {
    assert_eq!(
        cover_fit(400.0, 300.0, 0.0, 100.0),
        CropWindow::new(0.0, 0.0, 400.0, 300.0)
    );
    assert_eq!(
        cover_fit(f64::NAN, 300.0, 10.0, 10.0),
        CropWindow::new(0.0, 0.0, 0.0, 300.0)
    );
}
