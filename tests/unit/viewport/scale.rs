use super::*;

fn fit() -> ScaleFit {
    ScaleFit::new(Canvas::new(1080, 1920), ScaleFitOpts::default())
}

#[test]
fn width_bound_when_container_is_narrow() {
    let mut s = fit();
    let scale = s.update(540.0, 10_000.0);
    assert_eq!(scale, 0.5);
    assert_eq!(s.display_size(), (540.0, 960.0));
}

#[test]
fn height_budget_bound_when_viewport_is_short() {
    let mut s = fit();
    // 0.7 * 1371.428.. = 960 -> 0.5
    let scale = s.update(5000.0, 960.0 / 0.7);
    assert!((scale - 0.5).abs() < 1e-12);
}

#[test]
fn never_upscales() {
    let mut s = fit();
    assert_eq!(s.update(4000.0, 8000.0), 1.0);
}

#[test]
fn unusable_measurements_keep_previous_scale() {
    let mut s = fit();
    s.update(540.0, 10_000.0);
    assert_eq!(s.update(0.0, 10_000.0), 0.5);
    assert_eq!(s.update(f64::NAN, 10_000.0), 0.5);
    assert_eq!(s.update(540.0, -1.0), 0.5);
}

#[test]
fn update_is_idempotent_and_round_trips_points() {
    let mut s = fit();
    let a = s.update(270.0, 10_000.0);
    let b = s.update(270.0, 10_000.0);
    assert_eq!(a, b);

    let logical = s.to_logical(Point::new(27.0, 54.0));
    assert_eq!(logical, Point::new(108.0, 216.0));
    assert_eq!(s.to_screen(logical), Point::new(27.0, 54.0));
    assert_eq!(s.len_to_logical(10.0), 40.0);
}
