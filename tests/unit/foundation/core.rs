use super::*;

#[test]
fn progress_is_clamped_outside_window() {
    let w = ScrollWindow::new(100.0, 300.0);
    assert_eq!(w.progress(-50.0), 0.0);
    assert_eq!(w.progress(100.0), 0.0);
    assert_eq!(w.progress(200.0), 0.5);
    assert_eq!(w.progress(300.0), 1.0);
    assert_eq!(w.progress(10_000.0), 1.0);
}

#[test]
fn degenerate_window_forces_full_progress_at_start() {
    let w = ScrollWindow::new(250.0, 250.0);
    assert!(w.is_degenerate());
    assert_eq!(w.progress(249.9), 0.0);
    assert_eq!(w.progress(250.0), 1.0);
    assert!(w.progress(250.0).is_finite());
}

#[test]
fn inverted_window_collapses_to_start() {
    let w = ScrollWindow::new(400.0, 100.0);
    assert_eq!(w.end, 400.0);
    assert!(w.is_degenerate());
}

#[test]
fn viewport_rejects_negative_sizes() {
    assert!(Viewport::new(-1.0, 10.0).is_err());
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    assert!(Viewport::new(1280.0, 720.0).is_ok());
}

#[test]
fn viewport_normalizes_pointer_into_unit_square() {
    let vp = Viewport::new(200.0, 100.0).unwrap();
    assert_eq!(vp.normalized(Point::new(100.0, 50.0)), Vec2::new(0.0, 0.0));
    assert_eq!(vp.normalized(Point::new(0.0, 0.0)), Vec2::new(-1.0, -1.0));
    assert_eq!(vp.normalized(Point::new(200.0, 100.0)), Vec2::new(1.0, 1.0));
}

#[test]
fn direction_between_samples() {
    assert_eq!(Direction::between(10.0, 20.0), Direction::Forward);
    assert_eq!(Direction::between(20.0, 10.0), Direction::Backward);
    assert_eq!(Direction::between(5.0, 5.0), Direction::Forward);
}
