use super::*;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{a} != {b}");
}

fn active_at(x: f64, y: f64) -> PointerState {
    PointerState {
        position: Point::new(x, y),
        active: true,
    }
}

#[test]
fn float_offset_decouples_axes() {
    let v = float_offset(0.0, 0.5, 0.0, 10.0);
    assert_close(v.x, 0.0);
    assert_close(v.y, 6.0);

    let t = 2.0;
    let v = float_offset(t, 0.5, 1.0, 10.0);
    assert_close(v.x, (t * 0.5 + 1.0).sin() * 10.0);
    assert_close(v.y, (t * 0.35 + 1.0).cos() * 6.0);
}

#[test]
fn zero_amplitude_floats_nowhere() {
    assert_eq!(float_offset(123.4, 0.7, 2.0, 0.0), Vec2::ZERO);
}

#[test]
fn repulsion_vanishes_at_radius_and_for_inactive_pointer() {
    let anchor = Point::new(100.0, 100.0);
    assert_eq!(repulsion(anchor, active_at(300.0, 100.0), 200.0, 40.0), Vec2::ZERO);
    assert_eq!(repulsion(anchor, active_at(400.0, 100.0), 200.0, 40.0), Vec2::ZERO);
    let inactive = PointerState {
        position: anchor,
        active: false,
    };
    assert_eq!(repulsion(anchor, inactive, 200.0, 40.0), Vec2::ZERO);
}

#[test]
fn repulsion_is_full_strength_on_the_anchor() {
    let anchor = Point::new(50.0, 50.0);
    let v = repulsion(anchor, active_at(50.0, 50.0), 200.0, 40.0);
    assert_close(v.hypot(), 40.0);
    assert!(v.x.is_finite() && v.y.is_finite());
}

#[test]
fn repulsion_scales_linearly_and_points_away() {
    let anchor = Point::new(0.0, 0.0);
    let v = repulsion(anchor, active_at(100.0, 0.0), 200.0, 40.0);
    assert_close(v.x, -20.0);
    assert_close(v.y, 0.0);

    let v = repulsion(anchor, active_at(0.0, -150.0), 200.0, 40.0);
    assert_close(v.y, 10.0);
}

#[test]
fn easing_covers_the_given_fraction() {
    let p = ease_toward(Point::new(0.0, 0.0), Point::new(100.0, -50.0), 0.08);
    assert_close(p.x, 8.0);
    assert_close(p.y, -4.0);
}
