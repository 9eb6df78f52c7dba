use super::*;
use crate::foundation::rng::Rng64;

struct Fixed(f64);

impl RandomSource for Fixed {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

#[test]
fn aspect_ratios_parse_and_size() {
    assert_eq!("1:1".parse::<AspectRatio>().unwrap(), AspectRatio::Square);
    assert_eq!(" 9:16 ".parse::<AspectRatio>().unwrap(), AspectRatio::Portrait);
    assert!("4:3".parse::<AspectRatio>().is_err());
    assert_eq!(AspectRatio::Square.canvas().height, 1080);
    assert_eq!(AspectRatio::Portrait.canvas().height, 1920);
    assert_eq!(AspectRatio::Portrait.to_string(), "9:16");
}

#[test]
fn counts_follow_aspect() {
    assert_eq!(doodle_count(AspectRatio::Square.canvas()), 18);
    // 1920 / 1080 * 10 = 17.77..
    assert_eq!(doodle_count(AspectRatio::Portrait.canvas()), 25);
}

#[test]
fn zones_are_inclusive() {
    let zone = ExclusionZone::quote(AspectRatio::Square.canvas());
    assert!(zone.contains(Point::new(108.0, 270.0)));
    assert!(zone.contains(Point::new(972.0, 810.0)));
    assert!(!zone.contains(Point::new(107.9, 500.0)));
    let brand = ExclusionZone::branding(AspectRatio::Portrait.canvas());
    assert_eq!(brand.top, 1920.0 - 1080.0 * 0.18);
    assert_eq!(brand.bottom, 1920.0 - 1080.0 * 0.06);
}

#[test]
fn placements_never_land_in_zones() {
    for aspect in [AspectRatio::Square, AspectRatio::Portrait] {
        let canvas = aspect.canvas();
        let zones = [ExclusionZone::quote(canvas), ExclusionZone::branding(canvas)];
        for seed in 0..300 {
            let mut rng = Rng64::new(seed);
            let placements = plan_doodles(canvas, &mut rng);
            assert!(placements.len() <= doodle_count(canvas));
            for p in &placements {
                assert!(zones.iter().all(|z| !z.contains(p.position)));
                assert!(p.rotation.abs() <= 0.3);
                let base = doodle_base_size(canvas);
                assert!(p.size >= base * 0.6 && p.size < base * 1.4);
                assert!(p.kind != ShapeKind::Circle && p.kind != ShapeKind::Triangle);
            }
        }
    }
}

#[test]
fn centered_jitter_places_exactly() {
    // r = 0.5 puts every candidate in its cell center.
    let canvas = AspectRatio::Square.canvas();
    let placements = plan_doodles(canvas, &mut Fixed(0.5));
    // 5 rows of 216 px, column centers 135/405/675/945. Row 0 survives whole, rows 1..=3 fall in
    // the quote zone, and of the two row-4 candidates only x = 135 clears the branding band.
    assert_eq!(placements.len(), 5);
    let first = placements[0].position;
    assert!((first.x - 135.0).abs() < 1e-9 && (first.y - 108.0).abs() < 1e-9);
    let last = placements[4].position;
    assert!((last.x - 135.0).abs() < 1e-9 && (last.y - 972.0).abs() < 1e-9);
    assert!(placements.iter().all(|p| p.rotation == 0.0));
}

#[test]
fn border_is_closed_and_stays_near_inset() {
    let canvas = AspectRatio::Square.canvas();
    let spec = BorderSpec::outer(canvas);
    let path = hand_drawn_border(canvas, &spec, &mut Rng64::new(3));
    let els = path.elements();
    // move + 4 edges * 10 + 4 corners * 6 + close
    assert_eq!(els.len(), 1 + 40 + 24 + 1);
    assert!(matches!(els.last(), Some(kurbo::PathEl::ClosePath)));
    let bbox = kurbo::Shape::bounding_box(&path);
    let slack = spec.edge_wobble;
    assert!((bbox.x0 - spec.inset).abs() <= slack);
    assert!((bbox.x1 - (1080.0 - spec.inset)).abs() <= slack);
}

#[test]
fn border_without_jitter_hits_corner_points() {
    let canvas = AspectRatio::Square.canvas();
    let spec = BorderSpec::inner(canvas);
    let path = hand_drawn_border(canvas, &spec, &mut Fixed(0.5));
    let p = spec.inset;
    let r = spec.corner_radius;
    let kurbo::PathEl::LineTo(end_of_top) = path.elements()[spec.edge_segments] else {
        panic!("expected line");
    };
    assert!((end_of_top.x - (1080.0 - p - r)).abs() < 1e-9);
    assert!((end_of_top.y - p).abs() < 1e-9);
}

#[test]
fn inner_border_is_inset_further() {
    let canvas = AspectRatio::Square.canvas();
    let (outer, inner) = (BorderSpec::outer(canvas), BorderSpec::inner(canvas));
    assert!((inner.inset - (outer.inset + 27.0)).abs() < 1e-9);
    assert!((inner.corner_radius - outer.corner_radius * 0.7).abs() < 1e-9);
    assert_eq!(inner.edge_segments, 8);
}

#[test]
fn sparkle_has_four_tips() {
    let path = sparkle_path(Point::new(10.0, 10.0), 5.0);
    assert_eq!(path.elements().len(), 9);
    let bbox = kurbo::Shape::bounding_box(&path);
    assert!((bbox.y0 - 5.0).abs() < 1e-9);
    assert!((bbox.x1 - 15.0).abs() < 1e-9);
}

#[test]
fn corner_sparkles_sit_inside_the_border() {
    let canvas = AspectRatio::Portrait.canvas();
    let pad = 1080.0 * 0.06;
    for (c, _) in corner_sparkles(canvas) {
        assert!(c.x > pad && c.x < 1080.0 - pad);
        assert!(c.y > pad && c.y < 1920.0 - pad);
    }
}

#[test]
fn text_block_is_vertically_centered() {
    assert!(line_centers(0, 70.0, 1080.0).is_empty());
    assert_eq!(line_centers(1, 70.0, 1080.0), vec![540.0]);
    let ys = line_centers(3, 50.0, 1000.0);
    assert_eq!(ys, vec![430.0, 500.0, 570.0]);
}
