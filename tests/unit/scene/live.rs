use super::*;
use crate::foundation::rng::Rng64;

fn scene(w: u32, h: u32, seed: u64) -> LiveScene {
    LiveScene::with_viewport(
        SceneConfig::default(),
        Canvas {
            width: w,
            height: h,
        },
        SharedPointer::new(),
        &mut Rng64::new(seed),
    )
    .unwrap()
}

#[test]
fn population_size_follows_breakpoint() {
    assert_eq!(scene(1024, 768, 1).doodles().len(), 35);
    assert_eq!(scene(767, 1024, 1).doodles().len(), 20);
}

#[test]
fn same_seed_builds_same_population() {
    assert_eq!(scene(800, 600, 5).doodles(), scene(800, 600, 5).doodles());
}

#[test]
fn invalid_config_is_rejected_at_setup() {
    let cfg = SceneConfig {
        easing: 0.0,
        ..SceneConfig::default()
    };
    let err = LiveScene::with_viewport(
        cfg,
        Canvas {
            width: 100,
            height: 100,
        },
        SharedPointer::new(),
        &mut Rng64::new(0),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn step_advances_clock_and_rotation_only() {
    let mut s = scene(800, 600, 3);
    let before = s.doodles().to_vec();
    s.step();
    s.step();
    assert!((s.time() - 0.032).abs() < 1e-12);
    for (a, b) in before.iter().zip(s.doodles()) {
        assert_eq!(a.anchor(), b.anchor());
        assert_eq!(a.opacity(), b.opacity());
        assert_eq!(a.size(), b.size());
        assert!((b.rotation() - (a.rotation() + 2.0 * a.rotation_speed())).abs() < 1e-12);
    }
}

#[test]
fn resize_keeps_population() {
    let mut s = scene(1200, 800, 4);
    let before = s.doodles().to_vec();
    s.resize(Canvas {
        width: 300,
        height: 300,
    });
    assert_eq!(s.viewport().width, 300);
    assert_eq!(s.doodles(), &before[..]);
}

#[test]
fn grid_has_a_line_every_spacing() {
    let s = scene(130, 70, 0);
    // x = 0, 60, 120 and y = 0, 60
    let moves = s
        .grid_path()
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 5);
}

#[test]
fn render_paints_background() {
    let s = scene(64, 48, 0);
    let mut surface = Surface::new(s.viewport()).unwrap();
    s.render(&mut surface);
    let frame = surface.finish();
    assert_eq!((frame.width, frame.height), (64, 48));
    // every pixel is opaque after the background fill
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}
