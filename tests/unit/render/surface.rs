use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

#[test]
fn rejects_dimensions_beyond_u16() {
    let err = Surface::new(canvas(70_000, 10)).unwrap_err();
    assert!(err.to_string().starts_with("render error:"));
}

#[test]
fn clear_paints_every_pixel() {
    let mut s = Surface::new(canvas(4, 3)).unwrap();
    s.begin();
    s.clear(Rgba8::rgb(255, 0, 0));
    let frame = s.finish();
    assert_eq!((frame.width, frame.height), (4, 3));
    assert_eq!(frame.data.len(), 4 * 3 * 4);
    assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(3, 2), Some([255, 0, 0, 255]));
}

#[test]
fn begin_discards_previous_frame() {
    let mut s = Surface::new(canvas(2, 2)).unwrap();
    s.begin();
    s.clear(Rgba8::rgb(0, 0, 255));
    let _ = s.finish();
    s.begin();
    let frame = s.finish();
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn resize_changes_canvas() {
    let mut s = Surface::new(canvas(8, 8)).unwrap();
    s.resize(canvas(16, 4)).unwrap();
    assert_eq!(s.canvas(), canvas(16, 4));
    s.begin();
    assert_eq!(s.finish().data.len(), 16 * 4 * 4);
}

#[test]
fn filled_path_covers_its_interior_only() {
    let mut s = Surface::new(canvas(20, 20)).unwrap();
    s.begin();
    let rect = kurbo::Rect::new(-5.0, -5.0, 5.0, 5.0);
    let path = kurbo::Shape::to_path(&rect, 0.1);
    s.fill_path(&path, Affine::translate((10.0, 10.0)), Rgba8::rgb(0, 255, 0));
    let frame = s.finish();
    assert_eq!(frame.pixel(10, 10), Some([0, 255, 0, 255]));
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn stroke_leaves_center_of_closed_outline_empty() {
    let mut s = Surface::new(canvas(40, 40)).unwrap();
    s.begin();
    let circle = kurbo::Circle::new((20.0, 20.0), 15.0);
    let path = kurbo::Shape::to_path(&circle, 0.1);
    s.stroke_path(&path, Affine::IDENTITY, Rgba8::rgb(255, 255, 255), &StrokeStyle::solid(2.0));
    let frame = s.finish();
    assert_eq!(frame.pixel(20, 20), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(35, 20).map(|p| p[3] > 0), Some(true));
}

#[test]
fn dashing_splits_a_line_into_segments() {
    let mut line = BezPath::new();
    line.move_to((0.0, 0.0));
    line.line_to((100.0, 0.0));
    let dashed = dash_path(&line, &[10.0, 10.0]);
    let moves = dashed
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 5);
}

#[test]
fn gradient_hits_end_stops_at_corners() {
    let stops = [
        GradientStop {
            offset: 0.0,
            color: Rgba8::rgb(0, 0, 0),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::rgb(200, 100, 50),
        },
    ];
    let pixels = linear_gradient_premul(10, 1, Point::new(0.0, 0.0), Point::new(10.0, 0.0), &stops);
    assert_eq!(pixels.len(), 10);
    let rgba = |p: PremulRgba8| [p.r, p.g, p.b, p.a];
    // first pixel center sits at t = 0.05
    assert_eq!(rgba(pixels[0]), [10, 5, 3, 255]);
    assert_eq!(rgba(pixels[9]), [190, 95, 48, 255]);
}

#[test]
fn three_stop_gradient_passes_through_middle_stop() {
    let mid = Rgba8::rgb(45, 38, 64);
    let stops = [
        GradientStop {
            offset: 0.0,
            color: Rgba8::rgb(0, 0, 0),
        },
        GradientStop {
            offset: 0.5,
            color: mid,
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::rgb(255, 255, 255),
        },
    ];
    assert_eq!(sample_stops(&stops, 0.5), mid);
    assert_eq!(sample_stops(&stops, -1.0), stops[0].color);
    assert_eq!(sample_stops(&stops, 2.0), stops[2].color);
}

#[test]
fn gradient_fill_renders_through_image_paint() {
    let mut s = Surface::new(canvas(8, 8)).unwrap();
    s.begin();
    let stops = [
        GradientStop {
            offset: 0.0,
            color: Rgba8::rgb(26, 22, 37),
        },
        GradientStop {
            offset: 1.0,
            color: Rgba8::rgb(26, 22, 37),
        },
    ];
    s.fill_linear_gradient(Point::ZERO, Point::new(8.0, 8.0), &stops);
    let frame = s.finish();
    assert_eq!(frame.pixel(4, 4), Some([26, 22, 37, 255]));
}

#[test]
fn translucent_layers_keep_an_opaque_base_opaque() {
    let mut s = Surface::new(canvas(32, 32)).unwrap();
    s.begin();
    s.clear(Rgba8::rgb(26, 26, 46));
    let circle = kurbo::Shape::to_path(&kurbo::Circle::new((16.0, 16.0), 10.0), 0.1);
    s.stroke_path(
        &circle,
        Affine::IDENTITY,
        Rgba8::rgb(255, 107, 157).with_alpha(0.2),
        &StrokeStyle::solid(2.5),
    );
    s.fill_path(&circle, Affine::IDENTITY, Rgba8::rgba(255, 255, 255, 8));
    let frame = s.finish();
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
    // the paint still shows
    assert_ne!(frame.pixel(16, 16), Some([26, 26, 46, 255]));
}

#[test]
fn translucent_base_is_not_forced_opaque() {
    let mut s = Surface::new(canvas(4, 4)).unwrap();
    s.begin();
    s.clear(Rgba8::rgba(0, 0, 0, 128));
    let frame = s.finish();
    assert!(frame.data.chunks_exact(4).all(|px| px[3] < 255));
}

#[test]
fn opaque_base_does_not_outlive_the_frame() {
    let mut s = Surface::new(canvas(4, 4)).unwrap();
    s.begin();
    s.clear(Rgba8::rgb(0, 0, 0));
    let _ = s.finish();
    s.begin();
    s.fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0), Rgba8::rgb(255, 255, 255));
    let frame = s.finish();
    assert_eq!(frame.pixel(3, 0), Some([0, 0, 0, 0]));
}
