//! Parametric doodle outlines.
//!
//! Every tracer describes its shape centered on the local origin and scaled by `size`. Rotation and
//! translation belong to the caller, which applies them as a transform when painting the result.
//! Tracers carry no hidden state, so tracing the same kind twice at the same size yields identical
//! path commands.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

use kurbo::PathEl;

use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::DoodleError;

/// Closed set of doodle kinds shared by the live scene and the share compositor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Five-point star.
    Star,
    /// Two-lobed heart.
    Heart,
    /// Two-turn Archimedean spiral.
    Spiral,
    /// Five-peak zigzag line.
    Zigzag,
    /// Plain circle outline.
    Circle,
    /// Equilateral triangle.
    Triangle,
    /// Face with eyes and a smile.
    Smiley,
    /// Filled lightning bolt.
    Lightning,
    /// Puff of four overlapping circles.
    Cloud,
    /// Rhombus, taller than wide.
    Diamond,
    /// Sampled sine wave.
    Squiggle,
    /// Eight-ray star.
    Burst,
}

impl ShapeKind {
    /// Every kind in declaration order.
    pub const ALL: [ShapeKind; 12] = [
        ShapeKind::Star,
        ShapeKind::Heart,
        ShapeKind::Spiral,
        ShapeKind::Zigzag,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Smiley,
        ShapeKind::Lightning,
        ShapeKind::Cloud,
        ShapeKind::Diamond,
        ShapeKind::Squiggle,
        ShapeKind::Burst,
    ];

    /// Lowercase name used in configs and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Star => "star",
            ShapeKind::Heart => "heart",
            ShapeKind::Spiral => "spiral",
            ShapeKind::Zigzag => "zigzag",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Smiley => "smiley",
            ShapeKind::Lightning => "lightning",
            ShapeKind::Cloud => "cloud",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Squiggle => "squiggle",
            ShapeKind::Burst => "burst",
        }
    }

    /// Tracer function for this kind.
    pub fn tracer(self) -> Tracer {
        match self {
            ShapeKind::Star => trace_star,
            ShapeKind::Heart => trace_heart,
            ShapeKind::Spiral => trace_spiral,
            ShapeKind::Zigzag => trace_zigzag,
            ShapeKind::Circle => trace_circle,
            ShapeKind::Triangle => trace_triangle,
            ShapeKind::Smiley => trace_smiley,
            ShapeKind::Lightning => trace_lightning,
            ShapeKind::Cloud => trace_cloud,
            ShapeKind::Diamond => trace_diamond,
            ShapeKind::Squiggle => trace_squiggle,
            ShapeKind::Burst => trace_burst,
        }
    }

    /// Finishing action the caller applies after tracing.
    pub fn action(self) -> RenderAction {
        match self {
            ShapeKind::Smiley => RenderAction::Custom,
            ShapeKind::Lightning => RenderAction::Fill,
            ShapeKind::Star
            | ShapeKind::Heart
            | ShapeKind::Spiral
            | ShapeKind::Zigzag
            | ShapeKind::Circle
            | ShapeKind::Triangle
            | ShapeKind::Cloud
            | ShapeKind::Diamond
            | ShapeKind::Squiggle
            | ShapeKind::Burst => RenderAction::Stroke,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = DoodleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DoodleError::validation(format!("unknown doodle kind \"{s}\"")))
    }
}

/// How a traced path must be finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderAction {
    /// Stroke the current path.
    Stroke,
    /// Fill the current path.
    Fill,
    /// The tracer already painted every sub-path itself.
    Custom,
}

/// Path-building target with 2D-canvas semantics.
pub trait PathContext {
    /// Discard the current path.
    fn begin_path(&mut self);
    /// Start a new sub-path at `p`.
    fn move_to(&mut self, p: Point);
    /// Straight segment to `p`.
    fn line_to(&mut self, p: Point);
    /// Cubic bezier segment to `p`.
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);
    /// Clockwise circular arc (in y-down space) from `start` to `end` radians.
    ///
    /// When a current point exists, a straight segment joins it to the arc start.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    /// Close the current sub-path.
    fn close_path(&mut self);
    /// Paint the current path as a stroke.
    fn stroke(&mut self);
    /// Paint the current path as a fill.
    fn fill(&mut self);
}

/// Signature shared by every shape tracer.
pub type Tracer = fn(&mut dyn PathContext, f64);

/// Trace `kind` into `ctx` and report the finishing action.
pub fn trace_by_kind(kind: ShapeKind, ctx: &mut dyn PathContext, size: f64) -> RenderAction {
    (kind.tracer())(ctx, size);
    kind.action()
}

/// One painted path in local shape space.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// Outline painted with the active stroke style.
    Stroke(BezPath),
    /// Interior painted with the active fill color.
    Fill(BezPath),
}

impl PaintOp {
    /// The path this op paints.
    pub fn path(&self) -> &BezPath {
        match self {
            PaintOp::Stroke(p) | PaintOp::Fill(p) => p,
        }
    }
}

/// A fully finished doodle: every path to paint, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedShape {
    /// Action reported by the tracer.
    pub action: RenderAction,
    /// Paint operations in painter's order.
    pub ops: Vec<PaintOp>,
}

/// [`PathContext`] that records paths and paint calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct ShapeRecorder {
    path: BezPath,
    has_current: bool,
    ops: Vec<PaintOp>,
}

/// Flattening tolerance used when approximating arcs with cubics.
const ARC_TOLERANCE: f64 = 0.05;

impl ShapeRecorder {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path under construction.
    pub fn current_path(&self) -> &BezPath {
        &self.path
    }

    /// Apply `action` to the current path and return everything painted so far.
    pub fn finish(mut self, action: RenderAction) -> RecordedShape {
        match action {
            RenderAction::Stroke => self.stroke(),
            RenderAction::Fill => self.fill(),
            RenderAction::Custom => {}
        }
        RecordedShape {
            action,
            ops: self.ops,
        }
    }
}

impl PathContext for ShapeRecorder {
    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.has_current = false;
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.has_current = true;
    }

    fn line_to(&mut self, p: Point) {
        if self.has_current {
            self.path.line_to(p);
        } else {
            self.move_to(p);
        }
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        if !self.has_current {
            self.move_to(c1);
        }
        self.path.curve_to(c1, c2, p);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        let start_pt = center + Vec2::new(start.cos() * radius, start.sin() * radius);
        self.line_to(start_pt);
        let arc = kurbo::Arc::new(center, Vec2::new(radius, radius), start, end - start, 0.0);
        for el in arc.append_iter(ARC_TOLERANCE) {
            self.path.push(el);
        }
    }

    fn close_path(&mut self) {
        if self.has_current {
            self.path.push(PathEl::ClosePath);
        }
    }

    fn stroke(&mut self) {
        if !self.path.elements().is_empty() {
            self.ops.push(PaintOp::Stroke(self.path.clone()));
        }
    }

    fn fill(&mut self) {
        if !self.path.elements().is_empty() {
            self.ops.push(PaintOp::Fill(self.path.clone()));
        }
    }
}

/// Trace and finish `kind` at `size` in one call.
pub fn record_shape(kind: ShapeKind, size: f64) -> RecordedShape {
    let mut rec = ShapeRecorder::new();
    let action = trace_by_kind(kind, &mut rec, size);
    rec.finish(action)
}

fn polar(radius: f64, angle: f64) -> Point {
    Point::new(angle.cos() * radius, angle.sin() * radius)
}

/// Alternating-radius polygon starting at `phase`, one vertex every `PI / points`.
fn star_polygon(ctx: &mut dyn PathContext, points: usize, outer: f64, inner: f64, phase: f64) {
    ctx.begin_path();
    for i in 0..points * 2 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let p = polar(radius, (i as f64) * PI / (points as f64) + phase);
        if i == 0 {
            ctx.move_to(p);
        } else {
            ctx.line_to(p);
        }
    }
    ctx.close_path();
}

/// Five-point star, inner radius half the outer, first vertex straight up.
pub fn trace_star(ctx: &mut dyn PathContext, size: f64) {
    star_polygon(ctx, 5, size, size * 0.5, -FRAC_PI_2);
}

/// Heart from a bottom cusp up to a top dip, one bezier lobe per side.
pub fn trace_heart(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.move_to(Point::new(0.0, size * 0.3));
    ctx.curve_to(
        Point::new(-size, -size * 0.3),
        Point::new(-size * 0.5, -size),
        Point::new(0.0, -size * 0.5),
    );
    ctx.curve_to(
        Point::new(size * 0.5, -size),
        Point::new(size, -size * 0.3),
        Point::new(0.0, size * 0.3),
    );
    ctx.close_path();
}

/// Polyline sampled every 15 degrees over two turns, radius growing linearly to `size`.
pub fn trace_spiral(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    for deg in (0..720).step_by(15) {
        let angle = f64::from(deg).to_radians();
        let p = polar(f64::from(deg) / 720.0 * size, angle);
        if deg == 0 {
            ctx.move_to(p);
        } else {
            ctx.line_to(p);
        }
    }
}

/// Five alternating peaks of height `0.4 * size` between `(-size, 0)` and `(size, 0)`.
pub fn trace_zigzag(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.move_to(Point::new(-size, 0.0));
    for i in 0..5 {
        let x = -size + (f64::from(i) + 0.5) * (size * 2.0) / 5.0;
        let y = if i % 2 == 0 { -1.0 } else { 1.0 } * size * 0.4;
        ctx.line_to(Point::new(x, y));
    }
    ctx.line_to(Point::new(size, 0.0));
}

/// Full circle of radius `size`.
pub fn trace_circle(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.arc(Point::ORIGIN, size, 0.0, TAU);
}

/// Equilateral triangle with its apex at `(0, -size)`.
pub fn trace_triangle(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.move_to(Point::new(0.0, -size));
    ctx.line_to(Point::new(size * 0.866, size * 0.5));
    ctx.line_to(Point::new(-size * 0.866, size * 0.5));
    ctx.close_path();
}

/// Stroked face, filled eyes, stroked smile. Paints everything itself.
pub fn trace_smiley(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.arc(Point::ORIGIN, size, 0.0, TAU);
    ctx.stroke();

    ctx.begin_path();
    ctx.arc(Point::new(-size * 0.35, -size * 0.2), size * 0.12, 0.0, TAU);
    ctx.arc(Point::new(size * 0.35, -size * 0.2), size * 0.12, 0.0, TAU);
    ctx.fill();

    ctx.begin_path();
    ctx.arc(Point::new(0.0, size * 0.1), size * 0.5, 0.2, PI - 0.2);
    ctx.stroke();
}

/// Closed six-point bolt polygon.
pub fn trace_lightning(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.move_to(Point::new(size * 0.2, -size));
    ctx.line_to(Point::new(-size * 0.3, -size * 0.1));
    ctx.line_to(Point::new(size * 0.1, -size * 0.1));
    ctx.line_to(Point::new(-size * 0.2, size));
    ctx.line_to(Point::new(size * 0.3, size * 0.1));
    ctx.line_to(Point::new(-size * 0.1, size * 0.1));
    ctx.close_path();
}

/// Four overlapping circles forming a puff.
pub fn trace_cloud(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.arc(Point::new(-size * 0.5, 0.0), size * 0.4, 0.0, TAU);
    ctx.arc(Point::new(0.0, -size * 0.2), size * 0.5, 0.0, TAU);
    ctx.arc(Point::new(size * 0.5, 0.0), size * 0.4, 0.0, TAU);
    ctx.arc(Point::new(0.0, size * 0.2), size * 0.45, 0.0, TAU);
}

/// Rhombus with vertical radius `size` and horizontal radius `0.7 * size`.
pub fn trace_diamond(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.move_to(Point::new(0.0, -size));
    ctx.line_to(Point::new(size * 0.7, 0.0));
    ctx.line_to(Point::new(0.0, size));
    ctx.line_to(Point::new(-size * 0.7, 0.0));
    ctx.close_path();
}

/// Eleven-sample sine wave from `(-size, 0)` to `(size, 0)`.
pub fn trace_squiggle(ctx: &mut dyn PathContext, size: f64) {
    ctx.begin_path();
    ctx.move_to(Point::new(-size, 0.0));
    for i in 0..=10 {
        let x = -size + (f64::from(i) / 10.0) * size * 2.0;
        let y = (f64::from(i) * 1.2).sin() * size * 0.4;
        ctx.line_to(Point::new(x, y));
    }
}

/// Eight rays alternating between `size` and `0.4 * size`.
pub fn trace_burst(ctx: &mut dyn PathContext, size: f64) {
    star_polygon(ctx, 8, size, size * 0.4, 0.0);
}

#[cfg(test)]
#[path = "../../tests/unit/doodle/shapes.rs"]
mod tests;
