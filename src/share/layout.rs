use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use crate::doodle::catalog::random_share_kind;
use crate::doodle::shapes::ShapeKind;
use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::DoodleError;
use crate::foundation::rng::RandomSource;

/// Supported share image shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// 1080 x 1080.
    #[default]
    Square,
    /// 1080 x 1920, the story format.
    Portrait,
}

impl AspectRatio {
    /// Exact output size.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Square => Canvas {
                width: 1080,
                height: 1080,
            },
            Self::Portrait => Canvas {
                width: 1080,
                height: 1920,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = DoodleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" | "square" => Ok(Self::Square),
            "9:16" | "portrait" | "story" => Ok(Self::Portrait),
            other => Err(DoodleError::validation(format!(
                "unknown aspect ratio \"{other}\" (expected 1:1 or 9:16)"
            ))),
        }
    }
}

/// Rectangle where ornaments may not be centered. Edges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExclusionZone {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl ExclusionZone {
    /// Central 80% x 50% block reserved for the quote.
    pub fn quote(canvas: Canvas) -> Self {
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        Self {
            left: w * 0.1,
            right: w * 0.9,
            top: h * 0.25,
            bottom: h * 0.75,
        }
    }

    /// Band near the bottom edge reserved for the branding caption.
    pub fn branding(canvas: Canvas) -> Self {
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        Self {
            left: w * 0.2,
            right: w * 0.8,
            top: h - w * 0.18,
            bottom: h - w * 0.06,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// One ornament placement on a share image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoodlePlacement {
    /// Center of the ornament.
    pub position: Point,
    pub kind: ShapeKind,
    /// Radians.
    pub rotation: f64,
    pub size: f64,
}

const GRID_COLUMNS: usize = 4;
const CELL_PADDING: f64 = 0.2;

/// Base ornament size for a canvas.
pub fn doodle_base_size(canvas: Canvas) -> f64 {
    canvas.width_f64() * 0.035
}

/// Number of grid candidates for a canvas: `floor(h / w * 10) + 8`.
pub fn doodle_count(canvas: Canvas) -> usize {
    (canvas.height_f64() / canvas.width_f64() * 10.0).floor() as usize + 8
}

/// Scatter ornaments over a jittered 4-column grid, dropping candidates inside the exclusion zones.
pub fn plan_doodles(canvas: Canvas, rng: &mut impl RandomSource) -> Vec<DoodlePlacement> {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let zones = [ExclusionZone::quote(canvas), ExclusionZone::branding(canvas)];
    let count = doodle_count(canvas);
    let rows = count.div_ceil(GRID_COLUMNS);
    let cell_w = w / GRID_COLUMNS as f64;
    let cell_h = h / rows as f64;
    let base = doodle_base_size(canvas);
    let span = 1.0 - 2.0 * CELL_PADDING;

    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let (row, col) = (i / GRID_COLUMNS, i % GRID_COLUMNS);
        let position = Point::new(
            cell_w * col as f64 + cell_w * rng.range(CELL_PADDING, span),
            cell_h * row as f64 + cell_h * rng.range(CELL_PADDING, span),
        );
        if zones.iter().any(|z| z.contains(position)) {
            continue;
        }
        out.push(DoodlePlacement {
            position,
            kind: random_share_kind(rng),
            rotation: rng.signed(0.3),
            size: base * rng.range(0.6, 0.8),
        });
    }
    out
}

/// Geometry of one hand-drawn rounded rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderSpec {
    /// Inset from every canvas edge.
    pub inset: f64,
    pub corner_radius: f64,
    /// Straight segments per edge.
    pub edge_segments: usize,
    /// Full width of the per-vertex edge jitter.
    pub edge_wobble: f64,
    /// Full width of the per-vertex corner radius jitter.
    pub corner_wobble: f64,
}

impl BorderSpec {
    /// Solid outer outline.
    pub fn outer(canvas: Canvas) -> Self {
        let w = canvas.width_f64();
        Self {
            inset: w * 0.06,
            corner_radius: w * 0.04,
            edge_segments: 10,
            edge_wobble: w * 0.004,
            corner_wobble: w * 0.003,
        }
    }

    /// Dashed inner outline.
    pub fn inner(canvas: Canvas) -> Self {
        let outer = Self::outer(canvas);
        Self {
            inset: outer.inset + canvas.width_f64() * 0.025,
            corner_radius: outer.corner_radius * 0.7,
            edge_segments: 8,
            ..outer
        }
    }
}

const CORNER_SEGMENTS: usize = 6;

/// Closed wobbly rounded rectangle, clockwise from the end of the top-left corner.
pub fn hand_drawn_border(canvas: Canvas, spec: &BorderSpec, rng: &mut impl RandomSource) -> BezPath {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let (p, r) = (spec.inset, spec.corner_radius);
    let mut path = BezPath::new();
    path.move_to(Point::new(p + r, p));

    wavy_edge(&mut path, rng, spec, Point::new(p + r, p), Point::new(w - p - r, p));
    wobbly_corner(&mut path, rng, spec, Point::new(w - p - r, p + r), -FRAC_PI_2);
    wavy_edge(&mut path, rng, spec, Point::new(w - p, p + r), Point::new(w - p, h - p - r));
    wobbly_corner(&mut path, rng, spec, Point::new(w - p - r, h - p - r), 0.0);
    wavy_edge(&mut path, rng, spec, Point::new(w - p - r, h - p), Point::new(p + r, h - p));
    wobbly_corner(&mut path, rng, spec, Point::new(p + r, h - p - r), FRAC_PI_2);
    wavy_edge(&mut path, rng, spec, Point::new(p, h - p - r), Point::new(p, p + r));
    wobbly_corner(&mut path, rng, spec, Point::new(p + r, p + r), PI);

    path.close_path();
    path
}

fn wavy_edge(
    path: &mut BezPath,
    rng: &mut impl RandomSource,
    spec: &BorderSpec,
    from: Point,
    to: Point,
) {
    let n = spec.edge_segments.max(1);
    let step = (to - from) / n as f64;
    for i in 1..=n {
        let q = from + step * i as f64;
        let dx = rng.signed(spec.edge_wobble / 2.0);
        let dy = rng.signed(spec.edge_wobble / 2.0);
        path.line_to(Point::new(q.x + dx, q.y + dy));
    }
}

/// Quarter turn starting at `start` radians around `center`.
fn wobbly_corner(
    path: &mut BezPath,
    rng: &mut impl RandomSource,
    spec: &BorderSpec,
    center: Point,
    start: f64,
) {
    let step = FRAC_PI_2 / CORNER_SEGMENTS as f64;
    for i in 1..=CORNER_SEGMENTS {
        let angle = start + step * i as f64;
        let radius = spec.corner_radius + rng.signed(spec.corner_wobble / 2.0);
        path.line_to(Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        ));
    }
}

/// Corner ornament style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sparkle {
    /// Filled four-point star.
    Solid,
    /// Outlined four-point star.
    Outline,
}

/// Four-point star centered on `center` with tip radius `radius`.
pub fn sparkle_path(center: Point, radius: f64) -> BezPath {
    let waist = radius * 0.3;
    let mut path = BezPath::new();
    for i in 0..8 {
        let angle = -FRAC_PI_2 + i as f64 * PI / 4.0;
        let rad = if i % 2 == 0 { radius } else { waist };
        let q = Point::new(center.x + angle.cos() * rad, center.y + angle.sin() * rad);
        if i == 0 {
            path.move_to(q);
        } else {
            path.line_to(q);
        }
    }
    path.close_path();
    path
}

/// Corner ornament size for a canvas.
pub fn sparkle_font_size(canvas: Canvas) -> f64 {
    canvas.width_f64() * 0.025
}

/// Centers and styles of the four corner ornaments, just inside the outer border.
pub fn corner_sparkles(canvas: Canvas) -> [(Point, Sparkle); 4] {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let pad = w * 0.06;
    let fs = sparkle_font_size(canvas);
    // Glyph origins sit on the baseline; shift to the visual center of a glyph.
    let at = |x: f64, y: f64| Point::new(x + fs * 0.5, y - fs * 0.35);
    [
        (at(pad + w * 0.025, pad + w * 0.035), Sparkle::Solid),
        (at(w - pad - w * 0.035, pad + w * 0.035), Sparkle::Outline),
        (at(pad + w * 0.025, h - pad - w * 0.015), Sparkle::Outline),
        (at(w - pad - w * 0.035, h - pad - w * 0.015), Sparkle::Solid),
    ]
}

/// Center lines of a vertically centered text block.
pub fn line_centers(line_count: usize, font_size: f64, canvas_height: f64) -> Vec<f64> {
    let line_height = font_size * 1.4;
    let total = line_count as f64 * line_height;
    let start = canvas_height / 2.0 - total / 2.0 + line_height / 2.0;
    (0..line_count)
        .map(|i| start + i as f64 * line_height)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/share/layout.rs"]
mod tests;
