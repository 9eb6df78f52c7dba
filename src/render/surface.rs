use std::sync::Arc;

use vello_cpu::peniko::color::PremulRgba8;

use crate::doodle::shapes::{PaintOp, RecordedShape};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{DoodleError, DoodleResult};
use crate::render::frame::FrameRGBA;

/// Stroke settings for outline painting. Caps and joins are always round.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in surface units.
    pub width: f64,
    /// Optional `[on, off]` dash pattern.
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    /// Solid stroke of `width`.
    pub fn solid(width: f64) -> Self {
        Self { width, dash: None }
    }

    /// Dashed stroke of `width`.
    pub fn dashed(width: f64, on: f64, off: f64) -> Self {
        Self {
            width,
            dash: Some([on, off]),
        }
    }
}

/// Color stop of a linear gradient, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis.
    pub offset: f64,
    /// Color at this position.
    pub color: Rgba8,
}

/// CPU raster target backed by `vello_cpu`.
///
/// Draw calls are recorded into the render context and rasterized by [`Surface::finish`]. Once the
/// frame has an opaque base ([`Surface::clear`] or an opaque full-surface gradient), every pixel read
/// back is opaque.
pub struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    opaque_base: bool,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("opaque_base", &self.opaque_base)
            .finish()
    }
}

fn surface_dims(canvas: Canvas) -> DoodleResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| DoodleError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| DoodleError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(DoodleError::render("surface dimensions must be > 0"));
    }
    Ok((w, h))
}

impl Surface {
    /// Allocate a surface of `canvas` size.
    pub fn new(canvas: Canvas) -> DoodleResult<Self> {
        let (width, height) = surface_dims(canvas)?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            opaque_base: false,
        })
    }

    /// Reallocate for a new size. No-op when the size is unchanged.
    pub fn resize(&mut self, canvas: Canvas) -> DoodleResult<()> {
        let (width, height) = surface_dims(canvas)?;
        if width == self.width && height == self.height {
            return Ok(());
        }
        *self = Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            opaque_base: false,
        };
        Ok(())
    }

    /// Current size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Drop any recorded draw calls and start a new frame.
    pub fn begin(&mut self) {
        self.ctx.reset();
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.opaque_base = false;
    }

    fn set_solid(&mut self, transform: Affine, color: Rgba8) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::new(transform.as_coeffs()));
        self.ctx.set_paint(color.to_cpu());
    }

    fn full_rect(&self) -> vello_cpu::kurbo::Rect {
        vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Fill an axis-aligned rectangle in surface space.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.set_solid(Affine::IDENTITY, color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    /// Fill the whole surface.
    pub fn clear(&mut self, color: Rgba8) {
        self.set_solid(Affine::IDENTITY, color);
        let full = self.full_rect();
        self.ctx.fill_rect(&full);
        self.opaque_base |= color.a == 255;
    }

    /// Fill `path` under `transform`.
    pub fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8) {
        self.set_solid(transform, color);
        self.ctx.fill_path(&cpu_path(path));
    }

    /// Stroke `path` under `transform` with round caps and joins.
    pub fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8, style: &StrokeStyle) {
        let dashed;
        let path = match style.dash {
            Some(pattern) => {
                dashed = dash_path(path, &pattern);
                &dashed
            }
            None => path,
        };
        self.set_solid(transform, color);
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(style.width)
                .with_join(vello_cpu::kurbo::Join::Round)
                .with_caps(vello_cpu::kurbo::Cap::Round),
        );
        self.ctx.stroke_path(&cpu_path(path));
    }

    /// Replay a recorded doodle: strokes use `line_width`, fills use the same `color`.
    pub fn paint_shape(
        &mut self,
        shape: &RecordedShape,
        transform: Affine,
        color: Rgba8,
        line_width: f64,
    ) {
        let style = StrokeStyle::solid(line_width);
        for op in &shape.ops {
            match op {
                PaintOp::Stroke(path) => self.stroke_path(path, transform, color, &style),
                PaintOp::Fill(path) => self.fill_path(path, transform, color),
            }
        }
    }

    /// Fill the whole surface with a linear gradient running from `from` to `to`.
    ///
    /// The gradient is rasterized once into an image paint.
    pub fn fill_linear_gradient(&mut self, from: Point, to: Point, stops: &[GradientStop]) {
        let pixels = linear_gradient_premul(self.width, self.height, from, to, stops);
        let opaque = !stops.is_empty() && stops.iter().all(|s| s.color.a == 255);
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, self.width, self.height, !opaque);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        let full = self.full_rect();
        self.ctx.fill_rect(&full);
        self.opaque_base |= opaque;
    }

    /// Fill a run of positioned glyphs from `font` at `font_size`, offset by `transform`.
    pub(crate) fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        font_size: f32,
        glyphs: impl Iterator<Item = vello_cpu::Glyph>,
        transform: Affine,
        color: Rgba8,
    ) {
        self.set_solid(transform, color);
        self.ctx
            .glyph_run(font)
            .font_size(font_size)
            .fill_glyphs(glyphs);
    }

    /// Rasterize everything recorded since [`Surface::begin`] and read the pixels back.
    pub fn finish(&mut self) -> FrameRGBA {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        if self.opaque_base {
            // u8 blending of translucent paint over an opaque base can round alpha down to 254.
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        }
    }
}

fn dash_path(path: &BezPath, pattern: &[f64; 2]) -> BezPath {
    kurbo::dash(path.iter(), 0.0, pattern).collect()
}

fn cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn cpu_path(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use vello_cpu::kurbo::PathEl as Cpu;

    let els = path
        .elements()
        .iter()
        .map(|&el| match el {
            kurbo::PathEl::MoveTo(p) => Cpu::MoveTo(cpu_point(p)),
            kurbo::PathEl::LineTo(p) => Cpu::LineTo(cpu_point(p)),
            kurbo::PathEl::QuadTo(a, b) => Cpu::QuadTo(cpu_point(a), cpu_point(b)),
            kurbo::PathEl::CurveTo(a, b, c) => Cpu::CurveTo(cpu_point(a), cpu_point(b), cpu_point(c)),
            kurbo::PathEl::ClosePath => Cpu::ClosePath,
        })
        .collect();
    vello_cpu::kurbo::BezPath::from_vec(els)
}

/// Rasterize a linear gradient into premultiplied pixels, row-major.
///
/// Each pixel center is projected onto the `from -> to` axis; colors are interpolated between the
/// surrounding stops and clamped to the end stops outside `[0, 1]`.
pub(crate) fn linear_gradient_premul(
    width: u16,
    height: u16,
    from: Point,
    to: Point,
    stops: &[GradientStop],
) -> Vec<PremulRgba8> {
    let transparent = PremulRgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    let (w, h) = (usize::from(width), usize::from(height));
    if stops.is_empty() {
        return vec![transparent; w * h];
    }
    let axis = to - from;
    let len2 = axis.hypot2();
    let mut pixels = Vec::with_capacity(w * h);
    for y in 0..height {
        for x in 0..width {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let t = if len2 <= f64::EPSILON {
                0.0
            } else {
                ((p - from).dot(axis) / len2).clamp(0.0, 1.0)
            };
            let [r, g, b, a] = sample_stops(stops, t).to_premul_bytes();
            pixels.push(PremulRgba8 { r, g, b, a });
        }
    }
    pixels
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba8 {
    let first = stops[0];
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= f64::EPSILON {
                1.0
            } else {
                (t - a.offset) / span
            };
            let lerp = |x: u8, y: u8| -> u8 {
                let xf = f64::from(x);
                (xf + (f64::from(y) - xf) * u).round().clamp(0.0, 255.0) as u8
            };
            return Rgba8::rgba(
                lerp(a.color.r, b.color.r),
                lerp(a.color.g, b.color.g),
                lerp(a.color.b, b.color.b),
                lerp(a.color.a, b.color.a),
            );
        }
    }
    stops[stops.len() - 1].color
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
