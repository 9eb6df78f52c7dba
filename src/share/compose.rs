use crate::config::ShareConfig;
use crate::doodle::catalog::cycled_color;
use crate::doodle::shapes::record_shape;
use crate::foundation::core::{Affine, Canvas, Point, Rgba8};
use crate::foundation::error::DoodleResult;
use crate::foundation::rng::{RandomSource, Rng64};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{GradientStop, StrokeStyle, Surface};
use crate::share::encode::{ImageBuffer, encode_png};
use crate::share::layout::{
    AspectRatio, BorderSpec, Sparkle, corner_sparkles, hand_drawn_border, line_centers,
    plan_doodles, sparkle_font_size, sparkle_path,
};
use crate::text::font::FontLoader;
use crate::text::layout::{TextLayoutEngine, TextMeasure, TextWeight, wrap_greedy};

const BACKGROUND_STOPS: [GradientStop; 3] = [
    GradientStop {
        offset: 0.0,
        color: Rgba8::rgb(0x1a, 0x16, 0x25),
    },
    GradientStop {
        offset: 0.5,
        color: Rgba8::rgb(0x2d, 0x26, 0x40),
    },
    GradientStop {
        offset: 1.0,
        color: Rgba8::rgb(0x1a, 0x1a, 0x2e),
    },
];

const SPECKLE_COUNT: usize = 100;
const SPECKLE_ALPHA: f64 = 0.03;
const LAVENDER: Rgba8 = Rgba8::rgb(0xa7, 0x8b, 0xda);
const PINK: Rgba8 = Rgba8::rgb(0xf4, 0x72, 0xb6);
const INNER_BORDER: Rgba8 = Rgba8::rgb(0xc9, 0xb8, 0xe0);
const QUOTE_COLOR: Rgba8 = Rgba8::rgb(0xe8, 0xdf, 0xf5);
const SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 77);
const SHADOW_OFFSET: f64 = 3.0;
const DOODLE_LINE_WIDTH: f64 = 2.5;

/// Renders quote cards for sharing.
///
/// Ornament positions, speckles and border jitter are drawn from `R` on every call. The display
/// face is resolved on first use and cached.
pub struct ShareCompositor<R: RandomSource = Rng64> {
    rng: R,
    fonts: FontLoader,
    branding: String,
    text: Option<Option<TextLayoutEngine>>,
}

impl<R: RandomSource> std::fmt::Debug for ShareCompositor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCompositor")
            .field("fonts", &self.fonts)
            .field("branding", &self.branding)
            .field("text", &self.text)
            .finish()
    }
}

impl ShareCompositor<Rng64> {
    /// Compositor using the configured font, branding and seed (entropy when no seed is set).
    pub fn from_config(cfg: &ShareConfig) -> Self {
        let rng = cfg.seed.map(Rng64::new).unwrap_or_else(Rng64::from_entropy);
        let fonts = FontLoader::new(cfg.font_family.clone())
            .with_font_file(cfg.font_path.clone())
            .with_env();
        Self::new(rng, fonts, cfg.branding.clone())
    }
}

impl<R: RandomSource> ShareCompositor<R> {
    pub fn new(rng: R, fonts: FontLoader, branding: impl Into<String>) -> Self {
        Self {
            rng,
            fonts,
            branding: branding.into(),
            text: None,
        }
    }

    /// Render and encode a card for `quote`.
    #[tracing::instrument(skip(self, quote), fields(chars = quote.chars().count()))]
    pub fn compose(&mut self, quote: &str, aspect: AspectRatio) -> DoodleResult<ImageBuffer> {
        let frame = self.render(quote, aspect)?;
        let buf = encode_png(&frame)?;
        tracing::debug!(bytes = buf.bytes.len(), "share image encoded");
        Ok(buf)
    }

    /// Render a card without encoding it.
    pub fn render(&mut self, quote: &str, aspect: AspectRatio) -> DoodleResult<FrameRGBA> {
        let canvas = aspect.canvas();
        let mut surface = Surface::new(canvas)?;
        surface.begin();

        self.paint_background(&mut surface, canvas);
        self.paint_doodles(&mut surface, canvas);
        self.paint_border(&mut surface, canvas);

        let branding = self.branding.clone();
        match self.text_engine() {
            Some(engine) => {
                paint_quote(engine, &mut surface, canvas, quote);
                paint_branding(engine, &mut surface, canvas, &branding);
            }
            None => tracing::warn!("no font available, share image has no text"),
        }

        Ok(surface.finish())
    }

    fn text_engine(&mut self) -> Option<&mut TextLayoutEngine> {
        if self.text.is_none() {
            let engine = self.fonts.load().and_then(|font| {
                tracing::debug!(family = %font.family, origin = ?font.origin, "display font resolved");
                match TextLayoutEngine::new(&font) {
                    Ok(engine) => Some(engine),
                    Err(e) => {
                        tracing::warn!(error = %e, "font rejected by layout engine");
                        None
                    }
                }
            });
            self.text = Some(engine);
        }
        self.text.as_mut().and_then(Option::as_mut)
    }

    fn paint_background(&mut self, surface: &mut Surface, canvas: Canvas) {
        let (w, h) = (canvas.width_f64(), canvas.height_f64());
        surface.fill_linear_gradient(Point::ZERO, Point::new(w, h), &BACKGROUND_STOPS);

        let rng = &mut self.rng;
        for _ in 0..SPECKLE_COUNT {
            let color = if rng.next_f64() > 0.5 { LAVENDER } else { PINK };
            let center = Point::new(rng.next_f64() * w, rng.next_f64() * h);
            let radius = rng.range(1.0, 3.0);
            let dot = kurbo::Shape::to_path(&kurbo::Circle::new(center, radius), 0.1);
            surface.fill_path(&dot, Affine::IDENTITY, color.with_alpha(SPECKLE_ALPHA));
        }
    }

    fn paint_doodles(&mut self, surface: &mut Surface, canvas: Canvas) {
        let placements = plan_doodles(canvas, &mut self.rng);
        tracing::debug!(placed = placements.len(), "share doodles planned");
        for (i, p) in placements.iter().enumerate() {
            let alpha = self.rng.range(0.18, 0.12);
            let shape = record_shape(p.kind, p.size);
            let transform = Affine::translate(p.position.to_vec2()) * Affine::rotate(p.rotation);
            surface.paint_shape(
                &shape,
                transform,
                cycled_color(i).with_alpha(alpha),
                DOODLE_LINE_WIDTH,
            );
        }
    }

    fn paint_border(&mut self, surface: &mut Surface, canvas: Canvas) {
        let w = canvas.width_f64();

        let outer = hand_drawn_border(canvas, &BorderSpec::outer(canvas), &mut self.rng);
        surface.stroke_path(&outer, Affine::IDENTITY, LAVENDER, &StrokeStyle::solid(w * 0.005));

        let inner = hand_drawn_border(canvas, &BorderSpec::inner(canvas), &mut self.rng);
        surface.stroke_path(
            &inner,
            Affine::IDENTITY,
            INNER_BORDER.with_alpha(0.5),
            &StrokeStyle::dashed(w * 0.003, w * 0.012, w * 0.008),
        );

        let radius = sparkle_font_size(canvas) * 0.4;
        let color = LAVENDER.with_alpha(0.6);
        for (center, style) in corner_sparkles(canvas) {
            let path = sparkle_path(center, radius);
            match style {
                Sparkle::Solid => surface.fill_path(&path, Affine::IDENTITY, color),
                Sparkle::Outline => surface.stroke_path(
                    &path,
                    Affine::IDENTITY,
                    color,
                    &StrokeStyle::solid(radius * 0.15),
                ),
            }
        }
    }
}

/// Quote font size for a canvas.
pub fn quote_font_size(canvas: Canvas) -> f64 {
    canvas.width_f64() * 0.065
}

/// Widest allowed quote line for a canvas.
pub fn quote_max_width(canvas: Canvas) -> f64 {
    canvas.width_f64() * 0.75
}

/// Wrap `quote` into the lines drawn on a card of `canvas` size.
pub fn wrap_quote(measure: &mut dyn TextMeasure, quote: &str, canvas: Canvas) -> Vec<String> {
    wrap_greedy(measure, quote, quote_font_size(canvas), quote_max_width(canvas))
}

fn paint_quote(engine: &mut TextLayoutEngine, surface: &mut Surface, canvas: Canvas, quote: &str) {
    engine.set_weight(TextWeight::Bold);
    let font_size = quote_font_size(canvas);
    let lines = wrap_quote(engine, quote, canvas);
    tracing::debug!(lines = lines.len(), "quote wrapped");

    let cx = canvas.width_f64() / 2.0;
    let centers = line_centers(lines.len(), font_size, canvas.height_f64());
    for (line, y) in lines.iter().zip(&centers) {
        let at = Point::new(cx + SHADOW_OFFSET, y + SHADOW_OFFSET);
        engine.draw_centered(surface, line, font_size, at, SHADOW);
    }
    for (line, y) in lines.iter().zip(&centers) {
        engine.draw_centered(surface, line, font_size, Point::new(cx, *y), QUOTE_COLOR);
    }
}

fn paint_branding(engine: &mut TextLayoutEngine, surface: &mut Surface, canvas: Canvas, caption: &str) {
    engine.set_weight(TextWeight::Regular);
    let w = canvas.width_f64();
    let at = Point::new(w / 2.0, canvas.height_f64() - w * 0.12);
    engine.draw_centered(surface, caption, w * 0.032, at, LAVENDER.with_alpha(0.8));
}

#[cfg(test)]
#[path = "../../tests/unit/share/compose.rs"]
mod tests;
