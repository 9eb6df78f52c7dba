use crate::foundation::core::{Affine, Point, Rgba8};
use crate::foundation::error::{DoodleError, DoodleResult};
use crate::render::surface::Surface;
use crate::text::font::LoadedFont;

/// Width measurement of a single line of text.
pub trait TextMeasure {
    /// Advance width of `text` at `font_size`.
    fn measure(&mut self, text: &str, font_size: f64) -> f64;
}

/// Greedy word wrap.
///
/// Words are split on whitespace and appended to the current line while the line still fits in
/// `max_width`. A single word wider than `max_width` gets a line of its own. Blank input yields no
/// lines.
pub fn wrap_greedy(
    measure: &mut dyn TextMeasure,
    text: &str,
    font_size: f64,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure.measure(&candidate, font_size) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_owned()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Fixed advance per character; handy when no face is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one character, as a multiple of the font size.
    pub em_per_char: f64,
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * self.em_per_char * font_size
    }
}

/// Weight used for a text pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextWeight {
    Regular,
    Bold,
}

/// Parley-backed shaping for one registered face.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    font: vello_cpu::peniko::FontData,
    weight: TextWeight,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("family", &self.family)
            .field("weight", &self.weight)
            .finish()
    }
}

impl TextLayoutEngine {
    /// Register `font` with a fresh Parley context.
    pub fn new(font: &LoadedFont) -> DoodleResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| DoodleError::font("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DoodleError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font: font.to_cpu(),
            weight: TextWeight::Regular,
        })
    }

    /// Family name the face registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Weight for subsequent layouts and measurements.
    pub fn set_weight(&mut self, weight: TextWeight) {
        self.weight = weight;
    }

    fn layout_line(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        if self.weight == TextWeight::Bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Draw `text` as one line centered on `center`, the em box middle on `center.y`.
    pub fn draw_centered(
        &mut self,
        surface: &mut Surface,
        text: &str,
        font_size: f64,
        center: Point,
        color: Rgba8,
    ) {
        if text.is_empty() {
            return;
        }
        let layout = self.layout_line(text, font_size as f32);
        let left = center.x - f64::from(layout.width()) / 2.0;
        let top = center.y - f64::from(layout.height()) / 2.0;
        let transform = Affine::translate((left, top));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                surface.fill_glyphs(
                    &self.font,
                    run.run().font_size(),
                    glyphs,
                    transform,
                    color,
                );
            }
        }
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str, font_size: f64) -> f64 {
        if text.is_empty() || !font_size.is_finite() || font_size <= 0.0 {
            return 0.0;
        }
        f64::from(self.layout_line(text, font_size as f32).width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
