use crate::doodle::shapes::ShapeKind;
use crate::foundation::core::Rgba8;
use crate::foundation::rng::RandomSource;

/// Accent palette shared by both canvases, in a fixed order.
pub const PALETTE: [Rgba8; 6] = [
    Rgba8::rgb(0xFF, 0x6B, 0x9D), // pink
    Rgba8::rgb(0xC4, 0x4D, 0xFF), // purple
    Rgba8::rgb(0x4D, 0xFF, 0xFF), // cyan
    Rgba8::rgb(0xFF, 0xE6, 0x6D), // yellow
    Rgba8::rgb(0xFF, 0x8B, 0x4D), // orange
    Rgba8::rgb(0x7B, 0xFF, 0x4D), // green
];

/// Kinds used for share-image ornaments. Plain circles and triangles read as noise at that density.
pub const SHARE_KINDS: [ShapeKind; 10] = [
    ShapeKind::Star,
    ShapeKind::Heart,
    ShapeKind::Spiral,
    ShapeKind::Zigzag,
    ShapeKind::Smiley,
    ShapeKind::Lightning,
    ShapeKind::Cloud,
    ShapeKind::Diamond,
    ShapeKind::Squiggle,
    ShapeKind::Burst,
];

/// Uniformly random kind from the full set.
pub fn random_kind(rng: &mut impl RandomSource) -> ShapeKind {
    ShapeKind::ALL[rng.index(ShapeKind::ALL.len())]
}

/// Uniformly random kind from the reduced share-image set.
pub fn random_share_kind(rng: &mut impl RandomSource) -> ShapeKind {
    SHARE_KINDS[rng.index(SHARE_KINDS.len())]
}

/// Uniformly random palette color.
pub fn random_color(rng: &mut impl RandomSource) -> Rgba8 {
    PALETTE[rng.index(PALETTE.len())]
}

/// Palette color for the `i`-th ornament, cycling through the palette.
pub fn cycled_color(i: usize) -> Rgba8 {
    PALETTE[i % PALETTE.len()]
}

#[cfg(test)]
#[path = "../../tests/unit/doodle/catalog.rs"]
mod tests;
