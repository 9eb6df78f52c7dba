//! Procedural doodle art for a motivational quote card.
//!
//! Two consumers share one vocabulary of hand-drawn shapes:
//!
//! - [`LiveScene`] animates a full-viewport background of floating doodles that drift away from the
//!   pointer, driven by a [`FrameLoop`] against any [`SceneHost`]
//! - [`ShareCompositor`] renders a quote into a 1080 x 1080 or 1080 x 1920 PNG card with scattered
//!   doodles, a wobbly double border and centered text
//!
//! Rendering runs on the CPU through `vello_cpu`; text is shaped with `parley`.
#![forbid(unsafe_code)]

mod doodle;
mod foundation;
mod render;
mod scene;
mod share;
mod text;

/// JSON settings.
pub mod config;
/// Quote sources.
pub mod quotes;

pub use crate::config::{AppConfig, PopulationConfig, SceneConfig, ShareConfig};
pub use crate::doodle::catalog::{
    PALETTE, SHARE_KINDS, cycled_color, random_color, random_kind, random_share_kind,
};
pub use crate::doodle::shapes::{
    PaintOp, PathContext, RecordedShape, RenderAction, ShapeKind, ShapeRecorder, Tracer,
    record_shape, trace_by_kind,
};
pub use crate::foundation::core::{Affine, BezPath, Canvas, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{DoodleError, DoodleResult};
pub use crate::foundation::rng::{RandomSource, Rng64};
pub use crate::quotes::{BUNDLED_QUOTES, BundledQuotes, QuoteFeed, QuoteSource};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::{GradientStop, StrokeStyle, Surface};
pub use crate::scene::frame_loop::{
    CancelToken, ExitReason, FrameLoop, HeadlessHost, LoopExit, SceneEvent, SceneHost,
};
pub use crate::scene::instance::{DoodleInstance, PointerState, SharedPointer};
pub use crate::scene::live::LiveScene;
pub use crate::scene::motion::{ease_toward, float_offset, repulsion};
#[cfg(feature = "window")]
pub use crate::scene::window::WindowHost;
pub use crate::share::compose::{ShareCompositor, quote_font_size, quote_max_width, wrap_quote};
pub use crate::share::deliver::{
    DEFAULT_FILENAME, DirectoryTarget, InMemoryTarget, ShareOutcome, ShareTarget, download_quote,
    share_quote,
};
pub use crate::share::encode::{ImageBuffer, ImageFormat, encode_png};
pub use crate::share::layout::{
    AspectRatio, BorderSpec, DoodlePlacement, ExclusionZone, doodle_count, hand_drawn_border,
    plan_doodles,
};
pub use crate::text::font::{FONT_ENV_VAR, FontLoader, FontOrigin, LoadedFont};
pub use crate::text::layout::{FixedAdvance, TextLayoutEngine, TextMeasure, TextWeight, wrap_greedy};
