use crate::config::SceneConfig;
use crate::doodle::shapes::{RecordedShape, record_shape};
use crate::foundation::core::{Affine, BezPath, Canvas, Point};
use crate::foundation::error::DoodleResult;
use crate::foundation::rng::{RandomSource, Rng64};
use crate::render::surface::{StrokeStyle, Surface};
use crate::scene::instance::{DoodleInstance, SharedPointer};
use crate::scene::motion::{ease_toward, float_offset, repulsion};

/// The animated doodle background.
///
/// The population is created once for the initial viewport and lives as long as the scene.
#[derive(Debug)]
pub struct LiveScene {
    config: SceneConfig,
    viewport: Canvas,
    pointer: SharedPointer,
    doodles: Vec<DoodleInstance>,
    shapes: Vec<RecordedShape>,
    time: f64,
}

impl LiveScene {
    /// Scene with a population drawn from OS entropy.
    pub fn new(config: SceneConfig, viewport: Canvas, pointer: SharedPointer) -> DoodleResult<Self> {
        Self::with_viewport(config, viewport, pointer, &mut Rng64::from_entropy())
    }

    /// Scene with a population drawn from `rng`.
    #[tracing::instrument(skip(config, pointer, rng), fields(width = viewport.width, height = viewport.height))]
    pub fn with_viewport(
        config: SceneConfig,
        viewport: Canvas,
        pointer: SharedPointer,
        rng: &mut impl RandomSource,
    ) -> DoodleResult<Self> {
        config.validate()?;
        let (w, h) = (viewport.width_f64(), viewport.height_f64());
        let count = config.population(w).count;
        let doodles = (0..count)
            .map(|_| DoodleInstance::spawn(rng, w, h, &config))
            .collect::<Vec<_>>();
        let shapes = doodles
            .iter()
            .map(|d| record_shape(d.kind(), d.size()))
            .collect();
        tracing::debug!(
            count,
            mobile = config.is_mobile(w),
            "live scene population created"
        );
        Ok(Self {
            config,
            viewport,
            pointer,
            doodles,
            shapes,
            time: 0.0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current drawing surface size.
    pub fn viewport(&self) -> Canvas {
        self.viewport
    }

    /// Pointer cell read by [`LiveScene::step`].
    pub fn pointer(&self) -> &SharedPointer {
        &self.pointer
    }

    pub fn doodles(&self) -> &[DoodleInstance] {
        &self.doodles
    }

    /// Scene clock.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Follow a viewport resize. The population keeps its anchors.
    pub fn resize(&mut self, viewport: Canvas) {
        self.viewport = viewport;
    }

    /// Advance the clock one step and move every doodle.
    pub fn step(&mut self) {
        self.time += self.config.clock_step;
        let pointer = self.pointer.snapshot();
        let cfg = &self.config;
        for d in &mut self.doodles {
            let float = float_offset(self.time, d.float_speed(), d.float_phase(), d.float_amplitude());
            let push = repulsion(
                d.anchor(),
                pointer,
                cfg.repulsion_radius,
                cfg.repulsion_strength,
            );
            let target = d.anchor() + float + push;
            d.position = ease_toward(d.position, target, cfg.easing);
            d.rotation += d.rotation_speed();
        }
    }

    /// Record the background, grid and doodles into `surface`.
    pub fn render(&self, surface: &mut Surface) {
        surface.begin();
        surface.clear(self.config.background);

        let grid = self.grid_path();
        if !grid.elements().is_empty() {
            surface.stroke_path(
                &grid,
                Affine::IDENTITY,
                self.config.grid_color,
                &StrokeStyle::solid(1.0),
            );
        }

        for (d, shape) in self.doodles.iter().zip(&self.shapes) {
            let transform = Affine::translate(d.position.to_vec2()) * Affine::rotate(d.rotation);
            surface.paint_shape(
                shape,
                transform,
                d.color().with_alpha(d.opacity()),
                self.config.stroke_width,
            );
        }
    }

    fn grid_path(&self) -> BezPath {
        let (w, h) = (self.viewport.width_f64(), self.viewport.height_f64());
        let step = self.config.grid_spacing;
        let mut path = BezPath::new();
        let mut x = 0.0;
        while x < w {
            path.move_to(Point::new(x, 0.0));
            path.line_to(Point::new(x, h));
            x += step;
        }
        let mut y = 0.0;
        while y < h {
            path.move_to(Point::new(0.0, y));
            path.line_to(Point::new(w, y));
            y += step;
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/live.rs"]
mod tests;
