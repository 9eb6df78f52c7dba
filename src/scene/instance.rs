use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;

use crate::config::SceneConfig;
use crate::doodle::catalog::{random_color, random_kind};
use crate::doodle::shapes::ShapeKind;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::rng::RandomSource;

/// Last known pointer position and whether it is over the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Pointer position in scene units.
    pub position: Point,
    /// Set by pointer moves, cleared when the pointer leaves.
    pub active: bool,
}

/// Pointer cell shared between the event pump (writer) and the frame step (reader).
#[derive(Clone, Debug, Default)]
pub struct SharedPointer(Rc<Cell<PointerState>>);

impl SharedPointer {
    /// Inactive pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move and mark the pointer active.
    pub fn move_to(&self, position: Point) {
        self.0.set(PointerState {
            position,
            active: true,
        });
    }

    /// Mark the pointer inactive, keeping its last position.
    pub fn leave(&self) {
        let mut s = self.0.get();
        s.active = false;
        self.0.set(s);
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> PointerState {
        self.0.get()
    }
}

/// One floating ornament of the live background.
///
/// Only `position` and `rotation` change after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct DoodleInstance {
    pub(crate) position: Point,
    anchor: Point,
    size: f64,
    pub(crate) rotation: f64,
    rotation_speed: f64,
    kind: ShapeKind,
    color: Rgba8,
    float_phase: f64,
    float_speed: f64,
    float_amplitude: f64,
    opacity: f64,
}

impl DoodleInstance {
    /// Random instance inside a `width` x `height` viewport.
    pub fn spawn(
        rng: &mut impl RandomSource,
        width: f64,
        height: f64,
        config: &SceneConfig,
    ) -> Self {
        let pop = config.population(width);
        let anchor = Point::new(rng.next_f64() * width, rng.next_f64() * height);
        Self {
            position: anchor,
            anchor,
            size: rng.range(pop.size_min, pop.size_span),
            rotation: rng.next_f64() * TAU,
            rotation_speed: rng.signed(config.rotation_speed_max),
            kind: random_kind(rng),
            color: random_color(rng),
            float_phase: rng.next_f64() * TAU,
            float_speed: rng.range(config.float_speed_min, config.float_speed_span),
            float_amplitude: rng.range(pop.float_amplitude_min, pop.float_amplitude_span),
            opacity: rng.range(config.opacity_min, config.opacity_span),
        }
    }

    /// Current rendered position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Fixed rest position.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Accumulated rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn float_phase(&self) -> f64 {
        self.float_phase
    }

    pub fn float_speed(&self) -> f64 {
        self.float_speed
    }

    pub fn float_amplitude(&self) -> f64 {
        self.float_amplitude
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/instance.rs"]
mod tests;
