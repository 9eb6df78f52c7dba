use crate::foundation::core::{Point, Vec2};
use crate::scene::instance::PointerState;

/// Float offset at clock `time`.
///
/// The y component runs at 0.7x the speed and 0.6x the amplitude of the x component, so the path
/// is not a circle.
pub fn float_offset(time: f64, speed: f64, phase: f64, amplitude: f64) -> Vec2 {
    Vec2::new(
        (time * speed + phase).sin() * amplitude,
        (time * speed * 0.7 + phase).cos() * amplitude * 0.6,
    )
}

/// Push away from an active pointer, falling off linearly from `strength` at distance 0 to zero at
/// `radius`.
///
/// A pointer exactly on the anchor pushes straight up.
pub fn repulsion(anchor: Point, pointer: PointerState, radius: f64, strength: f64) -> Vec2 {
    if !pointer.active {
        return Vec2::ZERO;
    }
    let d = anchor - pointer.position;
    let dist = d.hypot();
    if dist >= radius {
        return Vec2::ZERO;
    }
    let force = (1.0 - dist / radius) * strength;
    if dist == 0.0 {
        return Vec2::new(0.0, -force);
    }
    d * (force / dist)
}

/// Move `position` by `factor` of the way to `target`.
pub fn ease_toward(position: Point, target: Point, factor: f64) -> Point {
    position + (target - position) * factor
}

#[cfg(test)]
#[path = "../../tests/unit/scene/motion.rs"]
mod tests;
