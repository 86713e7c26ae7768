//! Particle entity: CPU-side kinematic and visual state for one particle

use crate::billboard::BillboardHandle;
use ember_core::{Color, Vec2, Vec3};
use std::sync::Arc;

/// Hook invoked once per live particle per frame, before the built-in
/// position integration commits. May mutate any field (apply gravity,
/// recolor, resize).
pub type ParticleUpdateFn = dyn FnMut(&mut Particle, f32);

/// One simulated particle. Positions and velocities are local space at
/// emission and world space once the controller has transformed them.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    /// Meters per second
    pub velocity: Vec3,
    /// Kilograms
    pub mass: f32,
    /// Total lifespan in seconds
    pub life: f32,
    /// Seconds lived so far
    pub age: f32,
    /// `age / life`, clamped to [0, 1]. Recomputed every update,
    /// reset to 0 on reuse; never set independently.
    pub normalized_age: f32,
    pub start_color: Color,
    pub end_color: Color,
    pub start_scale: f32,
    pub end_scale: f32,
    /// Billboard dimensions in the sink's units
    pub image_size: Vec2,
    /// Opaque visual asset handle; falls back to the system image when None
    pub image: Option<Arc<str>>,
    /// At most one sink entry per particle; retained while pooled
    pub(crate) billboard: Option<BillboardHandle>,
}

impl Particle {
    pub(crate) fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mass: 1.0,
            life: 1.0,
            age: 0.0,
            normalized_age: 0.0,
            start_color: Color::WHITE,
            end_color: Color::WHITE,
            start_scale: 1.0,
            end_scale: 1.0,
            image_size: Vec2::ONE,
            image: None,
            billboard: None,
        }
    }

    /// Advance this particle by `dt` seconds. Returns false once the
    /// particle has outlived `life` — the caller must retire it.
    pub fn update(&mut self, dt: f32, hook: Option<&mut ParticleUpdateFn>) -> bool {
        self.age += dt;
        if self.age > self.life {
            return false;
        }
        self.normalized_age = (self.age / self.life).clamp(0.0, 1.0);

        // The hook runs before integration so velocity changes (gravity,
        // drag) take effect within the same frame.
        if let Some(hook) = hook {
            hook(self, dt);
        }

        // Explicit Euler; lifespans are short and visual, not authoritative
        self.position = self.position + self.velocity * dt;
        true
    }
}
