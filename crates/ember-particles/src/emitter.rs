//! Emission shapes: initialize a new particle's local position and
//! unit velocity direction. The controller samples speed and applies
//! the world transform afterwards.

use crate::particle::Particle;
use crate::rand::ParticleRng;
use ember_core::Vec3;
use serde::Deserialize;
use std::f32::consts::TAU;

/// Where and in which direction new particles appear, in emitter-local
/// space. Velocity written by `emit` is a direction; magnitude comes from
/// the system's configured speed bounds.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum EmissionShape {
    /// Uniform over a disc of `radius` on the xy-plane, moving along +z
    Circle { radius: f32 },
    /// From the origin, within `angle` degrees of +z
    Cone { angle: f32 },
    /// Uniform over a ball of `radius`, moving radially outward
    Sphere { radius: f32 },
    /// Uniform over an axis-aligned box, moving radially outward
    Box { dimensions: [f32; 3] },
}

impl EmissionShape {
    /// Write the particle's initial local-space position and direction.
    pub fn emit(&self, rng: &mut ParticleRng, particle: &mut Particle) {
        match *self {
            EmissionShape::Circle { radius } => {
                let theta = rng.range_f32(0.0, TAU);
                let rad = rng.range_f32(0.0, radius);
                particle.position = Vec3::new(rad * theta.cos(), rad * theta.sin(), 0.0);
                particle.velocity = Vec3::UNIT_Z;
            }
            EmissionShape::Cone { angle } => {
                let theta = rng.range_f32(0.0, TAU);
                let rad = rng.range_f32(0.0, angle.to_radians().tan());
                particle.position = Vec3::ZERO;
                particle.velocity =
                    Vec3::new(rad * theta.cos(), rad * theta.sin(), 1.0).normalized();
            }
            EmissionShape::Sphere { radius } => {
                let theta = rng.range_f32(0.0, TAU);
                let phi = rng.range_f32(0.0, std::f32::consts::PI);
                let rad = rng.range_f32(0.0, radius);
                particle.position = Vec3::new(
                    rad * theta.cos() * phi.sin(),
                    rad * theta.sin() * phi.sin(),
                    rad * phi.cos(),
                );
                particle.velocity = outward(particle.position);
            }
            EmissionShape::Box { dimensions } => {
                let half = Vec3::from_array(dimensions) * 0.5;
                particle.position = Vec3::new(
                    rng.range_f32(-half.x, half.x),
                    rng.range_f32(-half.y, half.y),
                    rng.range_f32(-half.z, half.z),
                );
                particle.velocity = outward(particle.position);
            }
        }
    }
}

/// Radial direction from the origin; degenerate samples at the exact
/// center move along +z.
fn outward(position: Vec3) -> Vec3 {
    let dir = position.normalized();
    if dir == Vec3::ZERO {
        Vec3::UNIT_Z
    } else {
        dir
    }
}
