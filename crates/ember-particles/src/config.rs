//! Particle system configuration, loadable from TOML

use crate::emitter::EmissionShape;
use crate::scheduler::ParticleBurst;
use ember_core::{EmberError, Result};
use serde::Deserialize;

/// Full configuration for a `ParticleSystem`. Every field has a usable
/// default so a TOML table only needs the values it cares about.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParticleSystemDescriptor {
    pub show: bool,
    /// Particles per second
    pub emission_rate: f64,
    /// Where new particles appear. `None` means the system never emits.
    pub emitter: Option<EmissionShape>,
    pub bursts: Vec<ParticleBurst>,
    /// Wrap elapsed time instead of completing when `lifetime` expires
    #[serde(rename = "loop")]
    pub looping: bool,
    /// System lifetime in seconds; `None` runs forever
    pub lifetime: Option<f64>,
    /// Visual asset applied to every particle's billboard
    pub image: String,
    pub start_color: [f32; 4],
    pub end_color: [f32; 4],
    pub start_scale: f32,
    pub end_scale: f32,
    pub minimum_speed: f32,
    pub maximum_speed: f32,
    pub minimum_particle_life: f32,
    pub maximum_particle_life: f32,
    pub minimum_mass: f32,
    pub maximum_mass: f32,
    pub minimum_image_size: [f32; 2],
    pub maximum_image_size: [f32; 2],
    /// Billboard dimensions are meters in world space
    pub size_in_meters: bool,
    /// RNG seed; fixed default keeps runs reproducible
    pub seed: u32,
}

impl Default for ParticleSystemDescriptor {
    fn default() -> Self {
        Self {
            show: true,
            emission_rate: 5.0,
            emitter: Some(EmissionShape::Circle { radius: 0.5 }),
            bursts: Vec::new(),
            looping: true,
            lifetime: None,
            image: String::new(),
            start_color: [1.0, 1.0, 1.0, 1.0],
            end_color: [1.0, 1.0, 1.0, 1.0],
            start_scale: 1.0,
            end_scale: 1.0,
            minimum_speed: 1.0,
            maximum_speed: 1.0,
            minimum_particle_life: 5.0,
            maximum_particle_life: 5.0,
            minimum_mass: 1.0,
            maximum_mass: 1.0,
            minimum_image_size: [1.0, 1.0],
            maximum_image_size: [1.0, 1.0],
            size_in_meters: true,
            seed: 0x9E37_79B9,
        }
    }
}

impl ParticleSystemDescriptor {
    /// Reject malformed configuration before the system is built.
    pub fn validate(&self) -> Result<()> {
        check_min("emission_rate", self.emission_rate, 0.0)?;
        if let Some(lifetime) = self.lifetime {
            if lifetime.is_nan() || lifetime <= 0.0 {
                return Err(EmberError::ValueOutOfRange {
                    field: "lifetime".into(),
                    min: 0.0,
                    value: lifetime,
                });
            }
        }
        check_pair("speed", self.minimum_speed, self.maximum_speed, 0.0)?;
        check_pair(
            "particle_life",
            self.minimum_particle_life,
            self.maximum_particle_life,
            f32::MIN_POSITIVE,
        )?;
        check_pair("mass", self.minimum_mass, self.maximum_mass, 0.0)?;
        check_pair(
            "image_size.x",
            self.minimum_image_size[0],
            self.maximum_image_size[0],
            0.0,
        )?;
        check_pair(
            "image_size.y",
            self.minimum_image_size[1],
            self.maximum_image_size[1],
            0.0,
        )?;
        check_min("start_scale", self.start_scale as f64, 0.0)?;
        check_min("end_scale", self.end_scale as f64, 0.0)?;
        Ok(())
    }
}

pub(crate) fn check_min(field: &str, value: f64, min: f64) -> Result<()> {
    if value.is_nan() || value < min {
        return Err(EmberError::ValueOutOfRange {
            field: field.into(),
            min,
            value,
        });
    }
    Ok(())
}

pub(crate) fn check_pair(field: &str, min: f32, max: f32, floor: f32) -> Result<()> {
    check_min(field, min as f64, floor as f64)?;
    check_min(field, max as f64, floor as f64)?;
    if min > max {
        return Err(EmberError::InvalidBounds {
            field: field.into(),
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}
