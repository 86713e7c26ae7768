//! Ember Particles - pooled CPU particle simulation
//!
//! Per-system simulation with:
//! - Rate-driven emission with fractional carry-over and scheduled bursts
//! - Object pooling of particles and their billboard handles (no steady-state
//!   allocation, amortized shrink of excess GPU capacity)
//! - Per-particle Euler integration with an optional owner-supplied hook
//! - Lazily combined system/emitter transforms applied at emission
//! - Billboard collection output with bytemuck instance packing

pub mod billboard;
pub mod config;
pub mod curves;
pub mod emitter;
pub mod particle;
pub mod pool;
pub mod rand;
pub mod scheduler;
pub mod system;

pub use billboard::{Billboard, BillboardCollection, BillboardHandle, BillboardInstance};
pub use config::ParticleSystemDescriptor;
pub use emitter::EmissionShape;
pub use particle::{Particle, ParticleUpdateFn};
pub use pool::ParticlePool;
pub use rand::ParticleRng;
pub use scheduler::{EmissionScheduler, ParticleBurst};
pub use system::ParticleSystem;
