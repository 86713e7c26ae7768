//! Ember Core - Foundational types for the Ember particle engine
//!
//! This crate provides the types that the other Ember crates depend on:
//! - `Vec2`, `Vec3`, `Color` - Spatial and color types
//! - `Mat4` helpers - Column-major 4x4 matrix math
//! - Error types and Result alias

mod error;
mod types;

pub use error::{EmberError, Result};
pub use types::{mat4_mul, mat4_transform_point, Color, Mat4, Vec2, Vec3, MAT4_IDENTITY};
