//! The particle system controller: per-frame orchestration of simulation,
//! pooling, emission, and billboard output.
//!
//! The controller is the single writer of its billboard collection for the
//! duration of `update`; the renderer reads between updates. Everything is
//! synchronous and single-threaded — one caller-driven tick runs to
//! completion with no suspension.

use crate::billboard::{Billboard, BillboardCollection};
use crate::config::{check_pair, ParticleSystemDescriptor};
use crate::curves::{lerp, lerp_color};
use crate::emitter::EmissionShape;
use crate::particle::{Particle, ParticleUpdateFn};
use crate::pool::{capacity_estimate, ParticlePool};
use crate::rand::ParticleRng;
use crate::scheduler::{EmissionScheduler, ParticleBurst};
use ember_core::{mat4_mul, mat4_transform_point, Color, Mat4, Result, Vec2, MAT4_IDENTITY};
use ember_runtime::{Event, FrameState};
use std::sync::Arc;

/// Frames between pool shrink passes. Sink removal is cheap but not free,
/// so reclaiming excess capacity is amortized across many frames.
const POOL_SHRINK_CADENCE: u64 = 120;

/// A pooled CPU particle simulation that writes billboard state each frame.
///
/// Drive it with successive [`FrameState`]s; the delta between consecutive
/// frame times advances the simulation. Setting `show` to false freezes the
/// system in place: no time passes and no pool or sink changes occur.
pub struct ParticleSystem {
    /// Master visibility/activity switch
    pub show: bool,
    /// Wrap elapsed time instead of completing when the lifetime expires
    pub looping: bool,

    emitter: Option<EmissionShape>,
    scheduler: EmissionScheduler,

    start_color: Color,
    end_color: Color,
    start_scale: f32,
    end_scale: f32,
    minimum_speed: f32,
    maximum_speed: f32,
    minimum_particle_life: f32,
    maximum_particle_life: f32,
    minimum_mass: f32,
    maximum_mass: f32,
    minimum_image_size: Vec2,
    maximum_image_size: Vec2,
    image: Arc<str>,
    size_in_meters: bool,
    /// Seconds before the system completes (or wraps); infinite runs forever
    lifetime: f64,

    model_matrix: Mat4,
    emitter_model_matrix: Mat4,
    combined_matrix: Mat4,
    matrix_dirty: bool,

    update_callback: Option<Box<ParticleUpdateFn>>,

    particles: Vec<Particle>,
    pool: ParticlePool,
    /// Emission-affecting config changed; re-derive the capacity estimate
    pool_dirty: bool,
    particle_estimate: usize,
    /// Constructed lazily on the first update
    billboards: Option<BillboardCollection>,

    rng: ParticleRng,
    current_time: f64,
    previous_time: Option<f64>,
    is_complete: bool,
    complete: Event,
}

impl ParticleSystem {
    pub fn new(descriptor: ParticleSystemDescriptor) -> Result<Self> {
        descriptor.validate()?;
        let scheduler = EmissionScheduler::new(descriptor.emission_rate, descriptor.bursts)?;
        Ok(Self {
            show: descriptor.show,
            looping: descriptor.looping,
            emitter: descriptor.emitter,
            scheduler,
            start_color: Color::from_array(descriptor.start_color),
            end_color: Color::from_array(descriptor.end_color),
            start_scale: descriptor.start_scale,
            end_scale: descriptor.end_scale,
            minimum_speed: descriptor.minimum_speed,
            maximum_speed: descriptor.maximum_speed,
            minimum_particle_life: descriptor.minimum_particle_life,
            maximum_particle_life: descriptor.maximum_particle_life,
            minimum_mass: descriptor.minimum_mass,
            maximum_mass: descriptor.maximum_mass,
            minimum_image_size: Vec2::from_array(descriptor.minimum_image_size),
            maximum_image_size: Vec2::from_array(descriptor.maximum_image_size),
            image: Arc::from(descriptor.image.as_str()),
            size_in_meters: descriptor.size_in_meters,
            lifetime: descriptor.lifetime.unwrap_or(f64::INFINITY),
            model_matrix: MAT4_IDENTITY,
            emitter_model_matrix: MAT4_IDENTITY,
            combined_matrix: MAT4_IDENTITY,
            matrix_dirty: true,
            update_callback: None,
            particles: Vec::new(),
            pool: ParticlePool::new(),
            pool_dirty: true,
            particle_estimate: 0,
            billboards: None,
            rng: ParticleRng::new(descriptor.seed),
            current_time: 0.0,
            previous_time: None,
            is_complete: false,
            complete: Event::new(),
        })
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let descriptor: ParticleSystemDescriptor = toml::from_str(source)?;
        Self::new(descriptor)
    }

    // ── Configuration ──

    pub fn emission_rate(&self) -> f64 {
        self.scheduler.emission_rate()
    }

    pub fn set_emission_rate(&mut self, rate: f64) -> Result<()> {
        self.scheduler.set_emission_rate(rate)?;
        self.pool_dirty = true;
        Ok(())
    }

    pub fn bursts(&self) -> &[ParticleBurst] {
        self.scheduler.bursts()
    }

    pub fn set_bursts(&mut self, bursts: Vec<ParticleBurst>) {
        self.scheduler.set_bursts(bursts);
        self.pool_dirty = true;
    }

    pub fn emitter(&self) -> Option<EmissionShape> {
        self.emitter
    }

    /// Swap the emission shape. `None` means the system stops emitting;
    /// this is a permissive default, not an error.
    pub fn set_emitter(&mut self, emitter: Option<EmissionShape>) {
        self.emitter = emitter;
    }

    pub fn particle_life(&self) -> (f32, f32) {
        (self.minimum_particle_life, self.maximum_particle_life)
    }

    pub fn set_particle_life(&mut self, minimum: f32, maximum: f32) -> Result<()> {
        check_pair("particle_life", minimum, maximum, f32::MIN_POSITIVE)?;
        self.minimum_particle_life = minimum;
        self.maximum_particle_life = maximum;
        self.pool_dirty = true;
        Ok(())
    }

    pub fn speed(&self) -> (f32, f32) {
        (self.minimum_speed, self.maximum_speed)
    }

    pub fn set_speed(&mut self, minimum: f32, maximum: f32) -> Result<()> {
        check_pair("speed", minimum, maximum, 0.0)?;
        self.minimum_speed = minimum;
        self.maximum_speed = maximum;
        Ok(())
    }

    pub fn set_mass(&mut self, minimum: f32, maximum: f32) -> Result<()> {
        check_pair("mass", minimum, maximum, 0.0)?;
        self.minimum_mass = minimum;
        self.maximum_mass = maximum;
        Ok(())
    }

    pub fn set_image_size(&mut self, minimum: Vec2, maximum: Vec2) -> Result<()> {
        check_pair("image_size.x", minimum.x, maximum.x, 0.0)?;
        check_pair("image_size.y", minimum.y, maximum.y, 0.0)?;
        self.minimum_image_size = minimum;
        self.maximum_image_size = maximum;
        Ok(())
    }

    pub fn set_lifetime(&mut self, lifetime: f64) -> Result<()> {
        if lifetime.is_nan() || lifetime <= 0.0 {
            return Err(ember_core::EmberError::ValueOutOfRange {
                field: "lifetime".into(),
                min: 0.0,
                value: lifetime,
            });
        }
        self.lifetime = lifetime;
        Ok(())
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    pub fn set_model_matrix(&mut self, matrix: Mat4) {
        self.model_matrix = matrix;
        self.matrix_dirty = true;
    }

    pub fn emitter_model_matrix(&self) -> &Mat4 {
        &self.emitter_model_matrix
    }

    pub fn set_emitter_model_matrix(&mut self, matrix: Mat4) {
        self.emitter_model_matrix = matrix;
        self.matrix_dirty = true;
    }

    /// Install a hook invoked per live particle per frame, before the
    /// built-in position integration commits.
    pub fn set_update_callback<F: FnMut(&mut Particle, f32) + 'static>(&mut self, hook: F) {
        self.update_callback = Some(Box::new(hook));
    }

    pub fn clear_update_callback(&mut self) {
        self.update_callback = None;
    }

    /// Register a listener for the one-shot completion notification.
    /// Looping systems never complete, so never notify.
    pub fn on_complete<F: FnMut() + 'static>(&mut self, listener: F) {
        self.complete.add_listener(listener);
    }

    // ── Introspection ──

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Elapsed system time, wrapped modulo the lifetime when looping
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }

    /// The billboard collection, once the first update has built it
    pub fn billboards(&self) -> Option<&BillboardCollection> {
        self.billboards.as_ref()
    }

    // ── Per-frame update ──

    /// Advance the system to `frame`. The delta against the previous
    /// frame's time drives the simulation; negative deltas (clock
    /// regression) are clamped to zero.
    pub fn update(&mut self, frame: &FrameState) {
        if !self.show {
            return;
        }

        let billboards = self.billboards.get_or_insert_with(BillboardCollection::new);

        if self.pool_dirty {
            self.particle_estimate = capacity_estimate(
                self.scheduler.emission_rate(),
                self.maximum_particle_life,
                self.scheduler.bursts(),
            );
            self.pool.grow(
                self.particle_estimate,
                self.particles.len(),
                billboards,
                &self.image,
            );
            self.pool_dirty = false;
        }

        let dt = match self.previous_time {
            Some(previous) => (frame.time - previous).max(0.0),
            None => 0.0,
        };

        // Sweep live particles: retire the dead into the pool (billboard
        // hidden, not removed), push interpolated visuals for the rest.
        // Swap-remove keeps the sweep O(live); order is not significant.
        let mut i = 0;
        while i < self.particles.len() {
            let hook = self.update_callback.as_deref_mut();
            if self.particles[i].update(dt as f32, hook) {
                push_billboard_state(billboards, &mut self.particles[i], self.size_in_meters);
                i += 1;
            } else {
                let dead = self.particles.swap_remove(i);
                self.pool.release(dead, billboards);
            }
        }

        let num_to_emit = self.scheduler.number_to_emit(
            &mut self.rng,
            dt,
            self.lifetime,
            self.current_time,
            self.is_complete,
        );

        if num_to_emit > 0 {
            if let Some(emitter) = self.emitter {
                if self.matrix_dirty {
                    self.combined_matrix = mat4_mul(&self.model_matrix, &self.emitter_model_matrix);
                    self.matrix_dirty = false;
                }

                for _ in 0..num_to_emit {
                    let mut particle = self.pool.acquire();
                    emitter.emit(&mut self.rng, &mut particle);

                    // The transform carries translation, so the velocity
                    // direction comes from transforming position + velocity
                    // and re-deriving the offset. Normalizing discards any
                    // scale the transform applied; speed comes only from
                    // the configured bounds.
                    let head = mat4_transform_point(
                        &self.combined_matrix,
                        particle.position + particle.velocity,
                    );
                    particle.position =
                        mat4_transform_point(&self.combined_matrix, particle.position);
                    let direction = (head - particle.position).normalized();
                    let speed = self.rng.range_f32(self.minimum_speed, self.maximum_speed);
                    particle.velocity = direction * speed;

                    particle.life = self
                        .rng
                        .range_f32(self.minimum_particle_life, self.maximum_particle_life);
                    particle.mass = self.rng.range_f32(self.minimum_mass, self.maximum_mass);
                    particle.image_size = Vec2::new(
                        self.rng
                            .range_f32(self.minimum_image_size.x, self.maximum_image_size.x),
                        self.rng
                            .range_f32(self.minimum_image_size.y, self.maximum_image_size.y),
                    );
                    particle.start_color = self.start_color;
                    particle.end_color = self.end_color;
                    particle.start_scale = self.start_scale;
                    particle.end_scale = self.end_scale;
                    particle.age = 0.0;
                    particle.normalized_age = 0.0;
                    particle.image = Some(Arc::clone(&self.image));

                    // A pooled particle may carry a billboard created with
                    // an older image; refresh it on reuse
                    if let Some(handle) = particle.billboard {
                        if let Some(billboard) = billboards.get_mut(handle) {
                            billboard.image = particle.image.clone();
                        }
                    }
                    push_billboard_state(billboards, &mut particle, self.size_in_meters);
                    self.particles.push(particle);
                }
            }
        }

        self.current_time += dt;
        if self.lifetime.is_finite() && self.current_time > self.lifetime {
            if self.looping {
                self.current_time %= self.lifetime;
                self.scheduler.reset_bursts();
            } else if !self.is_complete {
                self.is_complete = true;
                self.complete.raise();
            }
        }
        self.previous_time = Some(frame.time);

        if frame.frame_number % POOL_SHRINK_CADENCE == 0 {
            self.pool
                .shrink(self.particle_estimate, self.particles.len(), billboards);
        }
    }

    /// Release every billboard entry and consume the system. Ownership
    /// makes use-after-destroy a compile error rather than a runtime one.
    pub fn destroy(self) {}
}

/// Write a particle's interpolated visual state into its sink entry,
/// creating the entry on first contact.
fn push_billboard_state(
    billboards: &mut BillboardCollection,
    particle: &mut Particle,
    size_in_meters: bool,
) {
    let handle = match particle.billboard {
        Some(handle) => handle,
        None => {
            let handle = billboards.add(Billboard::new(particle.image.clone()));
            particle.billboard = Some(handle);
            handle
        }
    };
    if let Some(billboard) = billboards.get_mut(handle) {
        billboard.show = true;
        billboard.position = particle.position;
        billboard.width = particle.image_size.x;
        billboard.height = particle.image_size.y;
        billboard.size_in_meters = size_in_meters;
        billboard.color = lerp_color(
            particle.start_color,
            particle.end_color,
            particle.normalized_age,
        );
        billboard.scale = lerp(
            particle.start_scale,
            particle.end_scale,
            particle.normalized_age,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn frame(time: f64, frame_number: u64) -> FrameState {
        FrameState::new(time, frame_number)
    }

    fn base_descriptor() -> ParticleSystemDescriptor {
        ParticleSystemDescriptor {
            emission_rate: 10.0,
            emitter: Some(EmissionShape::Cone { angle: 0.0 }),
            minimum_particle_life: 1.0,
            maximum_particle_life: 1.0,
            minimum_speed: 2.0,
            maximum_speed: 2.0,
            image: "spark.png".into(),
            ..Default::default()
        }
    }

    #[test]
    fn zero_dt_updates_are_idempotent() {
        let mut system = ParticleSystem::new(base_descriptor()).unwrap();
        for n in 1..10 {
            system.update(&frame(0.0, n));
        }
        assert_eq!(system.live_count(), 0);
        assert_eq!(system.current_time(), 0.0);
        // The pool was still sized up front
        assert_eq!(system.pool_size(), 10);
        assert_eq!(system.billboards().unwrap().len(), 10);
    }

    #[test]
    fn pool_and_live_count_stabilize() {
        let mut system = ParticleSystem::new(base_descriptor()).unwrap();
        let dt = 1.0 / 60.0;
        for n in 1..=600u64 {
            system.update(&frame(n as f64 * dt, n));
        }
        // rate 10/s with life 1s: roughly ten alive at steady state, and
        // total storage never drifts past the estimate by more than the
        // few transients alive while their replacements spawn
        let total = system.live_count() + system.pool_size();
        assert!((9..=12).contains(&system.live_count()), "live={}", system.live_count());
        assert!(total <= 13, "total={total}");
        assert_eq!(system.billboards().unwrap().len(), total);
    }

    #[test]
    fn burst_fires_once_at_trigger_time() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 0.0,
            bursts: vec![ParticleBurst::new(2.0, 5, 5).unwrap()],
            minimum_particle_life: 100.0,
            maximum_particle_life: 100.0,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();

        let dt = 0.25;
        let mut n = 0;
        let mut t = 0.0;
        while t <= 2.0 {
            n += 1;
            system.update(&frame(t, n));
            t += dt;
        }
        assert_eq!(system.live_count(), 0);

        while t <= 5.0 {
            n += 1;
            system.update(&frame(t, n));
            t += dt;
        }
        assert_eq!(system.live_count(), 5);
        assert!(system.bursts()[0].has_fired());
    }

    #[test]
    fn rate_zero_single_burst_emits_exactly_once() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 0.0,
            bursts: vec![ParticleBurst::new(0.0, 3, 3).unwrap()],
            minimum_particle_life: 100.0,
            maximum_particle_life: 100.0,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();
        for n in 1..=20u64 {
            system.update(&frame(n as f64 * 0.1, n));
        }
        assert_eq!(system.live_count(), 3);
    }

    #[test]
    fn looping_wraps_time_and_rearms_bursts() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 0.0,
            bursts: vec![ParticleBurst::new(2.0, 5, 5).unwrap()],
            looping: true,
            lifetime: Some(10.0),
            minimum_particle_life: 100.0,
            maximum_particle_life: 100.0,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();

        for n in 1..=13u64 {
            system.update(&frame(n as f64, n));
        }
        // Elapsed time passed 10 and wrapped instead of completing
        assert!(!system.is_complete());
        assert!(system.current_time() < 10.0);
        assert!(!system.bursts()[0].has_fired());
        assert_eq!(system.live_count(), 5);

        for n in 14..=24u64 {
            system.update(&frame(n as f64, n));
        }
        // Second cycle fired the burst again
        assert_eq!(system.live_count(), 10);
    }

    #[test]
    fn non_looping_system_completes_exactly_once() {
        let completions = Rc::new(Cell::new(0u32));
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 0.0,
            looping: false,
            lifetime: Some(5.0),
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();
        let counter = Rc::clone(&completions);
        system.on_complete(move || counter.set(counter.get() + 1));

        for n in 1..=12u64 {
            system.update(&frame(n as f64, n));
            if n <= 5 {
                assert!(!system.is_complete());
            }
        }
        assert!(system.is_complete());
        assert_eq!(completions.get(), 1);
    }

    #[test]
    fn hidden_system_is_frozen() {
        let mut system = ParticleSystem::new(base_descriptor()).unwrap();
        system.show = false;
        for n in 1..=10u64 {
            system.update(&frame(n as f64, n));
        }
        assert_eq!(system.current_time(), 0.0);
        assert_eq!(system.live_count(), 0);
        assert!(system.billboards().is_none());

        system.show = true;
        system.update(&frame(11.0, 11));
        assert!(system.billboards().is_some());
    }

    #[test]
    fn missing_emitter_never_emits() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 100.0,
            emitter: None,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();
        for n in 1..=60u64 {
            system.update(&frame(n as f64 * 0.1, n));
        }
        assert_eq!(system.live_count(), 0);
    }

    #[test]
    fn transform_rotates_direction_but_preserves_speed() {
        // Maps +z to +y, plus a translation that must not leak into the
        // velocity direction
        let mut rotation = MAT4_IDENTITY;
        rotation[1] = [0.0, 0.0, -1.0, 0.0];
        rotation[2] = [0.0, 1.0, 0.0, 0.0];
        rotation[3] = [5.0, 0.0, 0.0, 1.0];

        let mut system = ParticleSystem::new(base_descriptor()).unwrap();
        system.set_model_matrix(rotation);
        system.update(&frame(0.0, 1));
        system.update(&frame(0.5, 2));

        assert!(system.live_count() > 0);
        for particle in &system.particles {
            assert!(particle.velocity.x.abs() < 1e-4);
            assert!(particle.velocity.z.abs() < 1e-4);
            assert!((particle.velocity.y - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn non_uniform_scale_does_not_change_speed() {
        let mut scale = MAT4_IDENTITY;
        scale[2][2] = 5.0;

        let mut system = ParticleSystem::new(base_descriptor()).unwrap();
        system.set_model_matrix(scale);
        system.update(&frame(0.0, 1));
        system.update(&frame(0.5, 2));

        assert!(system.live_count() > 0);
        for particle in &system.particles {
            // Normalization discarded the transform's z scaling
            assert!((particle.velocity.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn retired_particles_keep_hidden_billboards() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 0.0,
            bursts: vec![ParticleBurst::new(0.0, 4, 4).unwrap()],
            minimum_particle_life: 0.5,
            maximum_particle_life: 0.5,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();
        system.update(&frame(0.0, 1));
        system.update(&frame(0.1, 2));
        system.update(&frame(0.2, 3));
        assert_eq!(system.live_count(), 4);
        let visible = system
            .billboards()
            .unwrap()
            .iter()
            .filter(|b| b.show)
            .count();
        assert_eq!(visible, 4);

        system.update(&frame(1.0, 4));
        assert_eq!(system.live_count(), 0);
        assert_eq!(system.pool_size(), 4);
        // Entries are hidden, not removed, so reuse stays cheap
        let billboards = system.billboards().unwrap();
        assert_eq!(billboards.len(), 4);
        assert!(billboards.iter().all(|b| !b.show));
    }

    #[test]
    fn shrink_reclaims_excess_capacity_on_cadence() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 0.0,
            bursts: vec![ParticleBurst::new(0.0, 50, 50).unwrap()],
            minimum_particle_life: 0.5,
            maximum_particle_life: 0.5,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();
        system.update(&frame(0.0, 1));
        system.update(&frame(0.1, 2));
        system.update(&frame(0.2, 3));
        assert_eq!(system.live_count(), 50);

        // All dead and pooled; the burst is spent, so dropping it shrinks
        // the estimate to zero
        system.update(&frame(1.0, 4));
        assert_eq!(system.pool_size(), 50);
        system.set_bursts(Vec::new());
        system.update(&frame(1.1, 5));
        assert_eq!(system.billboards().unwrap().len(), 50);

        // Off-cadence frames leave the pool alone; the 120th frame trims it
        system.update(&frame(1.2, 119));
        assert_eq!(system.billboards().unwrap().len(), 50);
        system.update(&frame(1.3, 120));
        assert_eq!(system.pool_size(), 0);
        assert_eq!(system.billboards().unwrap().len(), 0);
    }

    #[test]
    fn update_hook_feeds_integration() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 0.0,
            bursts: vec![ParticleBurst::new(0.0, 1, 1).unwrap()],
            minimum_speed: 0.0,
            maximum_speed: 0.0,
            minimum_particle_life: 100.0,
            maximum_particle_life: 100.0,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();
        // Constant downward force, as an owner would apply gravity
        system.set_update_callback(|particle, dt| {
            particle.velocity.y -= 9.8 * dt;
        });

        system.update(&frame(0.0, 1));
        system.update(&frame(0.1, 2));
        system.update(&frame(0.2, 3));
        assert_eq!(system.live_count(), 1);
        system.update(&frame(1.2, 4));
        let p = &system.particles[0];
        assert!(p.velocity.y < 0.0);
        assert!(p.position.y < 0.0);
    }

    #[test]
    fn carry_over_emission_matches_rate_long_run() {
        let descriptor = ParticleSystemDescriptor {
            emission_rate: 7.0,
            minimum_particle_life: 1000.0,
            maximum_particle_life: 1000.0,
            ..base_descriptor()
        };
        let mut system = ParticleSystem::new(descriptor).unwrap();
        let dt = 1.0 / 60.0;
        for n in 1..=601u64 {
            system.update(&frame((n - 1) as f64 * dt, n));
        }
        // 10 seconds at 7/s, nothing dies
        let expected = 7.0 * 10.0;
        assert!((system.live_count() as f64 - expected).abs() <= 1.0);
    }

    #[test]
    fn from_toml_builds_a_working_system() {
        let mut system = ParticleSystem::from_toml(
            r#"
emission_rate = 30.0
image = "ember.png"
minimum_particle_life = 2.0
maximum_particle_life = 3.0

[emitter]
shape = "sphere"
radius = 1.0
"#,
        )
        .unwrap();
        system.update(&frame(0.0, 1));
        system.update(&frame(0.5, 2));
        assert!(system.live_count() > 0);

        assert!(ParticleSystem::from_toml("emission_rate = -3.0").is_err());
    }
}
