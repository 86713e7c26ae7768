//! Object pool: reuses retired particles and their billboard handles so
//! steady-state emission never allocates mid-frame.

use crate::billboard::{Billboard, BillboardCollection};
use crate::particle::Particle;
use crate::scheduler::ParticleBurst;
use std::sync::Arc;

/// Free-list stack of retired particles. Each pooled particle keeps its
/// billboard handle; the entry is hidden in the sink, not removed, so
/// reuse is a cheap re-show.
#[derive(Default)]
pub struct ParticlePool {
    free: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.free.len()
    }

    /// Pop a pooled particle, or construct a fresh one. Never fails.
    pub fn acquire(&mut self) -> Particle {
        self.free.pop().unwrap_or_else(Particle::new)
    }

    /// Return a retired particle, hiding (not removing) its sink entry.
    pub fn release(&mut self, particle: Particle, billboards: &mut BillboardCollection) {
        if let Some(handle) = particle.billboard {
            if let Some(billboard) = billboards.get_mut(handle) {
                billboard.show = false;
            }
        }
        self.free.push(particle);
    }

    /// Pre-allocate particles (each with a hidden sink entry) until
    /// `live_count + size()` reaches `estimate`.
    pub fn grow(
        &mut self,
        estimate: usize,
        live_count: usize,
        billboards: &mut BillboardCollection,
        image: &Arc<str>,
    ) {
        let num_to_add = estimate.saturating_sub(live_count + self.free.len());
        self.free.reserve(num_to_add);
        for _ in 0..num_to_add {
            let mut particle = Particle::new();
            particle.billboard = Some(billboards.add(Billboard::new(Some(Arc::clone(image)))));
            self.free.push(particle);
        }
    }

    /// Drop pooled particles beyond what the estimate requires for the
    /// current live count, physically removing their sink entries. Run on
    /// a coarse cadence; sink removal is not free.
    pub fn shrink(
        &mut self,
        estimate: usize,
        live_count: usize,
        billboards: &mut BillboardCollection,
    ) {
        let keep = estimate.saturating_sub(live_count);
        while self.free.len() > keep {
            // Pool is never empty here: keep >= 0 and len > keep
            if let Some(particle) = self.free.pop() {
                if let Some(handle) = particle.billboard {
                    billboards.remove(handle);
                }
            }
        }
    }
}

/// Expected steady-state population: rate-driven particles alive at once
/// plus the worst case of every burst at its maximum.
pub fn capacity_estimate(
    emission_rate: f64,
    max_particle_life: f32,
    bursts: &[ParticleBurst],
) -> usize {
    let burst_total: u64 = bursts.iter().map(|b| b.maximum() as u64).sum();
    (emission_rate * max_particle_life as f64).ceil() as usize + burst_total as usize
}
