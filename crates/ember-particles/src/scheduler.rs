//! Emission scheduling: steady-state rate integration with fractional
//! carry-over, plus one-shot scheduled bursts.

use crate::rand::ParticleRng;
use ember_core::{EmberError, Result};
use serde::Deserialize;

/// A one-time scheduled emission event. Fires once per loop cycle, the
/// first frame the system's elapsed time passes `time`.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "BurstDescriptor")]
pub struct ParticleBurst {
    time: f64,
    minimum: u32,
    maximum: u32,
    fired: bool,
}

#[derive(Deserialize)]
struct BurstDescriptor {
    time: f64,
    minimum: u32,
    maximum: u32,
}

impl TryFrom<BurstDescriptor> for ParticleBurst {
    type Error = EmberError;

    fn try_from(d: BurstDescriptor) -> Result<Self> {
        ParticleBurst::new(d.time, d.minimum, d.maximum)
    }
}

impl ParticleBurst {
    pub fn new(time: f64, minimum: u32, maximum: u32) -> Result<Self> {
        if time < 0.0 {
            return Err(EmberError::ValueOutOfRange {
                field: "burst.time".into(),
                min: 0.0,
                value: time,
            });
        }
        if minimum > maximum {
            return Err(EmberError::InvalidBounds {
                field: "burst.count".into(),
                min: minimum as f64,
                max: maximum as f64,
            });
        }
        Ok(Self {
            time,
            minimum,
            maximum,
            fired: false,
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    /// Whether this burst has fired in the current loop cycle
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Computes, each frame, how many particles to emit from elapsed time,
/// the configured rate, and any pending bursts.
pub struct EmissionScheduler {
    emission_rate: f64,
    /// Fractional leftover from rate * dt, always in [0, 1)
    carry_over: f64,
    bursts: Vec<ParticleBurst>,
}

impl EmissionScheduler {
    pub fn new(emission_rate: f64, bursts: Vec<ParticleBurst>) -> Result<Self> {
        check_rate(emission_rate)?;
        Ok(Self {
            emission_rate,
            carry_over: 0.0,
            bursts,
        })
    }

    pub fn emission_rate(&self) -> f64 {
        self.emission_rate
    }

    pub fn set_emission_rate(&mut self, rate: f64) -> Result<()> {
        check_rate(rate)?;
        self.emission_rate = rate;
        Ok(())
    }

    pub fn bursts(&self) -> &[ParticleBurst] {
        &self.bursts
    }

    pub fn set_bursts(&mut self, bursts: Vec<ParticleBurst>) {
        self.bursts = bursts;
    }

    /// Clear every burst's fired flag for a new loop cycle
    pub fn reset_bursts(&mut self) {
        for burst in &mut self.bursts {
            burst.fired = false;
        }
    }

    pub fn carry_over(&self) -> f64 {
        self.carry_over
    }

    /// Number of particles to emit this frame.
    ///
    /// `dt` is clamped to >= 0 and wrapped modulo a finite `lifetime` so a
    /// single long frame cannot overshoot a short system lifetime.
    /// `current_time` is the system's elapsed time before this frame's
    /// advance; a burst fires the first call where it exceeds the trigger.
    pub fn number_to_emit(
        &mut self,
        rng: &mut ParticleRng,
        dt: f64,
        lifetime: f64,
        current_time: f64,
        is_complete: bool,
    ) -> u32 {
        if is_complete {
            return 0;
        }

        let mut dt = dt.max(0.0);
        if lifetime.is_finite() && lifetime > 0.0 {
            dt %= lifetime;
        }

        let v = dt * self.emission_rate;
        let whole = v.floor();
        let mut count = whole as u32;
        self.carry_over += v - whole;
        if self.carry_over > 1.0 {
            count += 1;
            self.carry_over -= 1.0;
        }

        for burst in &mut self.bursts {
            if !burst.fired && current_time > burst.time {
                count += rng.range_u32(burst.minimum, burst.maximum);
                burst.fired = true;
            }
        }

        count
    }
}

fn check_rate(rate: f64) -> Result<()> {
    if rate < 0.0 || !rate.is_finite() {
        return Err(EmberError::ValueOutOfRange {
            field: "emission_rate".into(),
            min: 0.0,
            value: rate,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> ParticleRng {
        ParticleRng::new(42)
    }

    #[test]
    fn rate_converges_without_drift() {
        let mut rng = rng();
        let mut scheduler = EmissionScheduler::new(7.3, Vec::new()).unwrap();
        let dt = 1.0 / 60.0;
        let mut emitted = 0u64;
        for _ in 0..6000 {
            emitted += scheduler.number_to_emit(&mut rng, dt, f64::INFINITY, 0.0, false) as u64;
            let carry = scheduler.carry_over();
            assert!((0.0..1.0).contains(&carry));
        }
        let expected = 7.3 * dt * 6000.0;
        assert!((emitted as f64 - expected).abs() <= 1.0);
    }

    #[test]
    fn slow_rates_still_emit() {
        let mut rng = rng();
        let mut scheduler = EmissionScheduler::new(0.5, Vec::new()).unwrap();
        let mut emitted = 0u64;
        for _ in 0..600 {
            emitted += scheduler.number_to_emit(&mut rng, 1.0 / 60.0, f64::INFINITY, 0.0, false)
                as u64;
        }
        // 10 seconds at 0.5/s
        assert!((4..=6).contains(&emitted));
    }

    #[test]
    fn negative_dt_clamped() {
        let mut rng = rng();
        let mut scheduler = EmissionScheduler::new(100.0, Vec::new()).unwrap();
        assert_eq!(
            scheduler.number_to_emit(&mut rng, -0.5, f64::INFINITY, 0.0, false),
            0
        );
        assert_eq!(scheduler.carry_over(), 0.0);
    }

    #[test]
    fn complete_system_emits_nothing() {
        let mut rng = rng();
        let mut scheduler = EmissionScheduler::new(100.0, Vec::new()).unwrap();
        assert_eq!(
            scheduler.number_to_emit(&mut rng, 1.0, f64::INFINITY, 0.0, true),
            0
        );
    }

    #[test]
    fn dt_wraps_modulo_lifetime() {
        let mut rng = rng();
        let mut scheduler = EmissionScheduler::new(10.0, Vec::new()).unwrap();
        // One frame's delta of exactly four lifetimes wraps to zero
        assert_eq!(scheduler.number_to_emit(&mut rng, 2.0, 0.5, 0.0, false), 0);
    }

    #[test]
    fn burst_fires_exactly_once() {
        let mut rng = rng();
        let burst = ParticleBurst::new(2.0, 5, 5).unwrap();
        let mut scheduler = EmissionScheduler::new(0.0, vec![burst]).unwrap();

        assert_eq!(scheduler.number_to_emit(&mut rng, 0.1, f64::INFINITY, 1.9, false), 0);
        assert_eq!(scheduler.number_to_emit(&mut rng, 0.1, f64::INFINITY, 2.1, false), 5);
        assert!(scheduler.bursts()[0].has_fired());
        assert_eq!(scheduler.number_to_emit(&mut rng, 0.1, f64::INFINITY, 2.2, false), 0);

        scheduler.reset_bursts();
        assert_eq!(scheduler.number_to_emit(&mut rng, 0.1, f64::INFINITY, 2.3, false), 5);
    }

    #[test]
    fn burst_count_sampled_in_range() {
        let mut rng = rng();
        for _ in 0..50 {
            let burst = ParticleBurst::new(0.0, 3, 8).unwrap();
            let mut scheduler = EmissionScheduler::new(0.0, vec![burst]).unwrap();
            let n = scheduler.number_to_emit(&mut rng, 0.1, f64::INFINITY, 1.0, false);
            assert!((3..=8).contains(&n));
        }
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(EmissionScheduler::new(-1.0, Vec::new()).is_err());
        assert!(ParticleBurst::new(-0.1, 0, 1).is_err());
        assert!(ParticleBurst::new(1.0, 5, 2).is_err());

        let mut scheduler = EmissionScheduler::new(1.0, Vec::new()).unwrap();
        assert!(scheduler.set_emission_rate(f64::NAN).is_err());
        assert_eq!(scheduler.emission_rate(), 1.0);
    }
}
