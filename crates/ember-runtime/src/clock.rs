//! Frame clock producing monotonic time and a frame counter

use std::time::Instant;

/// Per-frame simulation inputs: monotonic time in seconds and a frame counter.
///
/// Consumers derive their own delta from consecutive `time` values; the
/// frame counter only gates periodic maintenance work.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameState {
    /// Seconds since the driver started
    pub time: f64,
    /// Number of frames produced so far (first frame is 1)
    pub frame_number: u64,
}

impl FrameState {
    pub const fn new(time: f64, frame_number: u64) -> Self {
        Self { time, frame_number }
    }
}

/// Wall-clock frame driver. Call `tick()` once per frame.
pub struct FrameClock {
    total_time: f64,
    frame_number: u64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            frame_number: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock and return the state for this frame.
    /// The first tick reports zero elapsed time.
    pub fn tick(&mut self) -> FrameState {
        let now = Instant::now();
        self.frame_number += 1;

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            return FrameState::new(self.total_time, self.frame_number);
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        // Clamp stalls (debugger pauses, window drags) to 250ms of sim time
        self.total_time += elapsed.min(0.25);
        FrameState::new(self.total_time, self.frame_number)
    }

    /// Total simulation time accumulated so far
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Frames produced so far
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}
