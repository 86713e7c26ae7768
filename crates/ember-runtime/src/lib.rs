//! Ember Runtime - Frame driver and event plumbing
//!
//! Provides the per-frame inputs the simulation consumes:
//! - `FrameState` - monotonic time plus a frame counter
//! - `FrameClock` - wall-clock driver producing successive frame states
//! - `Event` - synchronous observer list for one-shot notifications

mod clock;
mod event;

pub use clock::{FrameClock, FrameState};
pub use event::Event;
