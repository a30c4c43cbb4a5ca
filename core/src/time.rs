//! Frame timing.

use std::time::Instant;

/// Per-frame wall clock. Advanced once per frame by the event loop, before
/// application update logic, so `delta` is stable for the whole frame.
pub struct Time {
    frame_start: Instant,
    delta: f32,
}

impl Time {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
            delta: 0.0,
        }
    }

    pub(crate) fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.frame_start).as_secs_f32();
        self.frame_start = now;
    }

    /// Seconds elapsed between the last two frames. Zero until the first
    /// frame completes.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Instantaneous frames per second, derived from `delta`.
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 { 1.0 / self.delta } else { 0.0 }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
