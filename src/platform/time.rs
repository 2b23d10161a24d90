//! Animation-frame timing
//!
//! Converts the host's monotonically increasing frame timestamps (ms) into
//! per-frame deltas for the simulation.

/// Longest delta handed to the simulation in one frame (ms)
pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

/// Turns frame timestamps into deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous timestamp in ms. The first call returns 0,
    /// as does a timestamp that went backwards. Long gaps (a backgrounded
    /// tab) are clamped to [`MAX_FRAME_DELTA_MS`].
    pub fn delta_ms(&mut self, now: f64) -> f32 {
        let delta = match self.last_time {
            Some(last) if now > last => (now - last).min(MAX_FRAME_DELTA_MS),
            _ => 0.0,
        };
        self.last_time = Some(now);
        delta as f32
    }

    /// Forget the previous timestamp so the next frame starts from zero
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}
