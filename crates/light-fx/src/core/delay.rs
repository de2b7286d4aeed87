//! Reusable wait primitive for the delay phases of an effect.

/// Tracks elapsed time against a target duration.
///
/// One timer is reused across every wait in an effect: `reset` swaps in the
/// next target and zeroes the accumulator. The accumulator is `f64` so long
/// runs of tiny steps still reach the target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DelayTimer {
    /// Target duration in seconds.
    duration: f64,
    /// Time accumulated since the last reset.
    accumulator: f64,
}

impl DelayTimer {
    /// Create a timer targeting `duration` seconds. Negative values clamp to zero.
    pub fn new(duration: f32) -> Self {
        Self {
            duration: f64::from(duration.max(0.0)),
            accumulator: 0.0,
        }
    }

    /// Add `dt` to the accumulator.
    ///
    /// Returns `true` while the target has not been reached (keep waiting),
    /// `false` once it has been reached or exceeded. A zero-length timer
    /// returns `false` on its first tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.accumulator += f64::from(dt);
        self.accumulator < self.duration
    }

    /// Zero the accumulator and target a new duration.
    pub fn reset(&mut self, duration: f32) {
        self.duration = f64::from(duration.max(0.0));
        self.accumulator = 0.0;
    }

    /// Whether the target has been reached.
    pub fn is_finished(&self) -> bool {
        self.accumulator >= self.duration
    }

    /// Time accumulated since the last reset.
    pub fn elapsed(&self) -> f32 {
        self.accumulator as f32
    }

    /// The current target duration.
    pub fn duration(&self) -> f32 {
        self.duration as f32
    }

    /// Time left before the target is reached (never negative).
    pub fn remaining(&self) -> f32 {
        (self.duration - self.accumulator).max(0.0) as f32
    }
}
