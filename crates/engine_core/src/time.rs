//! Time management for the fixed-step simulation loop.

/// Manages frame timing for a loop that is advanced by an external delta.
///
/// The hazard simulation is stepped by the host engine (or a headless
/// driver), so the clock never samples wall time itself.
#[derive(Debug, Clone)]
pub struct Time {
    /// Duration of the last frame in seconds.
    delta: f32,
    /// Total elapsed time since start in seconds.
    elapsed: f64,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep in seconds (default 60 Hz).
    fixed_timestep: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new clock at 60 Hz.
    pub fn new() -> Self {
        Self {
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            fixed_timestep: 1.0 / 60.0,
        }
    }

    /// Create a clock with a fixed rate in Hz.
    pub fn with_fixed_rate(hz: f32) -> Self {
        let mut time = Self::new();
        time.set_fixed_rate(hz);
        time
    }

    /// Advance the clock by `dt` seconds. Negative deltas are treated as zero.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt.max(0.0);
        self.elapsed += self.delta as f64;
        self.frame_count += 1;
    }

    /// Advance the clock by one fixed timestep and return it.
    pub fn step(&mut self) -> f32 {
        self.advance(self.fixed_timestep);
        self.delta
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep
    }

    /// Set the fixed timestep rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f32) {
        if hz > 0.0 {
            self.fixed_timestep = 1.0 / hz;
        } else {
            log::warn!("Ignoring non-positive fixed rate {}", hz);
        }
    }
}

/// Elapsed-time accumulator paired with a threshold by its owner.
///
/// Never goes negative: negative deltas are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stopwatch {
    elapsed: f32,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a frame delta.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Overwrite the elapsed time (clamped to zero).
    pub fn set(&mut self, seconds: f32) {
        self.elapsed = seconds.max(0.0);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the accumulated time has reached `threshold`.
    pub fn reached(&self, threshold: f32) -> bool {
        self.elapsed >= threshold
    }
}
