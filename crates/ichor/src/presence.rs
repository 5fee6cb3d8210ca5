//! Enter/exit bookkeeping and the jump-cheese kill-timer carry-over.
//!
//! Hopping out of the pool and straight back in must not reset the threat.
//! A re-entry within `jump_cheese_threshold` seconds resumes the kill timer
//! at `time_outside * jump_cheese_penalty` instead of zero.

/// Transient flags describing the player's relationship to the volume.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerPresence {
    just_entered: bool,
    has_exited: bool,
    time_since_exit: f32,
}

impl PlayerPresence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry and return the kill timer to resume from.
    pub fn enter(&mut self, threshold: f32, penalty: f32) -> f32 {
        let kill_time = if self.has_exited && self.time_since_exit <= threshold {
            self.time_since_exit * penalty
        } else {
            0.0
        };
        self.just_entered = true;
        self.has_exited = false;
        self.time_since_exit = 0.0;
        kill_time
    }

    pub fn exit(&mut self) {
        self.just_entered = false;
        self.has_exited = true;
        self.time_since_exit = 0.0;
    }

    /// Per-frame update; the time outside only grows after an exit.
    pub fn tick(&mut self, dt: f32) {
        self.just_entered = false;
        if self.has_exited {
            self.time_since_exit += dt.max(0.0);
        }
    }

    pub fn just_entered(&self) -> bool {
        self.just_entered
    }

    pub fn has_exited(&self) -> bool {
        self.has_exited
    }

    pub fn time_since_exit(&self) -> f32 {
        self.time_since_exit
    }
}
