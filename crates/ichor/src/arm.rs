//! Contract for a single pooled hazard arm.
//!
//! Arms animate and detect grabs on their own; the pool only positions,
//! activates and commands them.

use engine_core::Vec3;

/// Lifecycle state an arm reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArmState {
    /// Fully submerged, at rest.
    #[default]
    Idle,
    /// Rising out of the ichor and reaching.
    Emerging,
    /// Holding the player.
    Grabbed,
    /// Sinking back under.
    Submerging,
}

pub trait HazardArm {
    /// Start rising out of the ichor.
    fn emerge(&mut self);

    /// Sink back under. `forced` skips any grab/hold animation.
    fn submerge(&mut self, forced: bool);

    fn state(&self) -> ArmState;

    fn set_position(&mut self, position: Vec3);

    fn set_active(&mut self, active: bool);

    fn is_active(&self) -> bool;

    /// One-shot "grabbed player" signal: true exactly once per grab.
    fn take_grab_signal(&mut self) -> bool {
        false
    }

    /// Per-frame update. `target` is the actor position when one exists.
    fn tick(&mut self, _dt: f32, _target: Option<Vec3>) {}
}
