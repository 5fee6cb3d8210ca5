//! Access to the player actor the hazard is trying to drown.

use engine_core::{flatten_direction, Vec3};

/// Kinematic state of the current actor, sampled fresh for each use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Facing direction. Need not be normalized or horizontal.
    pub forward: Vec3,
}

impl ActorSnapshot {
    pub fn new(position: Vec3, velocity: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            velocity,
            forward,
        }
    }

    /// Where the actor will be `seconds` from now at constant velocity.
    pub fn predicted_position(&self, seconds: f32) -> Vec3 {
        self.position + self.velocity * seconds
    }

    /// Forward projected onto the ground plane.
    pub fn flat_forward(&self) -> Vec3 {
        flatten_direction(self.forward)
    }
}

/// Looks up the actor currently controlled by the player.
///
/// Returns `None` while the actor is destroyed, respawning or missing.
pub trait ActorProvider {
    fn current_actor(&self) -> Option<ActorSnapshot>;
}

impl ActorProvider for Option<ActorSnapshot> {
    fn current_actor(&self) -> Option<ActorSnapshot> {
        *self
    }
}

impl ActorProvider for ActorSnapshot {
    fn current_actor(&self) -> Option<ActorSnapshot> {
        Some(*self)
    }
}
