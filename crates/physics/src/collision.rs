//! Collision groups and filtering for hazard sensors.

use rapier3d::prelude::*;

/// Collision groups for the entities a hazard volume cares about.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (terrain, walls)
    Environment = 1 << 0,
    /// Player character
    Player = 1 << 1,
    /// Triggers and sensors
    Trigger = 1 << 6,
}

impl CollisionGroup {
    /// Membership/filter for trigger sensors: they only detect the player.
    pub fn trigger() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Trigger as u32);
        let filter = Group::from_bits_retain(Self::Player as u32);
        (membership, filter)
    }

    /// Interaction groups ready to hand to a collider builder.
    pub fn trigger_interaction() -> InteractionGroups {
        let (membership, filter) = Self::trigger();
        InteractionGroups::new(membership, filter)
    }
}
