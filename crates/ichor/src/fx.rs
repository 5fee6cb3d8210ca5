//! Commands for the host engine's effect, animation and actor systems.
//!
//! The controller never touches particles or animators directly. It queues
//! these commands and the host drains and applies them after each call.

use engine_core::Vec3;

/// Activation and placement of a positional effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectCommand {
    Activate { at: Vec3 },
    MoveTo(Vec3),
    Deactivate,
}

/// Commands for the pull-under arm group (not part of the pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmGroupCommand {
    Activate,
    Submerge { forced: bool },
    Deactivate,
}

/// Boolean animator parameters driven by the hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    Bubbling,
    PullingUnder,
    PullUnderEmerged,
}

impl AnimParam {
    pub const ALL: [AnimParam; 3] = [AnimParam::Bubbling, AnimParam::PullingUnder, AnimParam::PullUnderEmerged];

    /// Parameter name as authored in the animator.
    pub fn name(&self) -> &'static str {
        match self {
            AnimParam::Bubbling => "Bubbling",
            AnimParam::PullingUnder => "PullingUnder",
            AnimParam::PullUnderEmerged => "PullUnderEmerged",
        }
    }
}

/// Clip cross-faded to when the pull-under starts.
pub const PULL_UNDER_CLIP: &str = "PullUnder";

#[derive(Debug, Clone, PartialEq)]
pub enum FxCommand {
    /// Bubbling ichor emission effect.
    Bubbles(EffectCommand),
    /// Emission-rate multiplier for the bubble effect.
    EmissionRate(f32),
    /// Surface distortion around the pull-under.
    Distortion(EffectCommand),
    PullUnderArms(ArmGroupCommand),
    SetAnimBool { param: AnimParam, value: bool },
    CrossFade { clip: &'static str, blend: f32 },
    /// Ask the actor to play its "being pulled under" reaction.
    PulledUnderReaction,
}
