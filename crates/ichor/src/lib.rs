//! Ichor pool hazard: a trigger volume that escalates from bubbling ichor
//! to arms pulling the player under.
//!
//! [`HazardController`] is the state machine. It owns an [`ArmPool`] of
//! pooled [`HazardArm`]s and emits [`FxCommand`]s for the host engine's
//! effect, animation and actor systems to apply.

pub mod actor;
pub mod arm;
pub mod config;
pub mod error;
pub mod fx;
pub mod hazard;
pub mod pool;
pub mod presence;

#[cfg(test)]
mod test_support;

pub use actor::{ActorProvider, ActorSnapshot};
pub use arm::{ArmState, HazardArm};
pub use config::HazardConfig;
pub use error::ConfigError;
pub use fx::{AnimParam, ArmGroupCommand, EffectCommand, FxCommand};
pub use hazard::{HazardController, HazardEnv, HazardPoolState};
pub use pool::ArmPool;
pub use presence::PlayerPresence;
