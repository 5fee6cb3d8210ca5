//! Physics-backed trigger volumes using Rapier3D.

pub mod collision;
pub mod sensor;

pub use collision::*;
pub use sensor::*;

// Re-export Rapier for downstream crates
pub use rapier3d;
