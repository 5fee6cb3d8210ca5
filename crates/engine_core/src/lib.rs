//! Core engine types and utilities shared by the hazard crates.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and velocity components
//! - Frame clock and elapsed-time accumulators
//! - Cancellable deferred tasks
//! - Trigger volume contract and presence edge detection

pub mod components;
pub mod schedule;
pub mod time;
pub mod transform;
pub mod volume;

pub use components::*;
pub use schedule::*;
pub use time::*;
pub use transform::*;
pub use volume::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
pub use hecs::{Entity, World};
