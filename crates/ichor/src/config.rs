//! Hazard tuning. Loaded from a RON file at setup and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Timings, pool sizing and spawn geometry for one ichor pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardConfig {
    /// Seconds of bubbling before the pull-under starts.
    #[serde(default = "default_kill_timer_length")]
    pub kill_timer_length: f32,
    /// Seconds after entry before the first arms rise.
    #[serde(default = "default_spawn_arms_timer_length")]
    pub spawn_arms_timer_length: f32,
    /// Seconds the pull-under arms take to fully emerge.
    #[serde(default = "default_pull_under_emerge_duration")]
    pub pull_under_emerge_duration: f32,
    /// Number of pooled arms. Zero leaves the hazard in a degraded mode.
    #[serde(default = "default_arm_pool_capacity")]
    pub arm_pool_capacity: usize,
    /// Arms raised around the player per escalation.
    #[serde(default = "default_arms_to_spawn")]
    pub arms_to_spawn: usize,
    /// Seconds between an arm grabbing the player and it sinking again.
    #[serde(default = "default_submerge_on_grab_delay")]
    pub submerge_on_grab_delay: f32,
    #[serde(default = "default_inner_spawn_radius")]
    pub inner_spawn_radius: f32,
    #[serde(default = "default_outer_spawn_radius")]
    pub outer_spawn_radius: f32,
    /// World Y of the ichor surface. Arms and effects sit on this plane.
    #[serde(default)]
    pub spawn_height: f32,
    /// Bubble emission rate when bubbling starts.
    #[serde(default = "default_emission_baseline")]
    pub emission_baseline: f32,
    /// Emission added per second while bubbling.
    #[serde(default = "default_emission_increase_rate")]
    pub emission_increase_rate: f32,
    /// Re-entering faster than this after leaving carries the kill timer over.
    #[serde(default = "default_jump_cheese_threshold")]
    pub jump_cheese_threshold: f32,
    /// Multiplier applied to the time spent outside on a fast re-entry.
    #[serde(default = "default_jump_cheese_penalty")]
    pub jump_cheese_penalty: f32,
    /// Cross-fade duration into the pull-under clip.
    #[serde(default = "default_pull_under_blend")]
    pub pull_under_blend: f32,
    /// Fixed RNG seed for reproducible spawn radii.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_kill_timer_length() -> f32 {
    6.0
}
fn default_spawn_arms_timer_length() -> f32 {
    1.0
}
fn default_pull_under_emerge_duration() -> f32 {
    1.2
}
fn default_arm_pool_capacity() -> usize {
    12
}
fn default_arms_to_spawn() -> usize {
    4
}
fn default_submerge_on_grab_delay() -> f32 {
    0.75
}
fn default_inner_spawn_radius() -> f32 {
    1.5
}
fn default_outer_spawn_radius() -> f32 {
    3.0
}
fn default_emission_baseline() -> f32 {
    8.0
}
fn default_emission_increase_rate() -> f32 {
    4.0
}
fn default_jump_cheese_threshold() -> f32 {
    0.5
}
fn default_jump_cheese_penalty() -> f32 {
    1.7
}
fn default_pull_under_blend() -> f32 {
    0.25
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            kill_timer_length: default_kill_timer_length(),
            spawn_arms_timer_length: default_spawn_arms_timer_length(),
            pull_under_emerge_duration: default_pull_under_emerge_duration(),
            arm_pool_capacity: default_arm_pool_capacity(),
            arms_to_spawn: default_arms_to_spawn(),
            submerge_on_grab_delay: default_submerge_on_grab_delay(),
            inner_spawn_radius: default_inner_spawn_radius(),
            outer_spawn_radius: default_outer_spawn_radius(),
            spawn_height: 0.0,
            emission_baseline: default_emission_baseline(),
            emission_increase_rate: default_emission_increase_rate(),
            jump_cheese_threshold: default_jump_cheese_threshold(),
            jump_cheese_penalty: default_jump_cheese_penalty(),
            pull_under_blend: default_pull_under_blend(),
            seed: None,
        }
    }
}

impl HazardConfig {
    /// Parse and validate a RON document.
    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No hazard config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Reject tunings the state machine cannot run sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("kill_timer_length", self.kill_timer_length),
            ("spawn_arms_timer_length", self.spawn_arms_timer_length),
            ("pull_under_emerge_duration", self.pull_under_emerge_duration),
            ("submerge_on_grab_delay", self.submerge_on_grab_delay),
            ("jump_cheese_threshold", self.jump_cheese_threshold),
            ("pull_under_blend", self.pull_under_blend),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(field, format!("{} is not a non-negative duration", value)));
            }
        }

        if self.inner_spawn_radius < 0.0 {
            return Err(ConfigError::invalid("inner_spawn_radius", "must not be negative"));
        }
        if self.inner_spawn_radius > self.outer_spawn_radius {
            return Err(ConfigError::invalid(
                "outer_spawn_radius",
                format!("{} is smaller than inner radius {}", self.outer_spawn_radius, self.inner_spawn_radius),
            ));
        }
        if self.arms_to_spawn == 0 {
            return Err(ConfigError::invalid("arms_to_spawn", "must spawn at least one arm"));
        }
        if self.jump_cheese_penalty < 0.0 {
            return Err(ConfigError::invalid("jump_cheese_penalty", "must not be negative"));
        }
        if self.arm_pool_capacity == 0 {
            log::warn!("Hazard config has an empty arm pool; deactivation will stall until reset");
        }
        Ok(())
    }
}
