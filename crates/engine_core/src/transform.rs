//! Transform component and helpers for ground-plane positioning.

use glam::{Quat, Vec3};

/// A 3D transform representing position and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Forward direction projected onto the XZ plane and normalized.
    /// Falls back to -Z when looking straight up or down.
    pub fn flat_forward(&self) -> Vec3 {
        flatten_direction(self.forward())
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

/// Project a direction onto the XZ plane and normalize it (-Z if degenerate).
pub fn flatten_direction(dir: Vec3) -> Vec3 {
    let flat = Vec3::new(dir.x, 0.0, dir.z).normalize_or_zero();
    if flat == Vec3::ZERO {
        -Vec3::Z
    } else {
        flat
    }
}

/// Same XZ as `point`, Y replaced by `height`.
pub fn at_height(point: Vec3, height: f32) -> Vec3 {
    Vec3::new(point.x, height, point.z)
}
