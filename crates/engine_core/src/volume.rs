//! Trigger volumes: containment queries and enter/exit edge detection.

use glam::Vec3;

/// Axis-aligned bounding box snapshot of a trigger volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.cmple(self.half_extents).all()
    }
}

/// A spatial region that can report whether a point lies inside it.
pub trait TriggerVolume {
    /// Whether `point` lies inside the volume.
    fn contains(&self, point: Vec3) -> bool;

    /// Axis-aligned bounds enclosing the volume.
    fn bounds(&self) -> Bounds;
}

impl TriggerVolume for Bounds {
    fn contains(&self, point: Vec3) -> bool {
        Bounds::contains(self, point)
    }

    fn bounds(&self) -> Bounds {
        *self
    }
}

/// Edge reported when tracked presence changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    Entered,
    Exited,
}

/// Turns per-frame "is inside" samples into enter/exit edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceTracker {
    inside: bool,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's sample. Returns an edge only when presence flips.
    pub fn sample(&mut self, inside: bool) -> Option<TriggerEdge> {
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            TriggerEdge::Entered
        } else {
            TriggerEdge::Exited
        })
    }

    /// Sample `point` against `volume`.
    pub fn sample_point(&mut self, volume: &dyn TriggerVolume, point: Vec3) -> Option<TriggerEdge> {
        self.sample(volume.contains(point))
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Forget presence without reporting an edge (level restart).
    pub fn clear(&mut self) {
        self.inside = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_is_inclusive() {
        let b = Bounds::new(Vec3::ZERO, Vec3::splat(1.0));
        assert!(b.contains(Vec3::new(1.0, 0.0, -1.0)));
        assert!(!b.contains(Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn bounds_from_min_max() {
        let b = Bounds::from_min_max(Vec3::new(-2.0, 0.0, -4.0), Vec3::new(2.0, 2.0, 4.0));
        assert_eq!(b.center, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(b.half_extents, Vec3::new(2.0, 1.0, 4.0));
        assert_eq!(b.min(), Vec3::new(-2.0, 0.0, -4.0));
    }

    #[test]
    fn presence_tracker_reports_edges_once() {
        let mut p = PresenceTracker::new();
        assert_eq!(p.sample(false), None);
        assert_eq!(p.sample(true), Some(TriggerEdge::Entered));
        assert_eq!(p.sample(true), None);
        assert_eq!(p.sample(false), Some(TriggerEdge::Exited));
        assert!(!p.is_inside());
    }

    #[test]
    fn presence_tracker_samples_volume() {
        let volume = Bounds::new(Vec3::ZERO, Vec3::splat(2.0));
        let mut p = PresenceTracker::new();
        assert_eq!(p.sample_point(&volume, Vec3::new(0.5, 0.0, 0.5)), Some(TriggerEdge::Entered));
        p.clear();
        assert!(!p.is_inside());
    }
}
