//! Box-shaped sensor collider acting as a hazard trigger volume.

use engine_core::{Bounds, TriggerVolume, Vec3};
use rapier3d::parry::query::PointQuery;
use rapier3d::prelude::*;

use crate::collision::CollisionGroup;

/// A sensor cuboid, optionally yawed, answering point containment queries.
///
/// The collider is never inserted into a simulation; only its shape and
/// pose are used.
pub struct SensorVolume {
    collider: Collider,
}

impl SensorVolume {
    /// Axis-aligned sensor centred at `center` with the given half extents.
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        Self::yawed_cuboid(center, half_extents, 0.0)
    }

    /// Sensor rotated `yaw` radians around Y.
    pub fn yawed_cuboid(center: Vec3, half_extents: Vec3, yaw: f32) -> Self {
        let he = half_extents.abs();
        let collider = ColliderBuilder::cuboid(he.x, he.y, he.z)
            .sensor(true)
            .translation(vector![center.x, center.y, center.z])
            .rotation(vector![0.0, yaw, 0.0])
            .collision_groups(CollisionGroup::trigger_interaction())
            .build();
        log::debug!("Sensor volume at {:?} half extents {:?} yaw {}", center, he, yaw);
        Self { collider }
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }
}

impl TriggerVolume for SensorVolume {
    fn contains(&self, point: Vec3) -> bool {
        self.collider
            .shape()
            .contains_point(self.collider.position(), &point![point.x, point.y, point.z])
    }

    fn bounds(&self) -> Bounds {
        let aabb = self.collider.compute_aabb();
        Bounds::from_min_max(
            Vec3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z),
            Vec3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z),
        )
    }
}
