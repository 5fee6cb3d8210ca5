//! Player entity in the ECS world and the actor lookup the hazard uses.

use engine_core::{Player, Quat, Transform, Velocity, Vec3};
use hecs::{Entity, World};
use ichor::{ActorProvider, ActorSnapshot};

/// Spawn the player entity at `position`, facing -Z.
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world.spawn((Transform::from_position(position), Velocity::default(), Player))
}

/// Set the player's velocity and turn them to face along it.
pub fn steer_player(world: &mut World, player: Entity, velocity: Vec3) {
    if let Ok(mut v) = world.get::<&mut Velocity>(player) {
        v.linear = velocity;
    }
    let flat = Vec3::new(velocity.x, 0.0, velocity.z).normalize_or_zero();
    if flat != Vec3::ZERO {
        if let Ok(mut t) = world.get::<&mut Transform>(player) {
            t.rotation = Quat::from_rotation_arc(-Vec3::Z, flat);
        }
    }
}

/// Integrate every moving entity.
pub fn move_entities(world: &mut World, dt: f32) {
    for (_, (transform, velocity)) in world.query_mut::<(&mut Transform, &Velocity)>() {
        transform.translate(velocity.linear * dt);
    }
}

/// Actor lookup backed by the ECS world. Yields `None` once the player
/// entity has been despawned.
pub struct WorldActors<'w> {
    world: &'w World,
    player: Entity,
}

impl<'w> WorldActors<'w> {
    pub fn new(world: &'w World, player: Entity) -> Self {
        Self { world, player }
    }
}

impl ActorProvider for WorldActors<'_> {
    fn current_actor(&self) -> Option<ActorSnapshot> {
        let transform = self.world.get::<&Transform>(self.player).ok()?;
        let velocity = self
            .world
            .get::<&Velocity>(self.player)
            .map(|v| v.linear)
            .unwrap_or(Vec3::ZERO);
        Some(ActorSnapshot::new(transform.position, velocity, transform.forward()))
    }
}
