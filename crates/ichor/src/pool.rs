//! Fixed-capacity pool of hazard arms with round-robin reuse.
//!
//! Arms are never created or dropped after construction. The cursor always
//! points at the slot that was spawned longest ago, so a busy pool recycles
//! its oldest arm first.

use std::f32::consts::TAU;

use engine_core::{at_height, Quat, Scheduler, TaskId, TriggerVolume, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actor::ActorSnapshot;
use crate::arm::{ArmState, HazardArm};
use crate::config::HazardConfig;
use crate::fx::{ArmGroupCommand, EffectCommand, FxCommand};

/// How far ahead along the actor's velocity the spawn ring is centred.
pub const SPAWN_LEAD_TIME: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolTask {
    /// Non-forced submerge of the arm that grabbed the player.
    SubmergeArm(usize),
}

struct ArmSlot<A> {
    arm: A,
    /// One-shot "on grab" reaction registered at spawn.
    grab_reaction: bool,
    pending_submerge: Option<TaskId>,
}

pub struct ArmPool<A: HazardArm> {
    slots: Vec<ArmSlot<A>>,
    cursor: usize,
    scheduler: Scheduler<PoolTask>,
    submerge_on_grab_delay: f32,
    inner_radius: f32,
    outer_radius: f32,
    spawn_height: f32,
    rng: StdRng,
    // ── Pull-under arm group ──
    pulling_under: bool,
    distortion_active: bool,
}

impl<A: HazardArm> ArmPool<A> {
    /// Build `config.arm_pool_capacity` arms with `make_arm(index)`.
    pub fn from_config(config: &HazardConfig, mut make_arm: impl FnMut(usize) -> A) -> Self {
        let slots = (0..config.arm_pool_capacity)
            .map(|i| ArmSlot {
                arm: make_arm(i),
                grab_reaction: false,
                pending_submerge: None,
            })
            .collect();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            slots,
            cursor: 0,
            scheduler: Scheduler::new(),
            submerge_on_grab_delay: config.submerge_on_grab_delay,
            inner_radius: config.inner_spawn_radius,
            outer_radius: config.outer_spawn_radius,
            spawn_height: config.spawn_height,
            rng,
            pulling_under: false,
            distortion_active: false,
        }
    }

    // ── Spawning ────────────────────────────────────────────────────────

    /// Raise `count` arms in a ring around where the actor is heading.
    /// Returns the pool indices that were actually spawned.
    pub fn spawn_arms(&mut self, count: usize, actor: &ActorSnapshot, volume: &dyn TriggerVolume) -> Vec<usize> {
        let pivot = actor.predicted_position(SPAWN_LEAD_TIME);
        let radius = self.roll_radius();
        let base_offset = actor.flat_forward() * radius;

        let spawned: Vec<usize> = spawn_ring(pivot, base_offset, count, self.spawn_height)
            .into_iter()
            .filter_map(|position| self.spawn_at(position, volume))
            .collect();
        log::debug!("Spawned {}/{} arms around {:?} (radius {:.2})", spawned.len(), count, pivot, radius);
        spawned
    }

    /// Activate the arm under the cursor at `position`.
    ///
    /// Returns `None` without touching the pool when the position, dropped
    /// to the volume's centre height, falls outside `volume`.
    pub fn spawn_at(&mut self, position: Vec3, volume: &dyn TriggerVolume) -> Option<usize> {
        let centre_y = volume.bounds().center.y;
        if !volume.contains(at_height(position, centre_y)) {
            return None;
        }
        if self.slots.is_empty() {
            log::warn!("Cannot spawn arm at {:?}: arm pool is empty", position);
            return None;
        }

        let index = self.cursor;
        self.cancel_pending_submerge(index);
        let slot = &mut self.slots[index];
        slot.arm.set_position(position);
        slot.arm.set_active(true);
        slot.arm.emerge();
        slot.grab_reaction = true;

        self.cursor = (self.cursor + 1) % self.slots.len();
        Some(index)
    }

    fn roll_radius(&mut self) -> f32 {
        if self.outer_radius > self.inner_radius {
            self.rng.gen_range(self.inner_radius..=self.outer_radius)
        } else {
            self.inner_radius
        }
    }

    // ── Per-frame ───────────────────────────────────────────────────────

    /// Tick active arms, fire due deferred submerges and react to grabs.
    pub fn update(&mut self, dt: f32, target: Option<Vec3>, out: &mut Vec<FxCommand>) {
        for slot in self.slots.iter_mut().filter(|s| s.arm.is_active()) {
            slot.arm.tick(dt, target);
        }

        for task in self.scheduler.advance(dt) {
            match task {
                PoolTask::SubmergeArm(index) => {
                    if let Some(slot) = self.slots.get_mut(index) {
                        slot.pending_submerge = None;
                        if slot.arm.is_active() {
                            slot.arm.submerge(false);
                        }
                    }
                }
            }
        }

        for index in 0..self.slots.len() {
            if self.slots[index].arm.take_grab_signal() {
                self.handle_grab(index, out);
            }
        }
    }

    /// Run the one-shot grab reaction for arm `index`.
    ///
    /// Pull-under arms sink immediately; the grabbing arm sinks after the
    /// configured delay. Returns false if no reaction was registered.
    pub fn handle_grab(&mut self, index: usize, out: &mut Vec<FxCommand>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.grab_reaction => slot.grab_reaction = false,
            Some(_) => {
                log::debug!("Ignoring grab from arm {} with no registered reaction", index);
                return false;
            }
            None => {
                log::warn!("Grab signal from unknown arm {}", index);
                return false;
            }
        }

        self.force_submerge_pull_under(out);
        self.cancel_pending_submerge(index);
        let id = self
            .scheduler
            .schedule(self.submerge_on_grab_delay, PoolTask::SubmergeArm(index));
        self.slots[index].pending_submerge = Some(id);
        true
    }

    fn cancel_pending_submerge(&mut self, index: usize) {
        if let Some(id) = self.slots[index].pending_submerge.take() {
            self.scheduler.cancel(id);
        }
    }

    // ── Pull-under group ────────────────────────────────────────────────

    /// Raise the pull-under arms and their distortion at `at`.
    pub fn activate_pull_under(&mut self, at: Vec3, out: &mut Vec<FxCommand>) {
        self.pulling_under = true;
        self.distortion_active = true;
        out.push(FxCommand::PullUnderArms(ArmGroupCommand::Activate));
        out.push(FxCommand::Distortion(EffectCommand::Activate { at }));
    }

    pub fn move_distortion(&mut self, at: Vec3, out: &mut Vec<FxCommand>) {
        if self.distortion_active {
            out.push(FxCommand::Distortion(EffectCommand::MoveTo(at)));
        }
    }

    pub fn force_submerge_pull_under(&mut self, out: &mut Vec<FxCommand>) {
        self.pulling_under = false;
        out.push(FxCommand::PullUnderArms(ArmGroupCommand::Submerge { forced: true }));
        if self.distortion_active {
            self.distortion_active = false;
            out.push(FxCommand::Distortion(EffectCommand::Deactivate));
        }
    }

    // ── Pool-wide ───────────────────────────────────────────────────────

    /// Force every arm under, dropping all grab reactions and deferred submerges.
    pub fn submerge_all_arms(&mut self, out: &mut Vec<FxCommand>) {
        self.force_submerge_pull_under(out);
        for slot in &mut self.slots {
            if slot.arm.is_active() {
                slot.arm.submerge(true);
            }
            slot.grab_reaction = false;
            slot.pending_submerge = None;
        }
        self.scheduler.clear();
    }

    /// Switch every arm off immediately (hard reset).
    pub fn deactivate_all_arms(&mut self, out: &mut Vec<FxCommand>) {
        for slot in &mut self.slots {
            slot.arm.set_active(false);
            slot.grab_reaction = false;
            slot.pending_submerge = None;
        }
        self.scheduler.clear();

        self.pulling_under = false;
        out.push(FxCommand::PullUnderArms(ArmGroupCommand::Deactivate));
        if self.distortion_active {
            self.distortion_active = false;
            out.push(FxCommand::Distortion(EffectCommand::Deactivate));
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.arm.is_active()).count()
    }

    /// State of slot 0, used to detect that the pool has fully settled.
    pub fn first_arm_state(&self) -> Option<ArmState> {
        self.slots.first().map(|s| s.arm.state())
    }

    pub fn arm(&self, index: usize) -> Option<&A> {
        self.slots.get(index).map(|s| &s.arm)
    }

    pub fn arm_mut(&mut self, index: usize) -> Option<&mut A> {
        self.slots.get_mut(index).map(|s| &mut s.arm)
    }

    pub fn arms(&self) -> impl Iterator<Item = &A> {
        self.slots.iter().map(|s| &s.arm)
    }

    pub fn has_grab_reaction(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.grab_reaction)
    }

    pub fn pending_submerges(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn is_pulling_under(&self) -> bool {
        self.pulling_under
    }

    pub fn spawn_height(&self) -> f32 {
        self.spawn_height
    }
}

/// Positions for `count` arms spread evenly around `pivot`.
///
/// Arm `i` sits at `base_offset` rotated `(i + 0.5) * 360/count` degrees
/// about Y, so no arm lands directly on the base direction. Y is pinned to
/// `height`.
pub fn spawn_ring(pivot: Vec3, base_offset: Vec3, count: usize, height: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f32;
    (0..count)
        .map(|i| {
            let angle = step * (i as f32 + 0.5);
            at_height(pivot + Quat::from_rotation_y(angle) * base_offset, height)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockArm;
    use engine_core::Bounds;

    fn config(capacity: usize) -> HazardConfig {
        HazardConfig {
            arm_pool_capacity: capacity,
            inner_spawn_radius: 2.0,
            outer_spawn_radius: 2.0,
            submerge_on_grab_delay: 0.75,
            seed: Some(11),
            ..HazardConfig::default()
        }
    }

    fn pool(capacity: usize) -> ArmPool<MockArm> {
        ArmPool::from_config(&config(capacity), MockArm::new)
    }

    fn big_bounds() -> Bounds {
        Bounds::new(Vec3::ZERO, Vec3::splat(50.0))
    }

    #[test]
    fn cursor_counts_successful_spawns() {
        let mut p = pool(5);
        for n in 1..5 {
            assert_eq!(p.spawn_at(Vec3::new(n as f32, 0.0, 0.0), &big_bounds()), Some(n - 1));
            assert_eq!(p.arm(n - 1).unwrap().index, n - 1);
            assert_eq!(p.cursor(), n);
        }
        p.spawn_at(Vec3::ZERO, &big_bounds());
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn wraparound_recycles_oldest_arm() {
        let mut p = pool(3);
        for _ in 0..3 {
            p.spawn_at(Vec3::ZERO, &big_bounds());
        }
        assert_eq!(p.spawn_at(Vec3::new(4.0, 0.0, 4.0), &big_bounds()), Some(0));
        let arm = p.arm(0).unwrap();
        assert_eq!(arm.position, Vec3::new(4.0, 0.0, 4.0));
        assert_eq!(arm.emerges, 2);
    }

    #[test]
    fn rejected_spawn_leaves_pool_untouched() {
        let mut p = pool(4);
        let small = Bounds::new(Vec3::ZERO, Vec3::splat(1.0));
        assert_eq!(p.spawn_at(Vec3::new(5.0, 0.0, 0.0), &small), None);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.active_count(), 0);
        assert!(!p.has_grab_reaction(0));
    }

    /// Upright cylinder around the origin; its bounds are the enclosing box.
    struct Cylinder {
        radius: f32,
        half_height: f32,
    }

    impl TriggerVolume for Cylinder {
        fn contains(&self, point: Vec3) -> bool {
            point.y.abs() <= self.half_height && Vec3::new(point.x, 0.0, point.z).length() <= self.radius
        }

        fn bounds(&self) -> Bounds {
            Bounds::new(Vec3::ZERO, Vec3::new(self.radius, self.half_height, self.radius))
        }
    }

    #[test]
    fn containment_asks_the_volume_not_its_bounds() {
        let mut p = pool(2);
        let pool_shape = Cylinder { radius: 4.0, half_height: 1.0 };
        let corner = Vec3::new(3.5, 0.0, 3.5);
        assert!(pool_shape.bounds().contains(corner));
        assert_eq!(p.spawn_at(corner, &pool_shape), None);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.active_count(), 0);
        assert_eq!(p.spawn_at(Vec3::new(3.5, 0.0, 0.0), &pool_shape), Some(0));
    }

    #[test]
    fn containment_uses_volume_centre_height() {
        let mut p = pool(2);
        // thin slab centred at y = 10; the arm sits on the surface at y = 0
        let slab = Bounds::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(3.0, 0.5, 3.0));
        assert_eq!(p.spawn_at(Vec3::new(1.0, 0.0, 1.0), &slab), Some(0));
        assert_eq!(p.arm(0).unwrap().position.y, 0.0);
    }

    #[test]
    fn empty_pool_never_spawns() {
        let mut p = pool(0);
        assert_eq!(p.spawn_at(Vec3::ZERO, &big_bounds()), None);
        assert_eq!(p.first_arm_state(), None);
        let actor = ActorSnapshot::new(Vec3::ZERO, Vec3::ZERO, -Vec3::Z);
        assert!(p.spawn_arms(4, &actor, &big_bounds()).is_empty());
    }

    #[test]
    fn ring_is_evenly_spaced_with_half_step_offset() {
        let pivot = Vec3::new(3.0, 7.0, -2.0);
        let base = Vec3::new(0.0, 0.0, -2.0);
        for count in [1usize, 3, 4, 7] {
            let ring = spawn_ring(pivot, base, count, 0.5);
            assert_eq!(ring.len(), count);
            let step = 360.0 / count as f32;
            for (i, p) in ring.iter().enumerate() {
                assert_eq!(p.y, 0.5);
                let rel = *p - pivot;
                let base_angle = base.z.atan2(base.x);
                let angle = rel.z.atan2(rel.x);
                // rotation about +Y runs clockwise in the XZ atan2 frame
                let turned = (base_angle - angle).to_degrees().rem_euclid(360.0);
                let expected = (step * 0.5 + step * i as f32).rem_euclid(360.0);
                let diff = (turned - expected).abs();
                assert!(diff < 1e-2 || (360.0 - diff) < 1e-2, "count {} arm {}: {} vs {}", count, i, turned, expected);
                assert!((Vec3::new(rel.x, 0.0, rel.z).length() - 2.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn spawn_arms_leads_the_actor() {
        let mut p = pool(8);
        let actor = ActorSnapshot::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(4.0, 0.0, 0.0), -Vec3::Z);
        let spawned = p.spawn_arms(4, &actor, &big_bounds());
        assert_eq!(spawned, vec![0, 1, 2, 3]);
        let centroid = p.arms().take(4).fold(Vec3::ZERO, |acc, a| acc + a.position) / 4.0;
        assert!((centroid - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-4);
        assert!(p.arms().take(4).all(|a| a.active && a.state == ArmState::Emerging));
    }

    #[test]
    fn spawn_arms_skips_positions_outside_volume() {
        let mut p = pool(8);
        let actor = ActorSnapshot::new(Vec3::ZERO, Vec3::ZERO, -Vec3::Z);
        // only the half of the ring with x > 0 fits
        let half = Bounds::from_min_max(Vec3::new(0.0, -1.0, -5.0), Vec3::new(5.0, 1.0, 5.0));
        let spawned = p.spawn_arms(4, &actor, &half);
        assert_eq!(spawned.len(), 2);
        assert_eq!(p.cursor(), 2);
        assert_eq!(p.active_count(), 2);
    }

    #[test]
    fn grab_submerges_pull_under_then_arm_after_delay() {
        let mut p = pool(4);
        let mut out = Vec::new();
        p.activate_pull_under(Vec3::ZERO, &mut out);
        p.spawn_at(Vec3::ZERO, &big_bounds());
        p.arm_mut(0).unwrap().grab();
        out.clear();

        p.update(0.25, None, &mut out);
        assert_eq!(out[0], FxCommand::PullUnderArms(ArmGroupCommand::Submerge { forced: true }));
        assert!(out.contains(&FxCommand::Distortion(EffectCommand::Deactivate)));
        assert!(!p.is_pulling_under());
        assert!(p.arm(0).unwrap().submerges.is_empty());

        p.update(0.25, None, &mut out);
        p.update(0.25, None, &mut out);
        assert!(p.arm(0).unwrap().submerges.is_empty());
        p.update(0.25, None, &mut out);
        assert_eq!(p.arm(0).unwrap().submerges, vec![false]);
    }

    #[test]
    fn grab_reaction_is_one_shot() {
        let mut p = pool(2);
        let mut out = Vec::new();
        p.spawn_at(Vec3::ZERO, &big_bounds());
        assert!(p.handle_grab(0, &mut out));
        assert!(!p.handle_grab(0, &mut out));
        assert!(!p.handle_grab(1, &mut out));
        assert!(!p.handle_grab(9, &mut out));
        assert_eq!(p.pending_submerges(), 1);
    }

    #[test]
    fn deactivate_cancels_pending_submerge() {
        let mut p = pool(2);
        let mut out = Vec::new();
        p.spawn_at(Vec3::ZERO, &big_bounds());
        p.handle_grab(0, &mut out);
        p.deactivate_all_arms(&mut out);
        assert_eq!(p.pending_submerges(), 0);
        assert_eq!(p.active_count(), 0);
        p.update(1.0, None, &mut out);
        assert!(p.arm(0).unwrap().submerges.is_empty());
    }

    #[test]
    fn submerge_all_forces_active_arms_and_clears_reactions() {
        let mut p = pool(3);
        let mut out = Vec::new();
        p.spawn_at(Vec3::ZERO, &big_bounds());
        p.spawn_at(Vec3::ZERO, &big_bounds());
        p.handle_grab(1, &mut out);
        out.clear();

        p.submerge_all_arms(&mut out);
        assert_eq!(out[0], FxCommand::PullUnderArms(ArmGroupCommand::Submerge { forced: true }));
        assert_eq!(p.arm(0).unwrap().submerges, vec![true]);
        assert_eq!(p.arm(1).unwrap().submerges, vec![true]);
        assert!(p.arm(2).unwrap().submerges.is_empty());
        assert!(!p.has_grab_reaction(0));
        assert_eq!(p.pending_submerges(), 0);

        p.update(1.0, None, &mut out);
        assert_eq!(p.arm(1).unwrap().submerges, vec![true]);
    }

    #[test]
    fn respawning_slot_cancels_its_stale_submerge() {
        let mut p = pool(1);
        let mut out = Vec::new();
        p.spawn_at(Vec3::ZERO, &big_bounds());
        p.handle_grab(0, &mut out);
        p.spawn_at(Vec3::new(1.0, 0.0, 0.0), &big_bounds());
        assert_eq!(p.pending_submerges(), 0);
        assert!(p.has_grab_reaction(0));
        p.update(1.0, None, &mut out);
        assert!(p.arm(0).unwrap().submerges.is_empty());
    }
}
