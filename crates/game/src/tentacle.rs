//! Kinematic stand-in for the animated ichor arm.
//!
//! Rises for a fixed time, then grabs the player if they are within reach.
//! Submerging counts down and the arm switches itself off once under.

use engine_core::Vec3;
use ichor::{ArmState, HazardArm};

const EMERGE_TIME: f32 = 0.6;
const SUBMERGE_TIME: f32 = 0.8;
const FORCED_SUBMERGE_TIME: f32 = 0.3;
/// Horizontal distance at which a fully risen arm catches the player.
const GRAB_REACH: f32 = 2.5;

#[derive(Debug)]
pub struct Tentacle {
    pub index: usize,
    pub position: Vec3,
    active: bool,
    state: ArmState,
    timer: f32,
    grab_signal: bool,
}

impl Tentacle {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            position: Vec3::ZERO,
            active: false,
            state: ArmState::Idle,
            timer: 0.0,
            grab_signal: false,
        }
    }

    fn in_reach(&self, target: Vec3) -> bool {
        let d = Vec3::new(target.x - self.position.x, 0.0, target.z - self.position.z);
        d.length() <= GRAB_REACH
    }
}

impl HazardArm for Tentacle {
    fn emerge(&mut self) {
        self.state = ArmState::Emerging;
        self.timer = 0.0;
        self.grab_signal = false;
    }

    fn submerge(&mut self, forced: bool) {
        self.state = ArmState::Submerging;
        self.timer = if forced { FORCED_SUBMERGE_TIME } else { SUBMERGE_TIME };
    }

    fn state(&self) -> ArmState {
        self.state
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.state = ArmState::Idle;
            self.timer = 0.0;
            self.grab_signal = false;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn take_grab_signal(&mut self) -> bool {
        std::mem::take(&mut self.grab_signal)
    }

    fn tick(&mut self, dt: f32, target: Option<Vec3>) {
        match self.state {
            ArmState::Emerging => {
                self.timer += dt;
                if self.timer >= EMERGE_TIME && target.is_some_and(|t| self.in_reach(t)) {
                    log::debug!("Arm {} grabbed the player", self.index);
                    self.state = ArmState::Grabbed;
                    self.grab_signal = true;
                }
            }
            ArmState::Submerging => {
                self.timer -= dt;
                if self.timer <= 0.0 {
                    self.set_active(false);
                }
            }
            ArmState::Grabbed | ArmState::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grabs_only_after_emerging_and_in_reach() {
        let mut arm = Tentacle::new(0);
        arm.set_active(true);
        arm.emerge();
        arm.tick(0.25, Some(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!arm.take_grab_signal());
        arm.tick(0.5, Some(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(arm.state(), ArmState::Emerging);
        arm.tick(0.25, Some(Vec3::new(1.0, 3.0, 1.0)));
        assert_eq!(arm.state(), ArmState::Grabbed);
        assert!(arm.take_grab_signal());
        assert!(!arm.take_grab_signal());
    }

    #[test]
    fn forced_submerge_is_quicker() {
        let mut forced = Tentacle::new(0);
        let mut slow = Tentacle::new(1);
        for arm in [&mut forced, &mut slow] {
            arm.set_active(true);
            arm.emerge();
        }
        forced.submerge(true);
        slow.submerge(false);
        forced.tick(0.5, None);
        slow.tick(0.5, None);
        assert_eq!(forced.state(), ArmState::Idle);
        assert!(!forced.is_active());
        assert_eq!(slow.state(), ArmState::Submerging);
    }
}
