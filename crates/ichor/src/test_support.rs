//! Recording doubles shared by the unit tests.

use engine_core::Vec3;

use crate::arm::{ArmState, HazardArm};

/// Arm that records every command it receives.
#[derive(Debug, Default)]
pub struct MockArm {
    pub index: usize,
    pub position: Vec3,
    pub active: bool,
    pub state: ArmState,
    pub emerges: u32,
    /// `forced` flag of each submerge call, in order.
    pub submerges: Vec<bool>,
    grab_pending: bool,
}

impl MockArm {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Simulate the arm catching the player.
    pub fn grab(&mut self) {
        self.state = ArmState::Grabbed;
        self.grab_pending = true;
    }

    /// Simulate the submerge animation finishing.
    pub fn settle(&mut self) {
        self.state = ArmState::Idle;
        self.active = false;
    }
}

impl HazardArm for MockArm {
    fn emerge(&mut self) {
        self.emerges += 1;
        self.state = ArmState::Emerging;
    }

    fn submerge(&mut self, forced: bool) {
        self.submerges.push(forced);
        self.state = ArmState::Submerging;
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
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn take_grab_signal(&mut self) -> bool {
        std::mem::take(&mut self.grab_pending)
    }
}
