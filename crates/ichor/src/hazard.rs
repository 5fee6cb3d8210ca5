//! Ichor pool state machine.
//!
//! The player wading into the pool starts a short fuse; arms then rise
//! around them and the ichor starts to bubble harder and harder. If the
//! player is still inside when the kill timer runs out, the pull-under
//! sequence starts and only leaving the volume stops it.
//!
//! Each state has enter / update / exit hooks dispatched by `match`. All
//! state changes go through [`HazardController::transition_to`], which runs
//! the old state's exit hook before the new state's enter hook.

use engine_core::{at_height, Bounds, Stopwatch, TriggerVolume, Vec3};

use crate::actor::{ActorProvider, ActorSnapshot};
use crate::arm::{ArmState, HazardArm};
use crate::config::HazardConfig;
use crate::fx::{AnimParam, EffectCommand, FxCommand, PULL_UNDER_CLIP};
use crate::pool::ArmPool;
use crate::presence::PlayerPresence;

// ── States ──────────────────────────────────────────────────────────────

/// Escalation stage of the hazard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HazardPoolState {
    /// Nobody inside; arms at rest.
    #[default]
    Inactive,
    /// Player just entered; counting down to the first arms.
    SpawningArms,
    /// Arms are up and the kill timer is running.
    BubblingHazard,
    /// Kill sequence. Only leaving the volume ends it.
    PullingUnder,
    /// Player left; waiting for the arms to settle.
    Deactivating,
}

/// Collaborators borrowed for the duration of a single call.
#[derive(Clone, Copy)]
pub struct HazardEnv<'a> {
    pub actors: &'a dyn ActorProvider,
    pub volume: &'a dyn TriggerVolume,
}

impl<'a> HazardEnv<'a> {
    pub fn new(actors: &'a dyn ActorProvider, volume: &'a dyn TriggerVolume) -> Self {
        Self { actors, volume }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct HazardTimers {
    kill: Stopwatch,
    spawn_arms: Stopwatch,
    pull_under_emerge: Stopwatch,
}

// ── Controller ──────────────────────────────────────────────────────────

pub struct HazardController<A: HazardArm> {
    config: HazardConfig,
    state: HazardPoolState,
    timers: HazardTimers,
    /// Kill time bubbling resumes from (jump-cheese carry-over), consumed on entry.
    kill_resume: f32,
    presence: PlayerPresence,
    pool: ArmPool<A>,
    /// Volume bounds captured when arms start spawning.
    bounds: Option<Bounds>,
    emission_rate: f32,
    bubbles_active: bool,
    emerged_flagged: bool,
    warned_empty_pool: bool,
    commands: Vec<FxCommand>,
}

impl<A: HazardArm> HazardController<A> {
    /// Create a controller whose pool is filled with `make_arm(index)`.
    pub fn new(config: HazardConfig, make_arm: impl FnMut(usize) -> A) -> Self {
        let pool = ArmPool::from_config(&config, make_arm);
        if pool.is_empty() {
            log::warn!("Ichor hazard created with an empty arm pool");
        }
        Self {
            emission_rate: config.emission_baseline,
            config,
            state: HazardPoolState::Inactive,
            timers: HazardTimers::default(),
            kill_resume: 0.0,
            presence: PlayerPresence::new(),
            pool,
            bounds: None,
            bubbles_active: false,
            emerged_flagged: false,
            warned_empty_pool: false,
            commands: Vec::new(),
        }
    }

    // ── External events ─────────────────────────────────────────────────

    /// The player crossed into the volume.
    pub fn on_player_enter(&mut self, env: &HazardEnv) {
        self.kill_resume = self
            .presence
            .enter(self.config.jump_cheese_threshold, self.config.jump_cheese_penalty);
        self.timers.kill.set(self.kill_resume);
        if self.kill_resume > 0.0 {
            log::debug!("Quick re-entry: kill timer resumes at {:.2}s", self.kill_resume);
        }
        self.transition_to(HazardPoolState::SpawningArms, env);
    }

    /// The player left the volume. Ignored while no actor exists.
    pub fn on_player_exit(&mut self, env: &HazardEnv) {
        if env.actors.current_actor().is_none() {
            log::debug!("Ignoring exit from ichor pool: no current actor");
            return;
        }
        self.presence.exit();
        self.transition_to(HazardPoolState::Deactivating, env);
    }

    /// Push-style grab notification for hosts that do not poll arms.
    pub fn notify_arm_grabbed(&mut self, index: usize) -> bool {
        self.pool.handle_grab(index, &mut self.commands)
    }

    /// Hard reset (level restart): every arm off, flags cleared, back to
    /// `Inactive` without waiting for arms to settle.
    pub fn reset_object(&mut self) {
        log::info!("Resetting ichor hazard from {:?}", self.state);
        self.pool.deactivate_all_arms(&mut self.commands);
        self.set_bubbles(None);
        for param in AnimParam::ALL {
            self.set_anim(param, false);
        }

        self.state = HazardPoolState::Inactive;
        self.timers = HazardTimers::default();
        self.kill_resume = 0.0;
        self.presence = PlayerPresence::new();
        self.bounds = None;
        self.emission_rate = self.config.emission_baseline;
        self.emerged_flagged = false;
        self.warned_empty_pool = false;
    }

    // ── Tick ────────────────────────────────────────────────────────────

    /// Advance the hazard by one frame.
    pub fn update(&mut self, dt: f32, env: &HazardEnv) {
        let dt = dt.max(0.0);
        self.presence.tick(dt);

        let actor = env.actors.current_actor();
        self.pool.update(dt, actor.map(|a| a.position), &mut self.commands);
        self.on_update(dt, actor.as_ref(), env);
    }

    /// Drain the commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<FxCommand> {
        std::mem::take(&mut self.commands)
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Move to `next`, running exit then enter hooks. No-op if already there.
    pub fn transition_to(&mut self, next: HazardPoolState, env: &HazardEnv) {
        if next == self.state {
            return;
        }
        let previous = self.state;
        self.on_exit(previous);
        self.state = next;
        log::debug!("Ichor hazard {:?} -> {:?}", previous, next);
        self.on_enter(next, env);
    }

    fn on_enter(&mut self, state: HazardPoolState, env: &HazardEnv) {
        match state {
            HazardPoolState::Inactive => {}
            HazardPoolState::SpawningArms => {
                self.bounds = Some(env.volume.bounds());
                self.timers.spawn_arms.reset();
            }
            HazardPoolState::BubblingHazard => {
                let actor = env.actors.current_actor();
                let at = self.surface_anchor(actor.as_ref());
                self.set_bubbles(Some(at));
                self.emission_rate = self.config.emission_baseline;
                self.commands.push(FxCommand::EmissionRate(self.emission_rate));
                self.timers.kill.set(self.kill_resume);
                self.kill_resume = 0.0;
                self.set_anim(AnimParam::Bubbling, true);
            }
            HazardPoolState::PullingUnder => {
                let actor = env.actors.current_actor();
                let at = self.surface_anchor(actor.as_ref());
                self.pool.activate_pull_under(at, &mut self.commands);
                self.set_anim(AnimParam::PullingUnder, true);
                self.commands.push(FxCommand::CrossFade {
                    clip: PULL_UNDER_CLIP,
                    blend: self.config.pull_under_blend,
                });
                if actor.is_some() {
                    self.commands.push(FxCommand::PulledUnderReaction);
                } else {
                    log::warn!("Pull-under started with no actor to react");
                }
                self.timers.pull_under_emerge.reset();
                self.emerged_flagged = false;
            }
            HazardPoolState::Deactivating => {
                self.pool.submerge_all_arms(&mut self.commands);
                self.set_bubbles(None);
                self.set_anim(AnimParam::PullingUnder, false);
                self.set_anim(AnimParam::PullUnderEmerged, false);
                self.warned_empty_pool = false;
            }
        }
    }

    fn on_update(&mut self, dt: f32, actor: Option<&ActorSnapshot>, env: &HazardEnv) {
        match self.state {
            HazardPoolState::Inactive => {}
            HazardPoolState::SpawningArms => {
                self.timers.spawn_arms.tick(dt);
                if self.timers.spawn_arms.reached(self.config.spawn_arms_timer_length) {
                    self.bounds.get_or_insert_with(|| env.volume.bounds());
                    match actor {
                        Some(actor) => {
                            self.pool.spawn_arms(self.config.arms_to_spawn, actor, env.volume);
                        }
                        None => log::warn!("No actor to spawn ichor arms around"),
                    }
                    self.transition_to(HazardPoolState::BubblingHazard, env);
                }
            }
            HazardPoolState::BubblingHazard => {
                self.timers.kill.tick(dt);
                self.emission_rate += self.config.emission_increase_rate * dt;
                self.commands.push(FxCommand::EmissionRate(self.emission_rate));
                if let Some(actor) = actor {
                    let at = at_height(actor.position, self.config.spawn_height);
                    self.commands.push(FxCommand::Bubbles(EffectCommand::MoveTo(at)));
                }
                if self.timers.kill.reached(self.config.kill_timer_length) {
                    self.transition_to(HazardPoolState::PullingUnder, env);
                }
            }
            HazardPoolState::PullingUnder => {
                if let Some(actor) = actor {
                    let at = at_height(actor.position, self.config.spawn_height);
                    self.pool.move_distortion(at, &mut self.commands);
                }
                self.timers.pull_under_emerge.tick(dt);
                if !self.emerged_flagged
                    && self.timers.pull_under_emerge.reached(self.config.pull_under_emerge_duration)
                {
                    self.emerged_flagged = true;
                    self.set_anim(AnimParam::PullUnderEmerged, true);
                }
            }
            HazardPoolState::Deactivating => match self.pool.first_arm_state() {
                Some(ArmState::Idle) => self.transition_to(HazardPoolState::Inactive, env),
                Some(_) => {}
                None => {
                    if !self.warned_empty_pool {
                        self.warned_empty_pool = true;
                        log::warn!("Ichor hazard cannot finish deactivating: arm pool is empty");
                    }
                }
            },
        }
    }

    fn on_exit(&mut self, state: HazardPoolState) {
        if state == HazardPoolState::BubblingHazard {
            self.set_bubbles(None);
            self.set_anim(AnimParam::Bubbling, false);
        }
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    /// Point on the ichor surface under the actor, or under the volume centre.
    fn surface_anchor(&self, actor: Option<&ActorSnapshot>) -> Vec3 {
        let xz = actor
            .map(|a| a.position)
            .or(self.bounds.map(|b| b.center))
            .unwrap_or(Vec3::ZERO);
        at_height(xz, self.config.spawn_height)
    }

    /// `Some(at)` switches the bubble effect on there; `None` switches it off.
    fn set_bubbles(&mut self, at: Option<Vec3>) {
        match at {
            Some(at) => {
                self.bubbles_active = true;
                self.commands.push(FxCommand::Bubbles(EffectCommand::Activate { at }));
            }
            None if self.bubbles_active => {
                self.bubbles_active = false;
                self.commands.push(FxCommand::Bubbles(EffectCommand::Deactivate));
            }
            None => {}
        }
    }

    fn set_anim(&mut self, param: AnimParam, value: bool) {
        self.commands.push(FxCommand::SetAnimBool { param, value });
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn state(&self) -> HazardPoolState {
        self.state
    }

    pub fn kill_timer(&self) -> f32 {
        self.timers.kill.elapsed()
    }

    pub fn spawn_arms_timer(&self) -> f32 {
        self.timers.spawn_arms.elapsed()
    }

    pub fn pull_under_emerge_timer(&self) -> f32 {
        self.timers.pull_under_emerge.elapsed()
    }

    pub fn emission_rate(&self) -> f32 {
        self.emission_rate
    }

    pub fn presence(&self) -> &PlayerPresence {
        &self.presence
    }

    pub fn bounds_snapshot(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn pool(&self) -> &ArmPool<A> {
        &self.pool
    }

    /// Mutable access to the pooled arms, for hosts that drive arm visuals.
    pub fn pool_mut(&mut self) -> &mut ArmPool<A> {
        &mut self.pool
    }

    pub fn config(&self) -> &HazardConfig {
        &self.config
    }
}
