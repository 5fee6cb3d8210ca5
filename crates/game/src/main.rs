//! Headless ichor pool simulation.
//!
//! Drives a scripted player through a single hazard volume at a fixed
//! timestep and logs every state change and effect command the hazard
//! emits. Pass a RON config path as the first argument to override the
//! tuning (defaults to `hazard.ron` in the current directory, if present).

mod scenario;
mod tentacle;
mod world;

use anyhow::{Context, Result};
use engine_core::{PresenceTracker, Time, TriggerEdge, Vec3};
use hecs::World;
use ichor::{EffectCommand, FxCommand, HazardConfig, HazardController, HazardEnv, HazardPoolState};
use physics::SensorVolume;

use crate::tentacle::Tentacle;
use crate::world::{move_entities, spawn_player, steer_player, WorldActors};

const SIM_RATE_HZ: f32 = 60.0;
/// Extra time after the script ends to let the pool settle.
const SETTLE_SECONDS: f32 = 2.0;

fn load_config() -> Result<HazardConfig> {
    match std::env::args().nth(1) {
        Some(path) => HazardConfig::load(&path).with_context(|| format!("loading hazard config {}", path)),
        None => Ok(HazardConfig::load_or_default("hazard.ron")),
    }
}

/// Stand-in for the engine's effect/animation sinks: log what would happen.
fn apply_fx(command: &FxCommand) {
    match command {
        // per-frame noise
        FxCommand::EmissionRate(_)
        | FxCommand::Bubbles(EffectCommand::MoveTo(_))
        | FxCommand::Distortion(EffectCommand::MoveTo(_)) => log::trace!("fx {:?}", command),
        FxCommand::SetAnimBool { param, value } => log::info!("anim {} = {}", param.name(), value),
        FxCommand::CrossFade { clip, blend } => log::info!("anim cross-fade to {} over {:.2}s", clip, blend),
        FxCommand::PulledUnderReaction => log::info!("player: pulled under!"),
        other => log::info!("fx {:?}", other),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Starting ichor pool simulation: {:?}", config);

    let volume = SensorVolume::cuboid(Vec3::new(0.0, -1.0, 0.0), Vec3::new(8.0, 1.5, 8.0));
    let mut hazard = HazardController::new(config, Tentacle::new);
    let mut presence = PresenceTracker::new();

    let mut world = World::new();
    let player = spawn_player(&mut world, scenario::PLAYER_START);

    let mut time = Time::with_fixed_rate(SIM_RATE_HZ);
    let mut last_state = hazard.state();
    let mut last_leg = "";
    let mut pulled_under = false;
    let total = scenario::duration() + SETTLE_SECONDS;

    while (time.elapsed_seconds() as f32) < total {
        let elapsed = time.elapsed_seconds() as f32;
        let dt = time.step();

        let velocity = match scenario::leg_at(elapsed) {
            Some(leg) => {
                if leg.label != last_leg {
                    log::info!("[{:6.2}s] player: {}", elapsed, leg.label);
                    last_leg = leg.label;
                }
                leg.velocity
            }
            None => Vec3::ZERO,
        };
        steer_player(&mut world, player, velocity);
        move_entities(&mut world, dt);

        let actors = WorldActors::new(&world, player);
        let env = HazardEnv::new(&actors, &volume);
        if let Some(position) = ichor::ActorProvider::current_actor(&actors).map(|a| a.position) {
            match presence.sample_point(&volume, position) {
                Some(TriggerEdge::Entered) => hazard.on_player_enter(&env),
                Some(TriggerEdge::Exited) => hazard.on_player_exit(&env),
                None => {}
            }
        }
        hazard.update(dt, &env);

        for command in hazard.take_commands() {
            apply_fx(&command);
        }
        if hazard.state() != last_state {
            log::info!(
                "[{:6.2}s] hazard {:?} -> {:?} (kill timer {:.2}s, {} arms up)",
                time.elapsed_seconds(),
                last_state,
                hazard.state(),
                hazard.kill_timer(),
                hazard.pool().active_count()
            );
            pulled_under |= hazard.state() == HazardPoolState::PullingUnder;
            last_state = hazard.state();
        }
    }

    // Level restart.
    hazard.reset_object();
    presence.clear();
    for command in hazard.take_commands() {
        apply_fx(&command);
    }

    log::info!(
        "Simulation finished after {} frames; player was {}pulled under",
        time.frame_count(),
        if pulled_under { "" } else { "never " }
    );
    Ok(())
}
