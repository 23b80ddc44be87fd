//! Fixed timestep simulation tick
//!
//! The per-tick update is an explicit, ordered pipeline of stages. The order
//! is part of the contract: kinematics before the camera reads the car,
//! spawning before traffic moves, collision after everything has moved,
//! and scoring last.

use super::camera::Camera;
use super::collision::check_collisions;
use super::input::InputState;
use super::kinematics::step_player;
use super::score::update_score;
use super::spawn::update_spawns;
use super::state::{GameEvent, GamePhase, GameState, SpawnSchedule};
use super::traffic;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held controls, snapshotted once per tick
    pub controls: InputState,
    /// Restart request (one-shot; only honoured after a crash)
    pub restart: bool,
}

/// One step of the per-tick pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ReadInput,
    Kinematics,
    Camera,
    Spawn,
    Traffic,
    Collision,
    Score,
}

/// The per-tick update order
pub const PIPELINE: [Stage; 7] = [
    Stage::ReadInput,
    Stage::Kinematics,
    Stage::Camera,
    Stage::Spawn,
    Stage::Traffic,
    Stage::Collision,
    Stage::Score,
];

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ReadInput => "input",
            Stage::Kinematics => "kinematics",
            Stage::Camera => "camera",
            Stage::Spawn => "spawn",
            Stage::Traffic => "traffic",
            Stage::Collision => "collision",
            Stage::Score => "score",
        }
    }

    /// Run this stage. Every stage except input capture is a no-op after a crash.
    pub fn run(self, state: &mut GameState, input: &TickInput) {
        match self {
            Stage::ReadInput => state.controls = input.controls,
            _ if !state.is_running() => {}
            Stage::Kinematics => {
                let controls = state.controls;
                step_player(&mut state.player, &controls, &state.tuning);
            }
            Stage::Camera => state.camera.track(&state.player),
            Stage::Spawn => {
                update_spawns(state);
            }
            Stage::Traffic => {
                traffic::update_traffic(state);
            }
            Stage::Collision => {
                check_collisions(state);
            }
            Stage::Score => update_score(state),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart && state.phase == GamePhase::GameOver {
        reset(state);
    }

    // Frozen frame: only rendering continues
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt as f64;

    for stage in PIPELINE {
        stage.run(state, input);
    }

    if !state.is_running() {
        log::info!("Game over! Final score: {}", state.score);
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
    }
}

/// Start a fresh session in place
///
/// The car is repositioned rather than recreated and traffic is released.
/// The camera is left where it is and re-converges on the car by smoothing.
pub fn reset(state: &mut GameState) {
    log::info!("Restarting game...");

    state.phase = GamePhase::Running;
    state.score = 0;
    state.display_speed = 0;
    state.time_ticks = 0;
    state.elapsed = 0.0;
    state.player.reset(&state.tuning);
    traffic::clear(state);
    state.spawn = SpawnSchedule::new(&state.tuning);
    state.events.push(GameEvent::Restarted);
}

/// Snap the camera straight onto its chase position
pub fn snap_camera(state: &mut GameState) {
    let mut camera = Camera::new(&state.tuning);
    camera.aspect = state.camera.aspect;
    camera.position = camera.target_position(&state.player);
    camera.look_at = camera.target_look_at(&state.player);
    state.camera = camera;
}
