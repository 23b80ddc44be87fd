//! Frame driver
//!
//! Bridges the external render loop to the fixed-step simulation. Each frame:
//! apply queued key edges, run as many fixed ticks as the elapsed time allows,
//! forward tick events to the scene and HUD, then render.

use glam::Vec3;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, HudSnapshot, InputEvent, TickInput, tick};
use crate::tuning::Tuning;

/// Render/scene collaborator. Mirrors simulation data; never the source of truth.
pub trait Scene {
    fn add_enemy(&mut self, id: u32, position: Vec3);
    fn remove_enemy(&mut self, id: u32);
    /// Draw a frame from the current state (car, traffic, camera)
    fn render(&mut self, state: &GameState);
}

/// HUD/overlay collaborator
pub trait Hud {
    fn update(&mut self, snapshot: HudSnapshot);
    fn show_game_over(&mut self, final_score: u64);
    fn hide_game_over(&mut self);
}

/// Game instance holding the simulation and frame timing
pub struct Game {
    pub state: GameState,
    accumulator: f32,
    input: TickInput,
    pending: Vec<InputEvent>,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::with_tuning(seed, tuning),
            accumulator: 0.0,
            input: TickInput::default(),
            pending: Vec::new(),
        }
    }

    /// Queue a key edge; applied at the start of the next frame
    pub fn queue_input(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Ask for a new session. Consumed by the next tick; ignored while running.
    pub fn request_restart(&mut self) {
        self.input.restart = true;
    }

    /// Viewport collaborator hook
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.camera.set_viewport(width, height);
    }

    /// Run simulation ticks for `dt` seconds of wall-clock time
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        for event in self.pending.drain(..) {
            self.input.controls.apply(event);
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.restart = false;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Forward tick events to the collaborators
    pub fn dispatch(&mut self, scene: &mut impl Scene, hud: &mut impl Hud) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::EnemySpawned { id, x, z, .. } => {
                    scene.add_enemy(id, Vec3::new(x, 0.0, z));
                }
                GameEvent::EnemyDespawned { id } => scene.remove_enemy(id),
                GameEvent::GameOver { final_score } => hud.show_game_over(final_score),
                GameEvent::Restarted => hud.hide_game_over(),
                GameEvent::Collision { .. } => {}
            }
        }
        hud.update(HudSnapshot::from_state(&self.state));
    }

    /// One display refresh: update, dispatch, render
    pub fn frame(&mut self, dt: f32, scene: &mut impl Scene, hud: &mut impl Hud) {
        self.update(dt);
        self.dispatch(scene, hud);
        scene.render(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Control, EnemyVehicle, Footprint, GamePhase};
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct RecordingScene {
        live: BTreeSet<u32>,
        frames: u32,
    }

    impl Scene for RecordingScene {
        fn add_enemy(&mut self, id: u32, _position: Vec3) {
            self.live.insert(id);
        }

        fn remove_enemy(&mut self, id: u32) {
            self.live.remove(&id);
        }

        fn render(&mut self, _state: &GameState) {
            self.frames += 1;
        }
    }

    #[derive(Default)]
    struct RecordingHud {
        last: Option<HudSnapshot>,
        final_score: Option<u64>,
        overlay_visible: bool,
    }

    impl Hud for RecordingHud {
        fn update(&mut self, snapshot: HudSnapshot) {
            self.last = Some(snapshot);
        }

        fn show_game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
            self.overlay_visible = true;
        }

        fn hide_game_over(&mut self) {
            self.overlay_visible = false;
        }
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let mut game = Game::new(1);
        assert_eq!(game.update(SIM_DT * 3.5), 3);
        assert_eq!(game.state.time_ticks, 3);
        // The leftover half tick carries into the next frame
        assert_eq!(game.update(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut game = Game::new(1);
        let ticks = game.update(5.0);
        assert!(ticks <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_queued_input_reaches_the_car() {
        let mut game = Game::new(1);
        game.queue_input(InputEvent::press(Control::Accelerate));
        game.update(SIM_DT * 10.0);
        assert!(game.state.player.velocity > 0.0);

        game.queue_input(InputEvent::release(Control::Accelerate));
        let before = game.state.player.velocity;
        game.update(SIM_DT * 2.0);
        assert!(game.state.player.velocity < before);
    }

    #[test]
    fn test_scene_mirrors_traffic() {
        let mut game = Game::new(2);
        let mut scene = RecordingScene::default();
        let mut hud = RecordingHud::default();

        for _ in 0..600 {
            game.frame(SIM_DT, &mut scene, &mut hud);
        }
        let live: BTreeSet<u32> = game.state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(scene.live, live);
        assert_eq!(scene.frames, 600);
        assert!(hud.last.is_some());
    }

    #[test]
    fn test_game_over_and_restart_reach_the_hud() {
        let mut game = Game::new(3);
        let mut scene = RecordingScene::default();
        let mut hud = RecordingHud::default();

        let pos = game.state.player.pos;
        let id = game.state.next_entity_id();
        game.state.enemies.push(EnemyVehicle {
            id,
            lane: 1,
            pos,
            speed: 30.0,
            footprint: Footprint::new(4.0, 8.0),
        });
        game.frame(SIM_DT, &mut scene, &mut hud);
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert!(hud.overlay_visible);
        assert_eq!(hud.final_score, Some(0));

        game.request_restart();
        game.frame(SIM_DT, &mut scene, &mut hud);
        assert_eq!(game.state.phase, GamePhase::Running);
        assert!(!hud.overlay_visible);
        assert_eq!(hud.last.map(|h| h.score), Some(0));
        assert!(!scene.live.contains(&id));
    }

    #[test]
    fn test_restart_request_is_one_shot() {
        let mut game = Game::new(4);
        game.request_restart();
        game.update(SIM_DT);
        assert!(!game.input.restart);
    }

    #[test]
    fn test_resize_updates_projection_only() {
        let mut game = Game::new(5);
        game.resize(800, 400);
        assert_eq!(game.state.camera.aspect, 2.0);
        assert_eq!(game.state.time_ticks, 0);
    }
}
