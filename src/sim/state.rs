//! Game state and core simulation types
//!
//! One `GameState` aggregate holds everything the tick reads or writes. Each
//! pipeline stage borrows the parts it owns; nothing lives in globals.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::Aabb;
use super::input::InputState;
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Driving, traffic moving, score counting
    Running,
    /// Crashed. Frozen until an explicit restart.
    GameOver,
}

/// Rectangular extent of a car on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Extent along x
    pub width: f32,
    /// Extent along z
    pub length: f32,
}

impl Footprint {
    pub fn new(width: f32, length: f32) -> Self {
        Self { width, length }
    }

    /// World-space bounds when centred on `center` (x, z)
    pub fn bounds_at(&self, center: Vec2) -> Aabb {
        let half = Vec2::new(self.width / 2.0, self.length / 2.0);
        Aabb::new(center - half, center + half)
    }
}

/// The player's car
///
/// `pos` is the ground-plane position: `pos.x` is lateral, `pos.y` is world z.
/// The player drives toward negative z.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerVehicle {
    pub pos: Vec2,
    /// Longitudinal velocity (positive = forward, toward -z)
    pub velocity: f32,
    /// Lateral steering rate (positive = right)
    pub steer: f32,
    pub footprint: Footprint,
}

impl PlayerVehicle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_start_x, tuning.player_start_z),
            velocity: 0.0,
            steer: 0.0,
            footprint: Footprint::new(tuning.car_width, tuning.car_length),
        }
    }

    /// Put the car back on the start line at rest
    pub fn reset(&mut self, tuning: &Tuning) {
        self.pos = Vec2::new(tuning.player_start_x, tuning.player_start_z);
        self.velocity = 0.0;
        self.steer = 0.0;
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos.y
    }

    pub fn bounds(&self) -> Aabb {
        self.footprint.bounds_at(self.pos)
    }

    /// Position in 3D world space (y = ground)
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.pos.x, 0.0, self.pos.y)
    }
}

/// An oncoming car travelling at constant speed toward +z
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyVehicle {
    pub id: u32,
    /// Index into the lane table
    pub lane: usize,
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    pub speed: f32,
    pub footprint: Footprint,
}

impl EnemyVehicle {
    #[inline]
    pub fn z(&self) -> f32 {
        self.pos.y
    }

    pub fn bounds(&self) -> Aabb {
        self.footprint.bounds_at(self.pos)
    }

    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.pos.x, 0.0, self.pos.y)
    }
}

/// Enemy spawn timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    /// Session time of the last spawn (None = nothing spawned yet)
    pub last_spawn: Option<f64>,
    /// Current gap between spawns in seconds
    pub interval: f32,
}

impl SpawnSchedule {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_spawn: None,
            interval: tuning.spawn_interval_initial,
        }
    }
}

/// Things that happened during a tick, for the scene and HUD to mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, lane: usize, x: f32, z: f32, speed: f32 },
    EnemyDespawned { id: u32 },
    Collision { enemy_id: u32 },
    GameOver { final_score: u64 },
    Restarted,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Derived each tick while running
    pub score: u64,
    /// Speedometer readout, derived each tick while running
    pub display_speed: u32,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Seconds simulated this session
    pub elapsed: f64,
    /// Controls snapshot taken at the start of the tick
    pub controls: InputState,
    pub player: PlayerVehicle,
    pub camera: Camera,
    /// Live traffic, in spawn order
    pub enemies: Vec<EnemyVehicle>,
    pub spawn: SpawnSchedule,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            display_speed: 0,
            time_ticks: 0,
            elapsed: 0.0,
            controls: InputState::default(),
            player: PlayerVehicle::new(&tuning),
            camera: Camera::new(&tuning),
            enemies: Vec::new(),
            spawn: SpawnSchedule::new(&tuning),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
