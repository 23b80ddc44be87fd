//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod kinematics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod traffic;

pub use camera::Camera;
pub use collision::{Aabb, check_collisions, first_overlap};
pub use input::{Control, InputEvent, InputState};
pub use score::{HudSnapshot, display_speed, score_for};
pub use state::{
    EnemyVehicle, Footprint, GameEvent, GamePhase, GameState, PlayerVehicle, SpawnSchedule,
};
pub use tick::{PIPELINE, Stage, TickInput, reset, snap_camera, tick};
