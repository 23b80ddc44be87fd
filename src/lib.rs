//! Highway Dash - an oncoming-traffic arcade driver
//!
//! Core modules:
//! - `sim`: Deterministic simulation (car physics, traffic, collisions, scoring)
//! - `driver`: Frame driver bridging wall-clock frames to fixed ticks
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod sim;
pub mod tuning;

pub use driver::{Game, Hud, Scene};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
