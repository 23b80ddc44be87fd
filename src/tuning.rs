//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from a JSON
//! file without recompiling. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay tuning for the player car, traffic and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics (per tick) ===
    /// Velocity gained per tick while accelerating
    pub forward_accel: f32,
    /// Velocity lost per tick while braking
    pub brake_accel: f32,
    /// Multiplicative velocity decay applied every tick
    pub friction: f32,
    /// Lowest allowed velocity (negative = reverse)
    pub min_speed: f32,
    /// Highest allowed velocity
    pub max_speed: f32,
    /// Steering rate change per tick while a steer key is held
    pub steer_accel: f32,
    /// Steering rate bound (symmetric)
    pub max_steer: f32,
    /// Multiplicative steering decay when no steer key is held
    pub steer_friction: f32,
    /// World units travelled per unit of speed per tick
    pub distance_scale: f32,

    // === Road ===
    /// Half the drivable width, measured from the centre line
    pub drivable_half_width: f32,
    /// Lateral offsets enemies spawn on
    pub lanes: [f32; 3],
    /// Car footprint width (x extent)
    pub car_width: f32,
    /// Car footprint length (z extent)
    pub car_length: f32,
    /// Player start position on the ground plane
    pub player_start_x: f32,
    pub player_start_z: f32,

    // === Traffic ===
    /// How far ahead of the player new enemies appear
    pub spawn_distance: f32,
    /// Slowest enemy speed
    pub enemy_speed_min: f32,
    /// Width of the enemy speed band above the minimum
    pub enemy_speed_range: f32,
    /// Enemies further than this behind the player are culled
    pub cull_distance: f32,

    // === Difficulty ramp (seconds) ===
    pub spawn_interval_initial: f32,
    /// Interval reduction per elapsed session second
    pub spawn_interval_decay: f32,
    pub spawn_interval_floor: f32,

    // === Camera ===
    /// Chase offset from the player (x, up, z)
    pub camera_offset: [f32; 3],
    /// Look-at offset from the player
    pub camera_look_offset: [f32; 3],
    /// Fraction of the remaining distance covered per tick
    pub camera_smoothing: f32,

    // === Scoring ===
    /// Speed divisor for the score bonus
    pub speed_bonus_divisor: f32,
    /// Multiplier for the speedometer readout
    pub speed_display_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            forward_accel: 1.5,
            brake_accel: 0.8,
            friction: 0.95,
            min_speed: -20.0,
            max_speed: 50.0,
            steer_accel: 2.0,
            max_steer: 30.0,
            steer_friction: 0.9,
            distance_scale: 0.1,

            drivable_half_width: 27.0,
            lanes: [-15.0, 0.0, 15.0],
            car_width: 4.0,
            car_length: 8.0,
            player_start_x: 0.0,
            player_start_z: 200.0,

            spawn_distance: 450.0,
            enemy_speed_min: 30.0,
            enemy_speed_range: 20.0,
            cull_distance: 100.0,

            spawn_interval_initial: 2.0,
            spawn_interval_decay: 0.02,
            spawn_interval_floor: 0.8,

            camera_offset: [0.0, 15.0, 40.0],
            camera_look_offset: [0.0, 5.0, -20.0],
            camera_smoothing: 0.05,

            speed_bonus_divisor: 10.0,
            speed_display_scale: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values that would break the clamp invariants
    pub fn sanitized(mut self) -> Self {
        if self.min_speed > self.max_speed {
            log::warn!(
                "min_speed {} > max_speed {}, swapping",
                self.min_speed,
                self.max_speed
            );
            std::mem::swap(&mut self.min_speed, &mut self.max_speed);
        }
        if self.max_steer < 0.0 {
            log::warn!("Negative max_steer {}, using magnitude", self.max_steer);
            self.max_steer = -self.max_steer;
        }
        if self.spawn_interval_floor < 0.0 {
            log::warn!("Negative spawn_interval_floor, clamping to 0");
            self.spawn_interval_floor = 0.0;
        }
        if self.spawn_interval_initial < self.spawn_interval_floor {
            log::warn!(
                "spawn_interval_initial {} below floor {}, raising",
                self.spawn_interval_initial,
                self.spawn_interval_floor
            );
            self.spawn_interval_initial = self.spawn_interval_floor;
        }
        if self.spawn_interval_decay < 0.0 {
            log::warn!("Negative spawn_interval_decay would ease difficulty, clamping to 0");
            self.spawn_interval_decay = 0.0;
        }
        if self.enemy_speed_range < 0.0 {
            self.enemy_speed_range = 0.0;
        }
        let half_car = self.car_width / 2.0;
        if self.drivable_half_width < half_car {
            log::warn!("Road narrower than the car, widening to fit");
            self.drivable_half_width = half_car;
        }
        self
    }

    /// Furthest the player's centre may sit from the centre line
    #[inline]
    pub fn lateral_limit(&self) -> f32 {
        self.drivable_half_width - self.car_width / 2.0
    }
}
