//! Trailing chase camera
//!
//! Each tick the camera closes a fixed fraction of the gap to a point behind
//! and above the car, and its look-at point does the same toward a point
//! ahead of the car. Exponential smoothing gives the lagging chase feel.

use glam::{Mat4, Vec3};

use super::state::PlayerVehicle;
use crate::tuning::Tuning;

/// Perspective chase camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    offset: Vec3,
    look_offset: Vec3,
    smoothing: f32,
}

impl Camera {
    pub fn new(tuning: &Tuning) -> Self {
        let position = Vec3::new(0.0, 20.0, 50.0);
        Self {
            position,
            // Initially facing down the road (-z)
            look_at: position - Vec3::Z,
            fov_y: 75.0f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            offset: Vec3::from_array(tuning.camera_offset),
            look_offset: Vec3::from_array(tuning.camera_look_offset),
            smoothing: tuning.camera_smoothing,
        }
    }

    /// Where the camera wants to sit for this player position
    pub fn target_position(&self, player: &PlayerVehicle) -> Vec3 {
        player.world_position() + self.offset
    }

    /// Where the camera wants to look for this player position
    pub fn target_look_at(&self, player: &PlayerVehicle) -> Vec3 {
        player.world_position() + self.look_offset
    }

    /// Move a fraction of the way toward the chase targets
    pub fn track(&mut self, player: &PlayerVehicle) {
        let target = self.target_position(player);
        let look = self.target_look_at(player);
        self.position = self.position.lerp(target, self.smoothing);
        self.look_at = self.look_at.lerp(look, self.smoothing);
    }

    /// Viewport resized. Only the projection changes.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
