//! Player car physics
//!
//! Per-tick integration in a fixed order: throttle, friction, speed clamp,
//! steering, position, lateral clamp. Friction acts on the already-updated
//! velocity and the speed clamp happens before position uses it.

use super::input::InputState;
use super::state::PlayerVehicle;
use crate::tuning::Tuning;

/// Throttle contribution for this tick. Accelerate wins over brake.
pub fn throttle(input: &InputState, tuning: &Tuning) -> f32 {
    if input.accelerate {
        tuning.forward_accel
    } else if input.brake {
        -tuning.brake_accel
    } else {
        0.0
    }
}

/// Next velocity: add throttle, apply friction, clamp to the speed band
#[inline]
pub fn next_velocity(velocity: f32, accel: f32, tuning: &Tuning) -> f32 {
    ((velocity + accel) * tuning.friction).clamp(tuning.min_speed, tuning.max_speed)
}

/// Next steering rate. Left wins over right; with neither held the rate decays.
pub fn next_steer(steer: f32, input: &InputState, tuning: &Tuning) -> f32 {
    if input.left {
        (steer - tuning.steer_accel).max(-tuning.max_steer)
    } else if input.right {
        (steer + tuning.steer_accel).min(tuning.max_steer)
    } else {
        steer * tuning.steer_friction
    }
}

/// Advance the player car by one tick
pub fn step_player(player: &mut PlayerVehicle, input: &InputState, tuning: &Tuning) {
    player.velocity = next_velocity(player.velocity, throttle(input, tuning), tuning);
    player.steer = next_steer(player.steer, input, tuning);

    player.pos.y -= player.velocity * tuning.distance_scale;
    player.pos.x += player.steer * tuning.distance_scale;

    // Hard wall at the road edge
    let limit = tuning.lateral_limit();
    player.pos.x = player.pos.x.clamp(-limit, limit);
}
