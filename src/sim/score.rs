//! Score and HUD readouts
//!
//! Nothing here accumulates. The score is recomputed every tick from elapsed
//! whole seconds plus a bonus proportional to forward speed.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Score for `elapsed` seconds at `velocity`
pub fn score_for(elapsed: f64, velocity: f32, tuning: &Tuning) -> u64 {
    let seconds = elapsed.max(0.0).floor();
    let bonus = (velocity.max(0.0) / tuning.speed_bonus_divisor) as f64;
    (seconds + bonus * seconds).floor() as u64
}

/// Speedometer value; reversing shows as positive speed
pub fn display_speed(velocity: f32, tuning: &Tuning) -> u32 {
    (velocity * tuning.speed_display_scale).abs().floor() as u32
}

/// Refresh the derived readouts. Frozen once the session is over.
pub fn update_score(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    state.score = score_for(state.elapsed, state.player.velocity, &state.tuning);
    state.display_speed = display_speed(state.player.velocity, &state.tuning);
}

/// Values the HUD overlay shows this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub speed: u32,
    pub phase: GamePhase,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            speed: state.display_speed,
            phase: state.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        let tuning = Tuning::default();
        assert_eq!(score_for(0.0, 50.0, &tuning), 0);
        assert_eq!(score_for(10.4, 0.0, &tuning), 10);
        // 10 + (25 / 10) * 10
        assert_eq!(score_for(10.9, 25.0, &tuning), 35);
    }

    #[test]
    fn test_reverse_earns_no_bonus() {
        let tuning = Tuning::default();
        assert_eq!(score_for(12.0, -20.0, &tuning), 12);
    }

    #[test]
    fn test_display_speed_is_scaled_magnitude() {
        let tuning = Tuning::default();
        assert_eq!(display_speed(28.5, &tuning), 57);
        assert_eq!(display_speed(-10.2, &tuning), 20);
        assert_eq!(display_speed(0.0, &tuning), 0);
    }

    #[test]
    fn test_score_freezes_after_game_over() {
        let mut state = GameState::new(1);
        state.elapsed = 5.0;
        update_score(&mut state);
        assert_eq!(state.score, 5);

        state.phase = GamePhase::GameOver;
        state.elapsed = 50.0;
        update_score(&mut state);
        assert_eq!(state.score, 5);
        assert_eq!(HudSnapshot::from_state(&state).phase, GamePhase::GameOver);
    }
}
