//! Enemy spawn scheduling and the difficulty ramp
//!
//! The spawn interval shrinks linearly with session time down to a floor.
//! That ramp is the only difficulty knob; it ignores score and performance.

use glam::Vec2;
use rand::Rng;

use super::state::{EnemyVehicle, Footprint, GameEvent, GameState};
use crate::tuning::Tuning;

/// Spawn interval for a given session time (seconds)
pub fn interval_at(elapsed: f64, tuning: &Tuning) -> f32 {
    let ramped = tuning.spawn_interval_initial - elapsed as f32 * tuning.spawn_interval_decay;
    ramped.max(tuning.spawn_interval_floor)
}

/// Whether enough time has passed since the last spawn
pub fn spawn_due(state: &GameState) -> bool {
    match state.spawn.last_spawn {
        None => true,
        Some(last) => state.elapsed - last > state.spawn.interval as f64,
    }
}

/// Create one enemy ahead of the player in a random lane
pub fn spawn_enemy(state: &mut GameState) -> u32 {
    let lane = state.rng.random_range(0..state.tuning.lanes.len());
    let speed = state.tuning.enemy_speed_min
        + state.rng.random::<f32>() * state.tuning.enemy_speed_range;
    let x = state.tuning.lanes[lane];
    let z = state.player.z() - state.tuning.spawn_distance;

    let id = state.next_entity_id();
    state.enemies.push(EnemyVehicle {
        id,
        lane,
        pos: Vec2::new(x, z),
        speed,
        footprint: Footprint::new(state.tuning.car_width, state.tuning.car_length),
    });
    state.events.push(GameEvent::EnemySpawned { id, lane, x, z, speed });
    log::debug!("Spawned enemy {} in lane {} at z={:.1}, speed {:.1}", id, lane, z, speed);
    id
}

/// Spawn if due, then tighten the interval. Returns the new enemy's id.
pub fn update_spawns(state: &mut GameState) -> Option<u32> {
    if !state.is_running() || !spawn_due(state) {
        return None;
    }

    let id = spawn_enemy(state);
    state.spawn.last_spawn = Some(state.elapsed);

    let next = interval_at(state.elapsed, &state.tuning).min(state.spawn.interval);
    if next < state.spawn.interval {
        log::debug!("Spawn interval {:.3}s -> {:.3}s", state.spawn.interval, next);
    }
    state.spawn.interval = next;
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_tick_spawns_immediately() {
        let mut state = GameState::new(3);
        assert!(update_spawns(&mut state).is_some());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn.last_spawn, Some(0.0));
        // Nothing more until the interval passes
        assert!(update_spawns(&mut state).is_none());
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut state = GameState::new(3);
        update_spawns(&mut state);
        state.elapsed = 1.9;
        assert!(update_spawns(&mut state).is_none());
        state.elapsed = 2.05;
        assert!(update_spawns(&mut state).is_some());
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_enemy_lands_in_a_lane_ahead_of_player() {
        let mut state = GameState::new(11);
        for _ in 0..50 {
            spawn_enemy(&mut state);
        }
        let lanes = state.tuning.lanes;
        let expected_z = state.player.z() - 450.0;
        for enemy in &state.enemies {
            assert!(lanes.contains(&enemy.pos.x));
            assert_eq!(enemy.pos.x, lanes[enemy.lane]);
            assert_eq!(enemy.z(), expected_z);
            assert!(enemy.speed >= 30.0 && enemy.speed <= 50.0);
        }
    }

    #[test]
    fn test_interval_ramp_and_floor() {
        let tuning = Tuning::default();
        assert_eq!(interval_at(0.0, &tuning), 2.0);
        assert!((interval_at(30.0, &tuning) - 1.4).abs() < 1e-5);
        assert_eq!(interval_at(60.0, &tuning), 0.8);
        assert_eq!(interval_at(600.0, &tuning), 0.8);
    }

    #[test]
    fn test_same_seed_same_traffic() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..10 {
            spawn_enemy(&mut a);
            spawn_enemy(&mut b);
        }
        assert_eq!(a.enemies, b.enemies);
    }

    proptest! {
        #[test]
        fn prop_interval_never_increases_or_breaks_floor(
            steps in prop::collection::vec(0.0f64..5.0, 1..100)
        ) {
            let mut state = GameState::new(5);
            let mut last = state.spawn.interval;
            for step in steps {
                state.elapsed += step;
                update_spawns(&mut state);
                prop_assert!(state.spawn.interval <= last);
                prop_assert!(state.spawn.interval >= state.tuning.spawn_interval_floor);
                last = state.spawn.interval;
            }
        }
    }
}
