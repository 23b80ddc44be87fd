//! Collision detection between the player and traffic
//!
//! Cars are axis-aligned rectangles on the ground plane. A hit is binary and
//! terminal: there is no response, the session simply ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyVehicle, GameEvent, GamePhase, GameState};

/// Axis-aligned box on the ground plane (x, z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Overlap test. Touching edges count as a hit.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// First enemy overlapping `bounds`, if any. An empty slice is simply a miss.
pub fn first_overlap<'a>(bounds: &Aabb, enemies: &'a [EnemyVehicle]) -> Option<&'a EnemyVehicle> {
    enemies.iter().find(|enemy| bounds.intersects(&enemy.bounds()))
}

/// Test the player against all live traffic and end the session on a hit
///
/// Returns true if this call ended the session.
pub fn check_collisions(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }

    let player_bounds = state.player.bounds();
    let Some(enemy_id) = first_overlap(&player_bounds, &state.enemies).map(|e| e.id) else {
        return false;
    };

    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::Collision { enemy_id });
    log::info!(
        "Crashed into enemy {} at z={:.1} (score {})",
        enemy_id,
        state.player.z(),
        state.score
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Footprint;

    fn enemy_at(id: u32, x: f32, z: f32) -> EnemyVehicle {
        EnemyVehicle {
            id,
            lane: 1,
            pos: Vec2::new(x, z),
            speed: 30.0,
            footprint: Footprint::new(4.0, 8.0),
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 8.0));
        let b = Aabb::new(Vec2::new(3.0, 7.0), Vec2::new(7.0, 15.0));
        let c = Aabb::new(Vec2::new(5.0, 0.0), Vec2::new(9.0, 8.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_count() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 8.0));
        let b = Aabb::new(Vec2::new(4.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_empty_traffic_is_noop() {
        let mut state = GameState::new(1);
        assert!(!check_collisions(&mut state));
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_hit_ends_session() {
        let mut state = GameState::new(1);
        let (x, z) = (state.player.pos.x, state.player.z());
        state.enemies.push(enemy_at(9, x + 1.0, z - 3.0));

        assert!(check_collisions(&mut state));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events, vec![GameEvent::Collision { enemy_id: 9 }]);
    }

    #[test]
    fn test_multiple_overlaps_trigger_once() {
        let mut state = GameState::new(1);
        let (x, z) = (state.player.pos.x, state.player.z());
        state.enemies.push(enemy_at(1, x, z));
        state.enemies.push(enemy_at(2, x - 1.0, z + 2.0));
        state.enemies.push(enemy_at(3, x + 1.0, z - 2.0));

        assert!(check_collisions(&mut state));
        // Already over: further checks are no-ops
        assert!(!check_collisions(&mut state));

        let collisions = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Collision { .. }))
            .count();
        assert_eq!(collisions, 1);
    }

    #[test]
    fn test_adjacent_lane_misses() {
        let mut state = GameState::new(1);
        let z = state.player.z();
        state.enemies.push(enemy_at(4, 15.0, z));
        assert!(!check_collisions(&mut state));
    }
}
