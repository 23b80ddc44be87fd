//! Live traffic: advance and cull
//!
//! Enemies never steer or slow down. Each tick they move toward +z by their
//! own speed and are dropped once they are far enough behind the player.

use super::state::{GameEvent, GameState};

/// Advance every enemy one tick, then remove those past the trailing threshold
///
/// Returns the number of enemies removed.
pub fn update_traffic(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }

    let scale = state.tuning.distance_scale;
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed * scale;
    }

    cull_behind(state)
}

/// Remove enemies more than `cull_distance` behind the player
pub fn cull_behind(state: &mut GameState) -> usize {
    let threshold = state.player.z() + state.tuning.cull_distance;
    let before = state.enemies.len();
    let events = &mut state.events;

    state.enemies.retain(|enemy| {
        if enemy.z() > threshold {
            events.push(GameEvent::EnemyDespawned { id: enemy.id });
            log::debug!("Despawned enemy {} at z={:.1}", enemy.id, enemy.z());
            false
        } else {
            true
        }
    });

    before - state.enemies.len()
}

/// Remove all traffic, reporting each removal
pub fn clear(state: &mut GameState) {
    for enemy in state.enemies.drain(..) {
        state.events.push(GameEvent::EnemyDespawned { id: enemy.id });
    }
}
