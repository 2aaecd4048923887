//! Per-tick board update
//!
//! Core game loop that advances the board deterministically.

use super::state::{EndReason, GameEvent, GameState};
use crate::consts::*;

/// Advance the board by one scheduling tick
///
/// Order: advance, miss check, prune, spawn. A miss ends the session and
/// leaves the advanced rows in place without pruning or spawning.
pub fn tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    // Speed is read from the live score every tick
    let step = state.speed_tier().scroll_per_tick();
    for row in state.rows.iter_mut() {
        row.y += step;
    }

    // Only untapped black tiles count as a miss
    let missed = state
        .rows
        .iter()
        .find(|r| r.past_board() && r.has_pending_black())
        .map(|r| r.id);
    if let Some(row_id) = missed {
        state.emit(GameEvent::MissDetected { row_id });
        state.end_session(EndReason::Miss);
        return;
    }

    state.rows.retain(|r| !r.scrolled_off());

    let top = state.topmost_y().unwrap_or(0.0);
    if top >= 0.0 {
        let row = state.spawn_row(top - TILE_HEIGHT);
        log::debug!("Spawned row {:?} at y={}", row.id, row.y);
        state.rows.push_front(row);
    }
}
