//! Tap reconciliation
//!
//! Applies a "tile tapped" event from the renderer to the current board.

use serde::{Deserialize, Serialize};

use super::row::RowId;
use super::state::{EndReason, GameEvent, GameState};

/// A tap on one tile, as reported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tap {
    pub row_id: RowId,
    pub column: usize,
    /// Whether the tile was black when it was tapped
    pub is_black: bool,
}

impl Tap {
    pub fn new(row_id: RowId, column: usize, is_black: bool) -> Self {
        Self {
            row_id,
            column,
            is_black,
        }
    }
}

/// Apply a tap to the board. Returns true if the state changed.
///
/// A white tap ends the session unconditionally. A black tap clears the
/// tile and scores once; re-tapping a cleared tile does nothing.
pub fn handle_tap(state: &mut GameState, tap: Tap) -> bool {
    if !state.is_running() {
        log::debug!("Tap {:?} ignored in {:?}", tap, state.phase);
        return false;
    }

    if !tap.is_black {
        state.emit(GameEvent::WhiteTileTapped {
            row_id: tap.row_id,
            column: tap.column,
        });
        return state.end_session(EndReason::WhiteTile);
    }

    let Some(row) = state.row_mut(tap.row_id) else {
        log::debug!("Tap on unknown row {:?}", tap.row_id);
        return false;
    };
    let Some(tile) = row.tile_mut(tap.column) else {
        log::debug!("Tap on out-of-range column {}", tap.column);
        return false;
    };
    if !tile.is_pending() {
        // Already cleared, or the renderer's view disagrees with the board
        return false;
    }
    tile.clicked = true;

    let tier_before = state.speed_tier();
    state.score += 1;
    state.emit(GameEvent::ToneRequested { column: tap.column });

    let tier = state.speed_tier();
    if tier != tier_before {
        log::info!("Speed up to tier {} at score {}", tier.level(), state.score);
        state.emit(GameEvent::SpeedUp { tier });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::row::Row;
    use crate::sim::speed::SpeedTier;
    use crate::sim::state::GamePhase;

    fn board_with(row: Row) -> GameState {
        let mut state = GameState::new(1);
        state.start();
        state.rows.push_back(row);
        state.drain_events();
        state
    }

    #[test]
    fn test_black_tap_scores_and_requests_tone() {
        let mut state = board_with(Row::with_black_columns(RowId(500), 100.0, &[2]));
        assert!(handle_tap(&mut state, Tap::new(RowId(500), 2, true)));
        assert_eq!(state.score, 1);
        assert!(state.row(RowId(500)).is_some_and(|r| r.tiles[2].clicked));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ToneRequested { column: 2 }]
        );
    }

    #[test]
    fn test_double_tap_scores_once() {
        let mut state = board_with(Row::with_black_columns(RowId(500), 100.0, &[0]));
        let tap = Tap::new(RowId(500), 0, true);
        assert!(handle_tap(&mut state, tap));
        assert!(!handle_tap(&mut state, tap));
        assert_eq!(state.score, 1);
        assert_eq!(state.drain_events().len(), 1);
    }

    #[test]
    fn test_white_tap_always_ends_session() {
        let mut state = board_with(Row::with_black_columns(RowId(500), 100.0, &[0]));
        state.score = 30;
        assert!(handle_tap(&mut state, Tap::new(RowId(500), 3, false)));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 30);

        let events = state.drain_events();
        assert_eq!(
            events[0],
            GameEvent::WhiteTileTapped {
                row_id: RowId(500),
                column: 3
            }
        );
        assert!(events.contains(&GameEvent::GameOver {
            score: 30,
            reason: EndReason::WhiteTile
        }));
    }

    #[test]
    fn test_white_tap_on_unknown_row_still_ends_session() {
        let mut state = board_with(Row::with_black_columns(RowId(500), 100.0, &[0]));
        handle_tap(&mut state, Tap::new(RowId(12345), 1, false));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_taps_ignored_outside_running() {
        let mut state = GameState::new(1);
        assert!(!handle_tap(&mut state, Tap::new(RowId(1), 0, false)));
        assert_eq!(state.phase, GamePhase::Idle);

        let mut state = board_with(Row::with_black_columns(RowId(500), 100.0, &[0]));
        handle_tap(&mut state, Tap::new(RowId(500), 1, false));
        state.drain_events();

        assert!(!handle_tap(&mut state, Tap::new(RowId(500), 0, true)));
        assert!(!handle_tap(&mut state, Tap::new(RowId(500), 1, false)));
        assert_eq!(state.score, 0);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_unknown_row_or_column_is_ignored() {
        let mut state = board_with(Row::with_black_columns(RowId(500), 100.0, &[0]));
        assert!(!handle_tap(&mut state, Tap::new(RowId(77), 0, true)));
        assert!(!handle_tap(&mut state, Tap::new(RowId(500), 9, true)));
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_crossing_threshold_emits_speed_up() {
        let mut state = board_with(Row::with_black_columns(RowId(500), 100.0, &[0, 1]));
        state.score = 14;
        handle_tap(&mut state, Tap::new(RowId(500), 0, true));
        assert_eq!(state.speed_tier(), SpeedTier::Medium);
        assert!(state.events().contains(&GameEvent::SpeedUp {
            tier: SpeedTier::Medium
        }));

        state.drain_events();
        handle_tap(&mut state, Tap::new(RowId(500), 1, true));
        assert!(
            !state
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::SpeedUp { .. }))
        );
    }
}
