//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One stimulus applied at a time
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod input;
pub mod row;
pub mod snapshot;
pub mod speed;
pub mod state;
pub mod tick;

pub use autoplay::Autoplayer;
pub use input::{Tap, handle_tap};
pub use row::{Row, RowId, Tile, generate_row};
pub use snapshot::Snapshot;
pub use speed::{FAST_SPEED_SCORE, MEDIUM_SPEED_SCORE, SpeedTier, speed_tier_for_score};
pub use state::{EndReason, GameEvent, GamePhase, GameState};
pub use tick::tick;

/// An external stimulus delivered to the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stimulus {
    Start,
    Tick,
    Tap(Tap),
    Reset,
}

/// Apply one stimulus to the state in place
pub fn apply(state: &mut GameState, stimulus: Stimulus) {
    match stimulus {
        Stimulus::Start => {
            state.start();
        }
        Stimulus::Tick => tick(state),
        Stimulus::Tap(tap) => {
            handle_tap(state, tap);
        }
        Stimulus::Reset => {
            state.reset();
        }
    }
}

/// Reducer form of `apply`: `(state, stimulus) -> state`
pub fn reduce(mut state: GameState, stimulus: Stimulus) -> GameState {
    apply(&mut state, stimulus);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black taps for every pending tile on rows that are on screen
    fn pending_taps(state: &GameState) -> Vec<Tap> {
        state
            .rows
            .iter()
            .filter(|r| r.y >= 0.0)
            .flat_map(|r| {
                r.tiles
                    .iter()
                    .filter(|t| t.is_pending())
                    .map(move |t| Tap::new(r.id, t.column, true))
            })
            .collect()
    }

    fn tap_visible(state: GameState) -> GameState {
        pending_taps(&state)
            .into_iter()
            .fold(state, |s, tap| reduce(s, Stimulus::Tap(tap)))
    }

    #[test]
    fn test_reduce_full_lifecycle() {
        let state = reduce(GameState::new(3), Stimulus::Start);
        assert_eq!(state.phase, GamePhase::Running);

        let state = reduce(state, Stimulus::Reset);
        assert_eq!(state.phase, GamePhase::Running);

        let tap = Tap::new(RowId(0), 0, false);
        let state = reduce(state, Stimulus::Tap(tap));
        assert_eq!(state.phase, GamePhase::GameOver);

        let state = reduce(state, Stimulus::Start);
        assert_eq!(state.phase, GamePhase::GameOver);

        let state = reduce(state, Stimulus::Reset);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_miss_ends_session_exactly_once_with_frozen_score() {
        let mut state = reduce(GameState::new(21), Stimulus::Start);
        let mut game_overs = 0;
        for _ in 0..1000 {
            state = reduce(state, Stimulus::Tick);
            game_overs += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();
        }
        assert_eq!(game_overs, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 601);
    }

    #[test]
    fn test_forty_taps_reach_top_speed() {
        let mut state = reduce(GameState::new(77), Stimulus::Start);
        let mut ticks = 0;
        'play: loop {
            for tap in pending_taps(&state) {
                state = reduce(state, Stimulus::Tap(tap));
                if state.score == 40 {
                    break 'play;
                }
            }
            state = reduce(state, Stimulus::Tick);
            ticks += 1;
            assert!(ticks < 100_000, "stalled at score {}", state.score);
            assert_eq!(state.phase, GamePhase::Running);
        }

        assert_eq!(state.score, 40);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.speed_tier(), SpeedTier::Fast);
        assert_eq!(state.speed_tier().level(), 3);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = |seed| {
            let mut state = reduce(GameState::new(seed), Stimulus::Start);
            for _ in 0..500 {
                state = tap_visible(state);
                state = reduce(state, Stimulus::Tick);
            }
            state
        };
        let a = run(1234);
        let b = run(1234);
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.score, b.score);
    }
}
