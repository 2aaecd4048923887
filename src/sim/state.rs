//! Game state and session lifecycle
//!
//! Everything the tick and tap handlers mutate lives in `GameState`. Phase
//! transitions are guarded here; an invalid transition is a silent no-op.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::row::{Row, RowId, generate_row};
use super::speed::{SpeedTier, speed_tier_for_score};
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    #[default]
    Idle,
    /// Rows are scrolling
    Running,
    /// Session ended; only `reset` leaves this phase
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A black tile scrolled off the board untapped
    Miss,
    /// The player tapped a white tile
    WhiteTile,
}

/// Side effects requested by the simulation, drained by the host each step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { seed: u64 },
    /// A black tile was cleared; play that column's tone
    ToneRequested { column: usize },
    SpeedUp { tier: SpeedTier },
    MissDetected { row_id: RowId },
    WhiteTileTapped { row_id: RowId, column: usize },
    GameOver { score: u64, reason: EndReason },
    NewHighScore { score: u64 },
    SessionReset,
}

/// Complete game state (deterministic for a given seed and stimulus sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Active rows, topmost (smallest y) first
    pub rows: VecDeque<Row>,
    pub score: u64,
    /// Best final score seen by this state (process lifetime only)
    pub high_score: u64,
    /// Ticks advanced in the current session
    pub time_ticks: u64,
    /// Set when the last finished session raised `high_score`
    record_set: bool,
    /// Pending side effects, oldest first
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            rows: VecDeque::with_capacity(PREFILL_ROWS + 1),
            score: 0,
            high_score: 0,
            time_ticks: 0,
            record_set: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new row ID
    pub fn next_row_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Generate a fresh row at `y` using the state's RNG
    pub fn spawn_row(&mut self, y: f32) -> Row {
        let id = self.next_row_id();
        generate_row(&mut self.rng, id, y)
    }

    /// Speed tier, always derived from the live score
    pub fn speed_tier(&self) -> SpeedTier {
        speed_tier_for_score(self.score)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// True once a session has ended with a new best score
    pub fn is_new_high_score(&self) -> bool {
        self.phase == GamePhase::GameOver && self.record_set
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Position of the topmost row, if any
    pub fn topmost_y(&self) -> Option<f32> {
        self.rows.front().map(|r| r.y)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Idle -> Running: zero the score and prefill the board
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }

        self.score = 0;
        self.time_ticks = 0;
        self.record_set = false;
        self.rows.clear();

        // Stack rows upward from the top of the board, topmost first
        for i in 0..PREFILL_ROWS {
            let row = self.spawn_row(0.0 - i as f32 * TILE_HEIGHT);
            self.rows.push_front(row);
        }

        self.phase = GamePhase::Running;
        self.emit(GameEvent::SessionStarted { seed: self.seed });
        log::info!("Session started ({} rows, seed {})", self.rows.len(), self.seed);
        true
    }

    /// Running -> GameOver, updating the high score on a strictly better result
    pub fn end_session(&mut self, reason: EndReason) -> bool {
        if self.phase != GamePhase::Running {
            log::debug!("end_session({:?}) ignored in {:?}", reason, self.phase);
            return false;
        }

        self.phase = GamePhase::GameOver;
        self.record_set = self.score > self.high_score;
        self.emit(GameEvent::GameOver {
            score: self.score,
            reason,
        });
        if self.record_set {
            self.high_score = self.score;
            self.emit(GameEvent::NewHighScore { score: self.score });
            log::info!("New high score: {}", self.score);
        }
        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            reason,
            self.time_ticks,
            self.score
        );
        true
    }

    /// GameOver -> Idle: clear the board, keep the high score
    pub fn reset(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("reset ignored in {:?}", self.phase);
            return false;
        }

        self.rows.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.record_set = false;
        self.phase = GamePhase::Idle;
        self.emit(GameEvent::SessionReset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.rows.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_tier(), SpeedTier::Slow);
    }

    #[test]
    fn test_start_prefills_board_upward_from_zero() {
        let mut state = GameState::new(42);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.rows.len(), 5);

        let ys: Vec<f32> = state.rows.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![-600.0, -450.0, -300.0, -150.0, 0.0]);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::SessionStarted { seed: 42 }]
        );
    }

    #[test]
    fn test_row_ids_are_unique() {
        let mut state = GameState::new(3);
        state.start();
        let mut ids: Vec<RowId> = state.rows.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), state.rows.len());
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::new(1);
        state.start();
        let rows = state.rows.clone();
        assert!(!state.start());
        assert_eq!(state.rows, rows);

        state.end_session(EndReason::Miss);
        assert!(!state.start());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_end_session_only_from_running() {
        let mut state = GameState::new(1);
        assert!(!state.end_session(EndReason::WhiteTile));
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        assert!(state.end_session(EndReason::WhiteTile));
        assert!(!state.end_session(EndReason::Miss));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_reset_only_from_game_over() {
        let mut state = GameState::new(1);
        assert!(!state.reset());
        state.start();
        assert!(!state.reset());
        assert_eq!(state.phase, GamePhase::Running);

        state.score = 9;
        state.end_session(EndReason::Miss);
        assert!(state.reset());
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.rows.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_tier(), SpeedTier::Slow);
        assert_eq!(state.high_score, 9);
    }

    #[test]
    fn test_high_score_requires_strictly_greater() {
        let mut state = GameState::new(1);

        state.start();
        state.score = 10;
        state.end_session(EndReason::Miss);
        assert_eq!(state.high_score, 10);
        assert!(state.is_new_high_score());
        state.reset();

        state.start();
        state.score = 10;
        state.drain_events();
        state.end_session(EndReason::Miss);
        assert_eq!(state.high_score, 10);
        assert!(!state.is_new_high_score());
        assert!(
            !state
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
        state.reset();

        state.start();
        state.score = 4;
        state.end_session(EndReason::WhiteTile);
        assert_eq!(state.high_score, 10);
    }

    #[test]
    fn test_zero_score_is_never_a_record() {
        let mut state = GameState::new(1);
        state.start();
        state.end_session(EndReason::Miss);
        assert_eq!(state.high_score, 0);
        assert!(!state.is_new_high_score());
    }
}
