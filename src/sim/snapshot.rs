//! Renderer-facing view of the game state

use serde::{Deserialize, Serialize};

use super::row::Row;
use super::speed::SpeedTier;
use super::state::{GamePhase, GameState};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: Vec<Row>,
    pub score: u64,
    pub speed_tier: SpeedTier,
    pub phase: GamePhase,
    pub high_score: u64,
    /// Show the "New High Score!" banner
    pub new_high_score: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            rows: state.rows.iter().cloned().collect(),
            score: state.score,
            speed_tier: state.speed_tier(),
            phase: state.phase,
            high_score: state.high_score,
            new_high_score: state.is_new_high_score(),
        }
    }
}
