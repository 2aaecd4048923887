//! Score-driven speed tiers

use serde::{Deserialize, Serialize};

/// Score at which the board speeds up to tier 2
pub const MEDIUM_SPEED_SCORE: u64 = 15;
/// Score at which the board speeds up to tier 3
pub const FAST_SPEED_SCORE: u64 = 35;

/// Discrete scroll speed level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum SpeedTier {
    #[default]
    Slow,
    Medium,
    Fast,
}

impl SpeedTier {
    /// Tier number as shown to the player (1-3)
    pub fn level(self) -> u8 {
        match self {
            SpeedTier::Slow => 1,
            SpeedTier::Medium => 2,
            SpeedTier::Fast => 3,
        }
    }

    /// Board units every row moves per tick
    pub fn scroll_per_tick(self) -> f32 {
        self.level() as f32
    }
}

/// Map a cumulative score to its speed tier
pub fn speed_tier_for_score(score: u64) -> SpeedTier {
    if score < MEDIUM_SPEED_SCORE {
        SpeedTier::Slow
    } else if score < FAST_SPEED_SCORE {
        SpeedTier::Medium
    } else {
        SpeedTier::Fast
    }
}
