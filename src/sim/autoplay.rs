//! Demo bot that plays the game
//!
//! Taps every black tile as soon as its row is fully on the board. With
//! `accuracy < 1.0` it sometimes hits a white tile in the same row instead,
//! so demo sessions eventually end.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::Tap;
use super::state::GameState;

pub struct Autoplayer {
    rng: Pcg32,
    /// Probability (0-1) that a planned tap lands on the intended black tile
    accuracy: f32,
}

impl Autoplayer {
    pub fn new(seed: u64, accuracy: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }

    /// Never fumbles
    pub fn perfect(seed: u64) -> Self {
        Self::new(seed, 1.0)
    }

    /// Taps to send for the current board
    pub fn plan(&mut self, state: &GameState) -> Vec<Tap> {
        let mut taps = Vec::new();
        if !state.is_running() {
            return taps;
        }

        for row in state.rows.iter().filter(|r| r.fully_visible()) {
            for tile in row.tiles.iter().filter(|t| t.is_pending()) {
                if self.accuracy < 1.0 && !self.rng.random_bool(self.accuracy as f64) {
                    // Fumble onto a white neighbour; every row has at least one
                    if let Some(white) = row.tiles.iter().find(|t| !t.is_black) {
                        log::debug!("Autoplay fumbled onto column {}", white.column);
                        taps.push(Tap::new(row.id, white.column, false));
                        return taps;
                    }
                }
                taps.push(Tap::new(row.id, tile.column, true));
            }
        }
        taps
    }
}
