//! Rows and tiles
//!
//! A row is a horizontal band of `COLUMNS` tiles sharing one vertical position.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Unique row identifier (monotonic within a game state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u32);

/// A single cell within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub column: usize,
    pub is_black: bool,
    /// Flips false -> true exactly once
    pub clicked: bool,
}

impl Tile {
    /// True for a black tile nobody has tapped yet
    pub fn is_pending(&self) -> bool {
        self.is_black && !self.clicked
    }
}

/// A row of tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    /// Top edge of the row in board units (grows downward)
    pub y: f32,
    pub tiles: [Tile; COLUMNS],
}

impl Row {
    /// Build a row with the given black columns
    pub fn with_black_columns(id: RowId, y: f32, black: &[usize]) -> Self {
        let tiles = std::array::from_fn(|column| Tile {
            column,
            is_black: black.contains(&column),
            clicked: false,
        });
        Self { id, y, tiles }
    }

    /// Whether the row still holds a black tile that must be tapped
    pub fn has_pending_black(&self) -> bool {
        self.tiles.iter().any(Tile::is_pending)
    }

    pub fn black_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_black).count()
    }

    /// Whether the row's top edge has passed the bottom of the board
    pub fn past_board(&self) -> bool {
        self.y > BOARD_HEIGHT
    }

    /// Whether the row has scrolled fully out of view and can be dropped
    pub fn scrolled_off(&self) -> bool {
        self.y >= BOARD_HEIGHT + TILE_HEIGHT
    }

    /// Whether the whole row is inside the visible board
    pub fn fully_visible(&self) -> bool {
        self.y >= 0.0 && self.y + TILE_HEIGHT <= BOARD_HEIGHT
    }

    pub fn tile(&self, column: usize) -> Option<&Tile> {
        self.tiles.get(column)
    }

    pub fn tile_mut(&mut self, column: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(column)
    }
}

/// Generate a row with 1..=MAX_BLACK_PER_ROW black tiles in distinct random columns
pub fn generate_row<R: Rng>(rng: &mut R, id: RowId, y: f32) -> Row {
    let black_count = rng.random_range(1..=MAX_BLACK_PER_ROW);
    let black = index::sample(rng, COLUMNS, black_count).into_vec();
    Row::with_black_columns(id, y, &black)
}
