//! Piano Tiles - A falling-tile rhythm game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rows, ticks, taps, game state)
//! - `runner`: Serialized stimulus queue driving the simulation
//! - `clock`: Tick sources (fixed-step frame clock, manual ticks)
//! - `audio`: Audio capability injected into the runner
//! - `highscores`: In-process leaderboard
//! - `settings`: Player preferences
//! - `platform`: Browser bindings (wasm32 only)

pub mod audio;
pub mod clock;
pub mod highscores;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use runner::GameRunner;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of tile columns on the board
    pub const COLUMNS: usize = 4;
    /// Height of one row of tiles (board units)
    pub const TILE_HEIGHT: f32 = 150.0;
    /// Height of the visible board (board units)
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Most black tiles a single row may carry (never a full row)
    pub const MAX_BLACK_PER_ROW: usize = if COLUMNS - 1 < 3 { COLUMNS - 1 } else { 3 };

    /// Rows placed on the board at session start: enough to cover the board plus one buffer row
    pub const PREFILL_ROWS: usize =
        (BOARD_HEIGHT / TILE_HEIGHT) as usize + (BOARD_HEIGHT % TILE_HEIGHT != 0.0) as usize + 1;

    /// Tone per column (C4, D4, E4, F4)
    pub const TONE_FREQUENCIES: [f32; COLUMNS] = [261.63, 293.66, 329.63, 349.23];

    /// Scheduling cadence (display refresh equivalent)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
