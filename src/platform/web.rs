//! Browser bindings
//!
//! The JS renderer calls `frame` from `requestAnimationFrame`, draws the JSON
//! snapshot, and forwards clicks through `tap`.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::clock::FixedStepClock;
use crate::runner::GameRunner;
use crate::settings::Settings;
use crate::sim::{RowId, Tap};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Piano Tiles starting...");
}

/// Game instance exported to JS
#[wasm_bindgen]
pub struct WebGame {
    runner: GameRunner<WebAudio, FixedStepClock>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            runner: GameRunner::new(seed, WebAudio::new(&settings), FixedStepClock::default()),
        }
    }

    /// Start a session (from the start screen)
    pub fn start(&mut self) {
        // Browsers only allow audio after a user gesture; start is one
        self.runner.audio().sink().resume();
        self.runner.start();
    }

    /// Back to the start screen after game over
    pub fn reset(&mut self) {
        self.runner.reset();
    }

    /// Tile clicked in the renderer
    pub fn tap(&mut self, row_id: u32, column: usize, is_black: bool) {
        self.runner.tap(Tap::new(RowId(row_id), column, is_black));
    }

    /// Advance by the frame delta (seconds); returns ticks applied
    pub fn frame(&mut self, dt: f32) -> u32 {
        if self.runner.state().is_running() {
            self.runner.ticks_mut().advance(dt);
        }
        self.runner.frame()
    }

    /// Current board as JSON for the renderer
    pub fn snapshot_json(&self) -> String {
        self.runner.snapshot().to_json()
    }

    pub fn score(&self) -> u64 {
        self.runner.state().score
    }

    pub fn high_score(&self) -> u64 {
        self.runner.state().high_score
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
