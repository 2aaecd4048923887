//! Platform bindings
//!
//! The browser host lives here: JS owns the animation frame loop and the DOM,
//! and drives the game through `WebGame`.

#[cfg(target_arch = "wasm32")]
pub mod web;
