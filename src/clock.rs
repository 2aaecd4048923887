//! Tick sources
//!
//! The runner asks its tick source how many ticks are due each frame. Hosts
//! feed wall-clock time into a `FixedStepClock`; tests and headless drivers
//! queue ticks by hand with `ManualTicks`.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Source of scheduling ticks
pub trait TickSource {
    /// Take the ticks that are due now
    fn take_due(&mut self) -> u32;

    /// Drop every pending tick (session ended or was reset)
    fn cancel(&mut self);
}

/// Fixed timestep accumulator driven by frame deltas
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Record elapsed frame time in seconds
    pub fn advance(&mut self, dt: f32) {
        // Clamp long frames (tab switch, debugger) so we don't replay seconds of ticks
        self.accumulator += dt.clamp(0.0, 0.1);
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl TickSource for FixedStepClock {
    fn take_due(&mut self) -> u32 {
        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Spiral of death guard: whatever we could not run this frame is dropped
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    fn cancel(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Ticks queued explicitly
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    pending: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ticks: u32) {
        self.pending = self.pending.saturating_add(ticks);
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }
}

impl TickSource for ManualTicks {
    fn take_due(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    fn cancel(&mut self) {
        self.pending = 0;
    }
}
