//! Serialized game driver
//!
//! `GameRunner` is the single owner of the game state. Starts, resets and taps
//! are queued as they arrive and applied in order at the next frame, each one
//! as a whole step, before that frame's ticks. Hosts that share a runner
//! between threads must put it behind a `Mutex`.

use std::collections::VecDeque;

use crate::audio::{AudioSession, AudioSink};
use crate::clock::TickSource;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, Stimulus, Tap, apply};

pub struct GameRunner<A: AudioSink, T: TickSource> {
    state: GameState,
    queue: VecDeque<Stimulus>,
    audio: AudioSession<A>,
    ticks: T,
    leaderboard: HighScores,
    /// Leaderboard rank of the last finished session
    last_rank: Option<usize>,
}

impl<A: AudioSink, T: TickSource> GameRunner<A, T> {
    pub fn new(seed: u64, audio: A, ticks: T) -> Self {
        Self {
            state: GameState::new(seed),
            queue: VecDeque::new(),
            audio: AudioSession::new(audio),
            ticks,
            leaderboard: HighScores::new(),
            last_rank: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.leaderboard
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn audio(&self) -> &AudioSession<A> {
        &self.audio
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    /// Queue a stimulus for the next frame
    pub fn push(&mut self, stimulus: Stimulus) {
        self.queue.push_back(stimulus);
    }

    pub fn start(&mut self) {
        self.push(Stimulus::Start);
    }

    pub fn reset(&mut self) {
        self.push(Stimulus::Reset);
    }

    pub fn tap(&mut self, tap: Tap) {
        self.push(Stimulus::Tap(tap));
    }

    /// Apply queued stimuli, then every tick that is due. Returns ticks applied.
    pub fn frame(&mut self) -> u32 {
        while let Some(stimulus) = self.queue.pop_front() {
            self.step(stimulus);
        }

        let mut applied = 0;
        if self.state.is_running() {
            let due = self.ticks.take_due();
            for _ in 0..due {
                if !self.state.is_running() {
                    break;
                }
                self.step(Stimulus::Tick);
                applied += 1;
            }
        }

        if !self.state.is_running() {
            self.ticks.cancel();
        }
        applied
    }

    /// Apply one stimulus and route its side effects
    fn step(&mut self, stimulus: Stimulus) {
        apply(&mut self.state, stimulus);

        for event in self.state.drain_events() {
            self.audio.handle(&event);
            match event {
                GameEvent::GameOver { score, reason } => {
                    self.cancel_pending_ticks();
                    self.last_rank = self.leaderboard.record(HighScoreEntry {
                        score,
                        tier: self.state.speed_tier(),
                        ticks: self.state.time_ticks,
                        reason,
                    });
                    if let Some(rank) = self.last_rank {
                        log::info!("Session ranked #{} this run", rank);
                    }
                }
                GameEvent::SessionReset => self.cancel_pending_ticks(),
                _ => {}
            }
        }
    }

    /// Drop every tick scheduled before the session ended
    fn cancel_pending_ticks(&mut self) {
        self.ticks.cancel();
        self.queue.retain(|s| *s != Stimulus::Tick);
    }
}
