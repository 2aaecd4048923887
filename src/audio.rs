//! Audio capability
//!
//! The simulation never touches audio directly. It emits `GameEvent`s, and an
//! `AudioSession` owned by the runner turns them into calls on an `AudioSink`.
//! Sinks are fire-and-forget: a backend that fails to play swallows the error.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Black tile cleared; one tone per column
    Tone { column: usize },
    /// Session ended
    GameOver,
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Backend that only logs (native builds, headless runs)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("play {:?}", effect);
    }

    fn start_music(&mut self) {
        log::trace!("music on");
    }

    fn stop_music(&mut self) {
        log::trace!("music off");
    }
}

/// Owned audio resource scoped to a play session
///
/// Music starts with a session and stops on game over, on reset and when the
/// session is dropped, whichever comes first.
pub struct AudioSession<S: AudioSink> {
    sink: S,
    music_playing: bool,
}

impl<S: AudioSink> AudioSession<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            music_playing: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Acquire: start background music
    pub fn begin(&mut self) {
        if !self.music_playing {
            self.sink.start_music();
            self.music_playing = true;
        }
    }

    /// Release: stop background music
    pub fn end(&mut self) {
        if self.music_playing {
            self.sink.stop_music();
            self.music_playing = false;
        }
    }

    /// Map a simulation event to playback
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::SessionStarted { .. } => self.begin(),
            GameEvent::ToneRequested { column } => self.sink.play(SoundEffect::Tone { column }),
            GameEvent::GameOver { .. } => {
                self.end();
                self.sink.play(SoundEffect::GameOver);
            }
            GameEvent::SessionReset => self.end(),
            _ => {}
        }
    }
}

impl<S: AudioSink> Drop for AudioSession<S> {
    fn drop(&mut self) {
        self.end();
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::consts::TONE_FREQUENCIES;
    use crate::settings::Settings;

    /// Web Audio backend: synthesized column tones, streamed music and game-over clip
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        game_over: Option<HtmlAudioElement>,
        sfx_volume: f32,
        music_volume: f32,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - tones disabled");
            }

            let music = HtmlAudioElement::new_with_src(&settings.music_url).ok();
            if let Some(music) = &music {
                music.set_loop(true);
                music.set_volume(settings.effective_music_volume() as f64);
            }
            let game_over = HtmlAudioElement::new_with_src(&settings.game_over_url).ok();
            if let Some(clip) = &game_over {
                clip.set_volume(settings.effective_sfx_volume() as f64);
            }

            Self {
                ctx,
                music,
                game_over,
                sfx_volume: settings.effective_sfx_volume(),
                music_volume: settings.effective_music_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Column tone - half-second sine with exponential decay
        fn play_tone(&self, column: usize) {
            let Some(ctx) = &self.ctx else { return };
            let Some(&freq) = TONE_FREQUENCIES.get(column) else {
                return;
            };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                log::warn!("Tone for column {} unavailable", column);
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.sfx_volume * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        fn play_game_over(&self) {
            let Some(clip) = &self.game_over else { return };
            clip.set_current_time(0.0);
            if clip.play().is_err() {
                log::warn!("Game over sound blocked");
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            match effect {
                SoundEffect::Tone { column } => self.play_tone(column),
                SoundEffect::GameOver => self.play_game_over(),
            }
        }

        fn start_music(&mut self) {
            if self.music_volume <= 0.0 {
                return;
            }
            let Some(music) = &self.music else { return };
            if music.play().is_err() {
                log::warn!("Autoplay blocked");
            }
        }

        fn stop_music(&mut self) {
            let Some(music) = &self.music else { return };
            let _ = music.pause();
            music.set_current_time(0.0);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::{EndReason, RowId};

    /// Sink that records every call, for assertions
    #[derive(Debug, Default)]
    pub(crate) struct RecordingAudio {
        pub calls: Vec<String>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.calls.push(format!("{:?}", effect));
        }

        fn start_music(&mut self) {
            self.calls.push("start_music".into());
        }

        fn stop_music(&mut self) {
            self.calls.push("stop_music".into());
        }
    }

    #[test]
    fn test_session_lifecycle_maps_events() {
        let mut session = AudioSession::new(RecordingAudio::default());
        session.handle(&GameEvent::SessionStarted { seed: 1 });
        assert!(session.music_playing());
        session.handle(&GameEvent::ToneRequested { column: 2 });
        session.handle(&GameEvent::MissDetected { row_id: RowId(3) });
        session.handle(&GameEvent::GameOver {
            score: 1,
            reason: EndReason::Miss,
        });
        assert!(!session.music_playing());

        assert_eq!(
            session.sink().calls,
            vec!["start_music", "Tone { column: 2 }", "stop_music", "GameOver"]
        );
    }

    #[test]
    fn test_begin_and_end_are_idempotent() {
        let mut session = AudioSession::new(RecordingAudio::default());
        session.begin();
        session.begin();
        session.end();
        session.end();
        session.handle(&GameEvent::SessionReset);
        assert_eq!(session.sink().calls, vec!["start_music", "stop_music"]);
    }

    /// Sink that shares its log so it survives the session being dropped
    struct SharedLog(std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>);

    impl AudioSink for SharedLog {
        fn play(&mut self, _effect: SoundEffect) {}

        fn start_music(&mut self) {
            self.0.borrow_mut().push("start");
        }

        fn stop_music(&mut self) {
            self.0.borrow_mut().push("stop");
        }
    }

    #[test]
    fn test_drop_releases_music() {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let mut session = AudioSession::new(SharedLog(log.clone()));
            session.begin();
        }
        assert_eq!(*log.borrow(), vec!["start", "stop"]);
    }
}
