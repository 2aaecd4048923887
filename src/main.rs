//! Piano Tiles entry point
//!
//! The web build is driven from JS through `platform::web::WebGame`. Natively
//! there is no renderer, so this runs a headless autoplay demo and logs how
//! each session went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, Instant};

    use piano_tiles::Settings;
    use piano_tiles::audio::NullAudio;
    use piano_tiles::clock::{FixedStepClock, ManualTicks};
    use piano_tiles::consts::SIM_DT;
    use piano_tiles::runner::GameRunner;

    env_logger::init();
    log::info!("Piano Tiles (native) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Demo seed: {}", seed);

    if settings.realtime {
        let mut last = Instant::now();
        let runner = GameRunner::new(seed, NullAudio, FixedStepClock::default());
        demo::run(runner, &settings, seed, |clock: &mut FixedStepClock| {
            std::thread::sleep(Duration::from_secs_f32(SIM_DT));
            let now = Instant::now();
            clock.advance((now - last).as_secs_f32());
            last = now;
        });
    } else {
        let runner = GameRunner::new(seed, NullAudio, ManualTicks::new());
        demo::run(runner, &settings, seed, |ticks: &mut ManualTicks| ticks.push(1));
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use piano_tiles::Settings;
    use piano_tiles::audio::AudioSink;
    use piano_tiles::clock::TickSource;
    use piano_tiles::runner::GameRunner;
    use piano_tiles::sim::{Autoplayer, GamePhase};

    /// Play autoplay sessions until the tick budget runs out
    pub fn run<A: AudioSink, T: TickSource>(
        mut runner: GameRunner<A, T>,
        settings: &Settings,
        seed: u64,
        mut pace: impl FnMut(&mut T),
    ) {
        let mut bot = Autoplayer::new(seed.rotate_left(17), settings.autoplay_accuracy);
        let mut ticks_used = 0u64;
        let mut sessions = 0u32;

        while ticks_used < settings.demo_ticks {
            match runner.phase() {
                GamePhase::Idle => {
                    runner.start();
                    runner.frame();
                }
                GamePhase::Running => {
                    for tap in bot.plan(runner.state()) {
                        runner.tap(tap);
                    }
                    pace(runner.ticks_mut());
                    ticks_used += runner.frame() as u64;
                }
                GamePhase::GameOver => {
                    sessions += 1;
                    let state = runner.state();
                    log::info!(
                        "Session {}: score {} (tier {}, {} ticks){}",
                        sessions,
                        state.score,
                        state.speed_tier().level(),
                        state.time_ticks,
                        if state.is_new_high_score() { " - new high score!" } else { "" }
                    );
                    runner.reset();
                    runner.frame();
                }
            }
        }

        let state = runner.state();
        if state.is_running() {
            log::info!("Demo budget spent mid-session at score {}", state.score);
        }
        println!("Sessions finished: {}", sessions);
        println!("High score: {}", state.high_score);
        for (i, entry) in runner.leaderboard().entries.iter().enumerate() {
            println!(
                "{:>2}. {:>4}  tier {}  {:>6} ticks  {:?}",
                i + 1,
                entry.score,
                entry.tier.level(),
                entry.ticks,
                entry.reason
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
