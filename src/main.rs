//! JMP headless runner
//!
//! Drives the game at a fixed 60 Hz frame rate with a simple autoplayer and
//! logs how the session went.
//!
//! Usage: `jmp [frames] [seed]`
//!
//! - `JMP_CONFIG`: JSON file overriding the default world constants
//! - `JMP_STORE`: JSON file holding the high score between sessions
//! - `RUST_LOG`: log filter (defaults to `info`)

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use glam::Vec2;

    use jmp::screens::ScreenKind;
    use jmp::sim::World;
    use jmp::{Jmp, JsonFilePreferences, MemoryPreferences, Preferences, SimConfig};

    const FRAME_DELTA: f32 = 1.0 / 60.0;
    const DEFAULT_FRAMES: u64 = 60 * 60;
    /// Frames between autoplayer jumps
    const JUMP_INTERVAL: u64 = 40;

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let frames = match args.next() {
            Some(arg) => arg.parse().with_context(|| format!("invalid frame count {arg:?}"))?,
            None => DEFAULT_FRAMES,
        };
        let seed = match args.next() {
            Some(arg) => arg.parse().with_context(|| format!("invalid seed {arg:?}"))?,
            None => 0x4a4d50,
        };

        let config_path = std::env::var_os("JMP_CONFIG").map(PathBuf::from);
        let config = SimConfig::load(config_path.as_deref()).context("loading config")?;
        let prefs: Box<dyn Preferences> = match std::env::var_os("JMP_STORE") {
            Some(path) => Box::new(JsonFilePreferences::open(PathBuf::from(path))),
            None => Box::new(MemoryPreferences::new()),
        };

        log::info!("JMP starting ({frames} frames, seed {seed})");
        let world = World::new(Vec2::new(0.0, -config.gravity));
        let mut game = Jmp::new(config, Box::new(world), prefs, seed)?;

        let mut drawn = 0usize;
        for frame in 0..frames {
            let on_start = game.screen_kind() == Some(ScreenKind::Start);
            if game.awaiting_tap() || on_start || frame % JUMP_INTERVAL == 0 {
                game.tap()?;
            }
            drawn += game.frame(FRAME_DELTA)?.len();
        }

        log::info!(
            "Ran {} increments over {frames} frames ({drawn} draw commands)",
            game.clock().ticks()
        );
        log::info!("Runs: {}, best score: {}", game.runs(), game.high_score());
        game.dispose();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host embeds the library directly
}
