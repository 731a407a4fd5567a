//! Full-session tests driving the game loop headlessly

use glam::Vec2;

use jmp::highscores::HIGH_SCORE_KEY;
use jmp::renderer::DrawCommand;
use jmp::sim::World;
use jmp::{Jmp, JsonFilePreferences, MemoryPreferences, Preferences, ScreenKind, SimConfig};

const FRAME: f32 = 1.0 / 60.0;
/// Upper bound on frames spent waiting for something to happen
const PATIENCE: usize = 60 * 30;

fn new_game(prefs: Box<dyn Preferences>, seed: u64) -> Jmp {
    let config = SimConfig::default();
    let world = World::new(Vec2::new(0.0, -config.gravity));
    Jmp::new(config, Box::new(world), prefs, seed).unwrap()
}

/// Run frames until the game waits for a restart tap
fn run_until_game_over(game: &mut Jmp) -> usize {
    for frame in 0..PATIENCE {
        if game.awaiting_tap() {
            return frame;
        }
        game.frame(FRAME).unwrap();
    }
    panic!("game never ended");
}

#[test]
fn test_single_jump_scores_then_falls_out_of_view() {
    let mut game = new_game(Box::new(MemoryPreferences::new()), 7);
    assert_eq!(game.screen_kind(), Some(ScreenKind::Start));

    game.tap().unwrap();
    assert_eq!(game.screen_kind(), Some(ScreenKind::Game));
    game.tap().unwrap();

    run_until_game_over(&mut game);
    // One wall reached before the view climbed past the player
    assert_eq!(game.high_score(), 1);
    assert!(game.is_suspended());

    // World is frozen while waiting
    let camera = game.camera_position();
    for _ in 0..30 {
        game.frame(FRAME).unwrap();
    }
    assert_eq!(game.camera_position(), camera);

    assert!(game.tap().unwrap());
    assert!(!game.is_suspended());
    assert_eq!(game.runs(), 2);
    assert_eq!(game.screen_kind(), Some(ScreenKind::Game));
}

#[test]
fn test_idle_run_never_ends() {
    let mut game = new_game(Box::new(MemoryPreferences::new()), 7);
    game.tap().unwrap();

    // Without a first jump the view stays put and the player stays safe
    for _ in 0..600 {
        game.frame(FRAME).unwrap();
    }
    assert!(!game.is_suspended());
    assert_eq!(game.high_score(), 0);
}

#[test]
fn test_frame_work_is_bounded_after_a_stall() {
    let mut game = new_game(Box::new(MemoryPreferences::new()), 7);
    game.frame(10.0).unwrap();
    let ticks = game.clock().ticks();
    // 0.25 s at 300 Hz
    assert!((75..=76).contains(&ticks), "ran {ticks} increments");
    assert!(game.clock().remainder() >= 0.0);
    assert!(game.clock().remainder() < f64::from(game.config().time_step));
}

#[test]
fn test_same_seed_and_taps_replay_identically() {
    let play = |seed: u64| -> Vec<DrawCommand> {
        let mut game = new_game(Box::new(MemoryPreferences::new()), seed);
        let mut last = Vec::new();
        for frame in 0..900 {
            if frame % 45 == 0 || game.awaiting_tap() {
                game.tap().unwrap();
            }
            last = game.frame(FRAME).unwrap();
        }
        last
    };
    assert_eq!(play(11), play(11));
}

#[test]
fn test_high_score_survives_sessions() {
    let path = std::env::temp_dir().join(format!("jmp-session-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let mut game = new_game(Box::new(JsonFilePreferences::open(&path)), 3);
    game.tap().unwrap();
    game.tap().unwrap();
    run_until_game_over(&mut game);
    let best = game.high_score();
    assert!(best > 0);
    game.dispose();

    let reopened = JsonFilePreferences::open(&path);
    assert_eq!(reopened.get_integer(HIGH_SCORE_KEY, 0), i64::from(best));
    let game = new_game(Box::new(reopened), 3);
    assert_eq!(game.high_score(), best);
    let _ = std::fs::remove_file(&path);
}
