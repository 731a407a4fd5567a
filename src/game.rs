//! Game root
//!
//! [`Jmp`] owns the session: the stage (world, entities, camera), the fixed
//! step clock, the suspend controller, the active screen and the high score.
//! A host calls [`Jmp::frame`] once per rendered frame and [`Jmp::tap`] on
//! every tap.

use glam::Vec2;
use thiserror::Error;

use crate::config::{ConfigError, SimConfig};
use crate::entities::{Background, Ground, Wall};
use crate::highscores::{HighScore, Preferences};
use crate::renderer::DrawCommand;
use crate::screens::{GameScreen, Screen, ScreenKind, Signal, StartScreen};
use crate::sim::clock::FixedClock;
use crate::sim::entity::{EntityId, Side};
use crate::sim::state::{GameEvent, Stage, TickInput};
use crate::sim::suspend::{SuspendError, Suspender};
use crate::sim::world::PhysicsWorld;

/// Layer for the physics debug overlay
const LAYER_DEBUG: i32 = 20;
const DEBUG_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 0.35];

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Suspend(#[from] SuspendError),
}

/// Continuation run when a suspend ends
pub type Resume = Box<dyn FnOnce(&mut Jmp)>;

pub struct Jmp {
    stage: Stage,
    clock: FixedClock,
    suspender: Suspender<Resume>,
    screen: Option<Box<dyn Screen>>,
    prefs: Box<dyn Preferences>,
    high_score: HighScore,
    seed: u64,
    runs: u64,
    background: EntityId,
    debug: bool,
}

impl Jmp {
    /// Build the session and show the start screen
    pub fn new(
        config: SimConfig,
        world: Box<dyn PhysicsWorld>,
        prefs: Box<dyn Preferences>,
        seed: u64,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let clock = FixedClock::new(config.time_step, config.max_step_delta);
        let mut stage = Stage::new(config, world);

        let width = stage.config.world_width;
        let offset = stage.config.wall_offset;
        let height = stage.camera.viewport.y;

        let ground = Ground::new(&mut *stage.world, width);
        stage.spawn(Box::new(ground));
        let background = stage.spawn(Box::new(Background::new(seed, width, height)));
        for side in [Side::Left, Side::Right] {
            let wall = Wall::new(&mut *stage.world, side, width, offset, height);
            stage.spawn(Box::new(wall));
        }

        let high_score = HighScore::load(&*prefs);
        log::info!("Session ready (seed {seed}, best {})", high_score.best());

        let mut game = Self {
            stage,
            clock,
            suspender: Suspender::new(),
            screen: None,
            prefs,
            high_score,
            seed,
            runs: 0,
            background,
            debug: false,
        };
        game.set_screen(ScreenKind::Start);
        Ok(game)
    }

    /// Advance and render one frame; `delta` is the raw wall-clock delta
    pub fn frame(&mut self, delta: f32) -> Result<Vec<DrawCommand>, SimError> {
        self.step(delta)?;
        Ok(self.render(delta))
    }

    /// Catch the simulation up with `delta` seconds of wall time
    pub fn step(&mut self, delta: f32) -> Result<(), SimError> {
        let increments = self.clock.advance(delta);
        let h = self.clock.time_step();
        for _ in 0..increments {
            self.increment(h)?;
        }
        Ok(())
    }

    /// One fixed increment: either hold for a suspend or move the world
    fn increment(&mut self, h: f32) -> Result<(), SimError> {
        if self.suspender.is_suspended() {
            if self.suspender.advance(h) {
                self.unsuspend();
            }
        } else {
            self.stage.step_entities(h);
            if let Some(screen) = self.screen.as_mut().and_then(|screen| screen.as_steppable()) {
                screen.step(&mut self.stage, h);
            }
            self.stage.step_world(h);
        }
        self.handle_events()
    }

    /// Queue and collect this frame's draw commands
    pub fn render(&mut self, delta: f32) -> Vec<DrawCommand> {
        self.stage.render_entities(delta);
        if let Some(screen) = self.screen.as_mut() {
            screen.render(&mut self.stage, delta);
        }
        if self.debug {
            self.render_debug();
        }
        self.stage.flush_draw()
    }

    fn render_debug(&mut self) {
        for id in self.stage.world.bodies() {
            if let Some(body) = self.stage.world.body(id) {
                self.stage
                    .draw
                    .rect(LAYER_DEBUG, body.position, body.half_extents * 2.0, DEBUG_COLOR);
            }
        }
    }

    /// Feed a tap
    ///
    /// A suspend waiting for a tap consumes it. Taps during a suspend
    /// countdown are dropped. Otherwise the active screen gets it.
    pub fn tap(&mut self) -> Result<bool, SimError> {
        if self.suspender.awaiting_tap() {
            self.unsuspend();
            self.handle_events()?;
            return Ok(true);
        }
        if self.suspender.is_suspended() {
            return Ok(false);
        }
        let handled = match self.screen.as_mut() {
            Some(screen) => screen.tap(&mut self.stage),
            None => false,
        };
        self.handle_events()?;
        Ok(handled)
    }

    fn handle_events(&mut self) -> Result<(), SimError> {
        loop {
            let events = self.stage.take_events();
            if events.is_empty() {
                return Ok(());
            }
            for event in events {
                match event {
                    GameEvent::StartRequested => self.set_screen(ScreenKind::Game),
                    event => {
                        let signal = match self.screen.as_mut() {
                            Some(screen) => screen.on_event(&mut self.stage, event),
                            None => None,
                        };
                        if let Some(Signal::GameOver { score }) = signal {
                            self.game_over(score)?;
                        }
                    }
                }
            }
        }
    }

    /// Replace the active screen, disposing the old one
    pub fn set_screen(&mut self, kind: ScreenKind) {
        if let Some(mut old) = self.screen.take() {
            old.dispose(&mut self.stage);
        }
        let mut screen: Box<dyn Screen> = match kind {
            ScreenKind::Start => Box::new(StartScreen::new(self.high_score.best())),
            ScreenKind::Game => {
                self.runs += 1;
                let seed = self.seed.wrapping_add(self.runs);
                Box::new(GameScreen::new(self.high_score.best(), seed))
            }
        };
        screen.show(&mut self.stage);
        log::info!("Showing {kind:?} screen");
        self.screen = Some(screen);
    }

    /// Hold the world for `duration` simulated seconds, then run `on_resume`
    pub fn suspend(
        &mut self,
        duration: f32,
        tap_required: bool,
        on_resume: Resume,
    ) -> Result<(), SuspendError> {
        self.suspender.suspend(duration, tap_required, on_resume)
    }

    /// End the current suspend and run its continuation
    pub fn unsuspend(&mut self) {
        if let Some(resume) = self.suspender.release() {
            resume(self);
        }
    }

    /// Record the score and freeze until a tap restarts the game
    pub fn game_over(&mut self, score: u32) -> Result<(), SuspendError> {
        if self.suspender.has_pending() {
            return Err(SuspendError::AlreadyPending);
        }
        if self.high_score.submit(score) {
            log::info!("New high score: {score}");
            if let Err(e) = self.high_score.save(&mut *self.prefs) {
                log::warn!("Failed to save high score: {e}");
            }
        }
        log::info!("Game over with score {score}");
        let duration = self.stage.config.game_over_suspend;
        self.suspend(duration, true, Box::new(|game: &mut Jmp| game.restart()))
    }

    /// Tear down the current run and start a fresh one
    fn restart(&mut self) {
        if let Some(mut screen) = self.screen.take() {
            screen.dispose(&mut self.stage);
        }
        self.stage.camera.reset();
        self.stage.input = TickInput::default();
        if let Some(background) = self.stage.entities.get_mut(self.background) {
            background.reset(&mut *self.stage.world);
        }
        log::info!("Restarting");
        self.set_screen(ScreenKind::Game);
    }

    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.stage.camera.resize(width_px, height_px);
    }

    /// Draw every physics body on top of the frame
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Release every entity and body
    pub fn dispose(&mut self) {
        if let Some(mut screen) = self.screen.take() {
            screen.dispose(&mut self.stage);
        }
        for id in self.stage.entities.ids() {
            self.stage.despawn(id);
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspender.is_suspended()
    }

    /// Whether a tap would end the current suspend
    pub fn awaiting_tap(&self) -> bool {
        self.suspender.awaiting_tap()
    }

    pub fn screen_kind(&self) -> Option<ScreenKind> {
        self.screen.as_ref().map(|screen| screen.kind())
    }

    /// Number of runs started this session
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.stage.config
    }

    /// World-space center of the current view
    pub fn camera_position(&self) -> Vec2 {
        self.stage.camera.position
    }
}
