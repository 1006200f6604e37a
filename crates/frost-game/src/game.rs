//! Game controller
//!
//! Owns the clock, the current level, the scoreboard and the collaborator
//! seams (time, input, rendering, visuals). A host drives it by calling
//! [`Game::tick`] once per frame while [`Game::is_scheduled`] is true.
//!
//! Each running tick:
//! 1. Clock tick, producing the clamped delta
//! 2. Drain pointer input and fire at whatever was clicked
//! 3. Update phase: scene, systems in order, scoreboard countdown
//! 4. Apply shots that landed, then check for level completion
//! 5. Render and request the next frame

use crate::config::GameConfig;
use crate::level::{ClickOutcome, Level, ResolutionOutcome};
use crate::level_source::{DemoLevels, LevelSource};
use crate::render::{Renderer, TraceRenderer};
use crate::systems::Scoreboard;
use crate::visuals::{HoldingVariant, TargetVisuals};
use frost_core::{FrostError, Result};
use frost_runtime::{
    EventBus, FrameClock, GameEvent, InputSource, Lifecycle, LifecycleState, MonotonicTime,
    PointerKind, PointerQueue, TimeSource,
};
use tracing::{debug, error, info, warn};

pub struct Game {
    config: GameConfig,
    lifecycle: Lifecycle,
    clock: FrameClock,
    levels: Box<dyn LevelSource>,
    level: Option<Level>,
    scoreboard: Scoreboard,
    events: EventBus,
    input: Box<dyn InputSource>,
    renderer: Box<dyn Renderer>,
    visuals: Box<dyn TargetVisuals>,
    frame_requested: bool,
    frames: u64,
}

impl Game {
    /// A game over `levels` with monotonic time, no input, a tracing
    /// renderer and the holding-variant visuals from `config`
    pub fn new(config: GameConfig, levels: impl LevelSource + 'static) -> Self {
        let clock = FrameClock::new(MonotonicTime::new()).with_max_delta(config.max_delta_seconds);
        let visuals = HoldingVariant::new(config.holding_suffix.clone());
        let scoreboard = Scoreboard::new(config.time_per_level);
        Self {
            config,
            lifecycle: Lifecycle::new(),
            clock,
            levels: Box::new(levels),
            level: None,
            scoreboard,
            events: EventBus::new(),
            input: Box::new(PointerQueue::new()),
            renderer: Box::new(TraceRenderer::new()),
            visuals: Box::new(visuals),
            frame_requested: false,
            frames: 0,
        }
    }

    /// The built-in demo levels, `config.num_levels` of them
    pub fn demo(config: GameConfig) -> Self {
        let levels = DemoLevels::new(config.num_levels);
        Self::new(config, levels)
    }

    pub fn with_time(mut self, source: impl TimeSource + 'static) -> Self {
        self.clock = FrameClock::new(source).with_max_delta(self.config.max_delta_seconds);
        self
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_visuals(mut self, visuals: impl TargetVisuals + 'static) -> Self {
        self.visuals = Box::new(visuals);
        self
    }

    // --- Lifecycle ---

    /// Build the first level and begin running. Only valid once.
    pub fn start(&mut self) -> Result<()> {
        if self.lifecycle.is_started() {
            return Err(self.reject("start"));
        }

        let level = self.build_level(0)?;
        self.lifecycle.start()?;
        self.scoreboard.reset(self.config.time_per_level);
        self.install_level(level);
        self.clock.start();
        self.frame_requested = true;
        info!(levels = self.levels.count(), "game started");
        Ok(())
    }

    /// Stop the clock and the frame loop. Only valid while running.
    pub fn pause(&mut self) -> Result<()> {
        if let Err(err) = self.lifecycle.pause() {
            warn!(%err, "pause ignored");
            return Err(err);
        }
        self.halt();
        self.events.push(GameEvent::Paused);
        info!("game paused");
        Ok(())
    }

    /// Continue from a pause with a fresh clock reference, so the time spent
    /// paused never shows up as a delta. Only valid while paused.
    pub fn resume(&mut self) -> Result<()> {
        if let Err(err) = self.lifecycle.resume() {
            warn!(%err, "resume ignored");
            return Err(err);
        }

        let stale = self.input.drain().len();
        if stale > 0 {
            debug!(dropped = stale, "dropped pointer events queued while paused");
        }
        self.clock.start();
        self.frame_requested = true;
        self.events.push(GameEvent::Resumed);
        info!("game resumed");
        Ok(())
    }

    /// Rebuild the current level from its source and continue running. The
    /// score is kept; a countdown that already ran out gets a fresh
    /// `time_per_level`. Only valid while paused.
    pub fn restart(&mut self) -> Result<()> {
        if !self.lifecycle.is_paused() {
            let err = self.reject("restart");
            warn!(%err, "restart ignored");
            return Err(err);
        }

        let index = self.scoreboard.level();
        let level = self.build_level(index)?;
        self.lifecycle.restart()?;
        self.input.drain();
        self.scoreboard.rearm(self.config.time_per_level);
        self.install_level(level);
        self.clock.start();
        self.frame_requested = true;
        self.events.push(GameEvent::Restarted { level: index });
        info!(level = index, "level restarted");
        Ok(())
    }

    // --- Frame loop ---

    /// Run one frame. Does nothing unless running.
    ///
    /// An update-phase failure is logged and returned after the frame has
    /// still been rendered and the next one requested.
    pub fn tick(&mut self) -> Result<()> {
        if !self.lifecycle.is_running() {
            self.frame_requested = false;
            return Ok(());
        }

        let dt = self.clock.tick();
        self.dispatch_input();
        let outcome = self.update_phase(dt);
        if let Err(err) = &outcome {
            error!(%err, frame = self.frames, "update phase aborted");
        }

        if let Some(level) = &self.level {
            level.render(self.renderer.as_mut());
        }
        self.frames += 1;
        self.frame_requested = self.lifecycle.is_running();
        outcome
    }

    /// Fire at whatever is under the pointer in the current level
    pub fn handle_click(&mut self, client_x: f32, client_y: f32) -> ClickOutcome {
        let Some(level) = self.level.as_mut() else {
            return ClickOutcome::Missed;
        };
        let outcome = level.handle_click(client_x, client_y);
        if let ClickOutcome::Shot { hit, .. } = &outcome {
            self.events.push(GameEvent::ShotFired {
                level: level.index(),
                point: hit.point,
            });
        }
        outcome
    }

    fn dispatch_input(&mut self) {
        for event in self.input.drain() {
            if event.kind == PointerKind::Down {
                self.handle_click(event.client_x, event.client_y);
            }
        }
    }

    fn update_phase(&mut self, dt: f64) -> Result<()> {
        let Some(level) = self.level.as_mut() else {
            return Ok(());
        };
        level.update(dt)?;

        if self.scoreboard.on_frame(dt) {
            self.game_over(false);
            return Ok(());
        }

        let elapsed = level.scene().elapsed();
        let outcomes = level.poll_resolutions(self.visuals.as_ref());
        for outcome in outcomes {
            self.record(outcome, elapsed);
        }

        if self.level.as_ref().is_some_and(Level::is_complete) {
            self.advance_level()?;
        }
        Ok(())
    }

    fn record(&mut self, outcome: ResolutionOutcome, elapsed: f64) {
        match outcome {
            ResolutionOutcome::Resolved { entity, name } => {
                let points = self.config.points_for(elapsed);
                let score = self.scoreboard.add_score(points);
                info!(target_id = %entity, name = %name, points, score, "target resolved");
                self.events.push(GameEvent::TargetResolved {
                    entity,
                    name,
                    points,
                });
                self.events.push(GameEvent::ScoreChanged { score });
            }
            ResolutionOutcome::TargetMissing { entity } => {
                self.events.push(GameEvent::ResolutionSkipped { entity });
            }
            ResolutionOutcome::AlreadySatisfied { entity } => {
                debug!(target_id = %entity, "target already satisfied");
            }
            ResolutionOutcome::NoTarget | ResolutionOutcome::Abandoned => {}
        }
    }

    fn advance_level(&mut self) -> Result<()> {
        let index = self.scoreboard.level();
        self.events.push(GameEvent::LevelCompleted { level: index });
        info!(level = index, score = self.scoreboard.score(), "level completed");

        let next = index + 1;
        if next >= self.levels.count() {
            self.game_over(true);
            return Ok(());
        }

        match self.build_level(next) {
            Ok(level) => {
                self.scoreboard.set_level(next);
                self.scoreboard.add_time(self.config.time_per_level);
                self.install_level(level);
                Ok(())
            }
            Err(err) => {
                // Nothing left to play; stop rather than complete forever
                if self.lifecycle.pause().is_ok() {
                    self.halt();
                    self.events.push(GameEvent::Paused);
                }
                Err(err)
            }
        }
    }

    fn game_over(&mut self, won: bool) {
        let score = self.scoreboard.score();
        self.events.push(GameEvent::GameOver { won, score });
        info!(won, score, "game over");
        if self.lifecycle.pause().is_ok() {
            self.halt();
        }
    }

    fn halt(&mut self) {
        self.clock.stop();
        self.frame_requested = false;
    }

    fn build_level(&self, index: usize) -> Result<Level> {
        let scene = self.levels.build(index)?;
        Level::new(index, scene, &self.config)
    }

    fn install_level(&mut self, level: Level) {
        let index = level.index();
        let scene = level.scene().name().to_string();
        if let Some(mut old) = self.level.replace(level) {
            old.dispose();
        }
        self.scoreboard.set_level(index);
        self.events.push(GameEvent::LevelStarted { level: index, scene });
    }

    fn reject(&self, action: &str) -> FrostError {
        let from = match self.lifecycle.state() {
            Some(state) => state.to_string(),
            None => "not started".to_string(),
        };
        FrostError::invalid_transition(from, action)
    }

    // --- Accessors ---

    pub fn state(&self) -> Option<LifecycleState> {
        self.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    /// Whether the host should call [`Game::tick`] again
    pub fn is_scheduled(&self) -> bool {
        self.frame_requested
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.level.as_mut()
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }
}
