//! Day and turn sequencing across every kingdom.
//!
//! [`TurnScheduler`] owns the world for the length of a game session. Each
//! day it rolls the calendar, then hands the world to every live kingdom in
//! turn order: human kingdoms to a [`HumanTurnController`], computer kingdoms
//! to the [`AiExecutor`]. A game loaded from a save first skips ahead to the
//! kingdom whose turn was in progress.

use std::sync::Arc;

use game_core::{Color, Colors, Control, TurnCursor, TurnResult, World, turn_order};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::api::{
    AiExecutor, AudioSink, CollaboratorKind, Dialogs, InputSource, Renderer, RepositoryError,
    Result, RuntimeError, SilentAudio, WorldHooks,
};
use crate::config::RuntimeConfig;
use crate::events::{EventBus, TurnEvent};
use crate::hooks::StandardWorldHooks;
use crate::human::{AdventureInterface, HumanTurnController, TurnContext};
use crate::repository::SaveRepository;
use crate::visibility::VisibilityScheduler;

/// Asks a running game loop to stop at its next await point.
#[derive(Clone, Debug)]
pub struct QuitHandle(Arc<watch::Sender<bool>>);

impl QuitHandle {
    pub fn request(&self) {
        self.0.send_replace(true);
    }

    pub fn is_requested(&self) -> bool {
        *self.0.borrow()
    }
}

/// Top-level game loop.
pub struct TurnScheduler {
    world: World,
    cursor: TurnCursor,
    config: RuntimeConfig,
    hooks: Box<dyn WorldHooks>,
    ai: Box<dyn AiExecutor>,
    saves: Arc<dyn SaveRepository>,
    input: Box<dyn InputSource>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,
    dialogs: Box<dyn Dialogs>,
    events: EventBus,
    visibility: VisibilityScheduler,
    interface: AdventureInterface,
    quit_tx: Arc<watch::Sender<bool>>,
    quit: watch::Receiver<bool>,
    /// Kingdoms not yet announced as vanquished.
    in_play: Colors,
}

impl TurnScheduler {
    pub fn builder() -> TurnSchedulerBuilder {
        TurnSchedulerBuilder::new()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    pub fn cursor(&self) -> &TurnCursor {
        &self.cursor
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn visibility(&self) -> &VisibilityScheduler {
        &self.visibility
    }

    pub fn quit_handle(&self) -> QuitHandle {
        QuitHandle(Arc::clone(&self.quit_tx))
    }

    /// Plays days until a turn ends with anything other than
    /// [`TurnResult::EndTurn`].
    ///
    /// With `resumed_from_save`, the first day continues where the save left
    /// off: no new day begins, and kingdoms before the saved one are skipped.
    pub async fn run_game_loop(&mut self, resumed_from_save: bool) -> Result<TurnResult> {
        let mut pending_resume = if resumed_from_save {
            let saved = self.saved_turn_color()?;
            self.cursor.resumed = true;
            info!(target: "runtime::scheduler", %saved, day = self.world.day, "resuming saved game");
            Some(saved)
        } else {
            let colors: Vec<Color> = self.world.kingdoms().map(|kingdom| kingdom.color).collect();
            for color in colors {
                self.visibility.full_refresh(&mut self.world, color);
            }
            None
        };
        self.in_play = self.live_colors();
        let mut new_day = !resumed_from_save;

        loop {
            if new_day {
                let report = self.hooks.begin_new_day(&mut self.world);
                info!(target: "runtime::scheduler", day = report.day, "new day");
                self.events.publish(TurnEvent::DayStarted { day: report.day });
            }
            new_day = true;

            if let Some(result) = self.game_over() {
                return Ok(result);
            }

            for (color, control) in turn_order(&self.world) {
                if *self.quit.borrow() {
                    return Ok(TurnResult::Quit);
                }

                let resumed_turn = match pending_resume {
                    Some(saved) if saved != color => {
                        if control == Control::Ai {
                            return Err(self.report_resume_error(RuntimeError::ResumeMismatch {
                                saved,
                                encountered: color,
                            }));
                        }
                        debug!(target: "runtime::scheduler", %color, %saved, "skipping until saved player");
                        continue;
                    }
                    Some(saved) => {
                        pending_resume = None;
                        if !self.world.is_live(saved) {
                            return Err(
                                self.report_resume_error(RuntimeError::SavedColorMissing { saved })
                            );
                        }
                        if control == Control::Ai {
                            return Err(
                                self.report_resume_error(RuntimeError::SavedColorNotHuman { saved })
                            );
                        }
                        true
                    }
                    None => false,
                };

                if !self.world.is_live(color) {
                    continue;
                }

                self.cursor.current = Some(color);
                self.events.publish(TurnEvent::TurnStarted {
                    color,
                    control,
                    day: self.world.day,
                });

                let result = match control {
                    Control::Human => self.run_human_turn(color, resumed_turn).await?,
                    Control::Ai => self.run_ai_turn(color).await?,
                };

                if resumed_turn {
                    self.cursor.resumed = false;
                }
                self.events.publish(TurnEvent::TurnEnded { color, result });
                if result.is_terminal() {
                    self.announce_vanquished();
                    return Ok(result);
                }
                if let Some(result) = self.game_over() {
                    return Ok(result);
                }
            }

            if let Some(saved) = pending_resume {
                return Err(self.report_resume_error(RuntimeError::SavedColorMissing { saved }));
            }
            self.cursor.resumed = false;
        }
    }

    /// Color of the turn in progress when the game was saved. Falls back to
    /// the cursor when the repository did not load anything.
    fn saved_turn_color(&self) -> Result<Color> {
        match self.saves.load_saved_turn_color() {
            Ok(color) => Ok(color),
            Err(RepositoryError::NothingToResume) => self
                .cursor
                .current
                .ok_or(RuntimeError::Repository(RepositoryError::NothingToResume)),
            Err(error) => Err(error.into()),
        }
    }

    fn live_colors(&self) -> Colors {
        self.world
            .kingdoms()
            .filter(|kingdom| kingdom.is_live())
            .fold(Colors::empty(), |acc, kingdom| acc | kingdom.color.bit())
    }

    fn game_over(&mut self) -> Option<TurnResult> {
        self.announce_vanquished();
        let result = self.hooks.check_game_over(&self.world)?;
        info!(target: "runtime::scheduler", %result, "game over");
        Some(result)
    }

    /// Tells the players about every kingdom that dropped out since the last
    /// check. A lone human player is not told about their own defeat; the
    /// defeat result covers it.
    fn announce_vanquished(&mut self) {
        let gone = self.in_play - self.live_colors();
        if gone.is_empty() {
            return;
        }
        self.in_play -= gone;
        let humans = self.world.human_colors();
        let single_player = humans.colors().count() == 1;
        for color in gone.colors() {
            info!(target: "runtime::scheduler", %color, "kingdom vanquished");
            self.events.publish(TurnEvent::KingdomVanquished { color });
            if !single_player || !humans.contains(color.bit()) {
                self.dialogs
                    .message(&format!("{} player has been vanquished!", color.name()));
            }
        }
    }

    fn report_resume_error(&mut self, error: RuntimeError) -> RuntimeError {
        error!(target: "runtime::scheduler", %error, "saved game cannot be resumed");
        self.dialogs.warning(&error.to_string());
        error
    }

    async fn run_human_turn(&mut self, color: Color, resumed: bool) -> Result<TurnResult> {
        let mut controller = HumanTurnController::new(color, &self.config, resumed);
        let mut ctx = TurnContext {
            world: &mut self.world,
            cursor: &mut self.cursor,
            visibility: &mut self.visibility,
            interface: &mut self.interface,
            hooks: &mut *self.hooks,
            saves: &*self.saves,
            input: &mut *self.input,
            renderer: &mut *self.renderer,
            audio: &mut *self.audio,
            dialogs: &mut *self.dialogs,
            config: &self.config,
            events: &self.events,
            quit: &mut self.quit,
        };
        controller.run(&mut ctx).await
    }

    async fn run_ai_turn(&mut self, color: Color) -> Result<TurnResult> {
        debug!(target: "runtime::scheduler", %color, "computer turn");
        self.world.scout_kingdom(color);
        self.ai.run_kingdom_turn(&mut self.world, color).await?;
        Ok(TurnResult::EndTurn)
    }
}

/// Builder for [`TurnScheduler`].
///
/// World, AI executor, save repository, input, renderer, and dialogs are
/// required. Rules default to [`StandardWorldHooks`] and audio to
/// [`SilentAudio`].
pub struct TurnSchedulerBuilder {
    config: RuntimeConfig,
    world: Option<World>,
    cursor: TurnCursor,
    hooks: Option<Box<dyn WorldHooks>>,
    ai: Option<Box<dyn AiExecutor>>,
    saves: Option<Arc<dyn SaveRepository>>,
    input: Option<Box<dyn InputSource>>,
    renderer: Option<Box<dyn Renderer>>,
    audio: Option<Box<dyn AudioSink>>,
    dialogs: Option<Box<dyn Dialogs>>,
    events: Option<EventBus>,
}

impl TurnSchedulerBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            cursor: TurnCursor::new(),
            hooks: None,
            ai: None,
            saves: None,
            input: None,
            renderer: None,
            audio: None,
            dialogs: None,
            events: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Turn cursor restored from a save.
    pub fn cursor(mut self, cursor: TurnCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn hooks(mut self, hooks: impl WorldHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    pub fn ai(mut self, ai: impl AiExecutor + 'static) -> Self {
        self.ai = Some(Box::new(ai));
        self
    }

    /// Repository shared with the caller, which usually loads from it too.
    pub fn saves(mut self, saves: Arc<dyn SaveRepository>) -> Self {
        self.saves = Some(saves);
        self
    }

    pub fn input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn dialogs(mut self, dialogs: impl Dialogs + 'static) -> Self {
        self.dialogs = Some(Box::new(dialogs));
        self
    }

    /// Publishes onto an existing bus instead of creating one.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<TurnScheduler> {
        let missing = |kind| RuntimeError::MissingCollaborator { kind };
        let world = self.world.ok_or_else(|| missing(CollaboratorKind::World))?;
        let ai = self.ai.ok_or_else(|| missing(CollaboratorKind::Ai))?;
        let saves = self.saves.ok_or_else(|| missing(CollaboratorKind::Saves))?;
        let input = self.input.ok_or_else(|| missing(CollaboratorKind::Input))?;
        let renderer = self
            .renderer
            .ok_or_else(|| missing(CollaboratorKind::Renderer))?;
        let dialogs = self
            .dialogs
            .ok_or_else(|| missing(CollaboratorKind::Dialogs))?;

        let config = self.config;
        let hooks = self
            .hooks
            .unwrap_or_else(|| Box::new(StandardWorldHooks::new(config.game.clone())));
        let audio = self.audio.unwrap_or_else(|| Box::new(SilentAudio));
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(config.event_buffer_size));
        let visibility = VisibilityScheduler::new(config.visibility_policy(), events.clone());
        let interface = AdventureInterface::new(
            config.screen.width,
            config.screen.height,
            config.hide_interface,
        );
        let (quit_tx, quit) = watch::channel(false);

        Ok(TurnScheduler {
            world,
            cursor: self.cursor,
            config,
            hooks,
            ai,
            saves,
            input,
            renderer,
            audio,
            dialogs,
            events,
            visibility,
            interface,
            quit_tx: Arc::new(quit_tx),
            quit,
            in_play: Colors::empty(),
        })
    }
}
