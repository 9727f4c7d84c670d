//! Game sessions: builds a scheduler per session and follows the result of
//! each game loop into the next one.
use std::sync::Arc;

use anyhow::{Context, Result};
use game_core::{TurnCursor, TurnResult, World};
use runtime::{
    Dialogs, Event, EventBus, FileSaveRepository, RuntimeConfig, SaveRepository, SaveSlot, Topic,
    TurnScheduler,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, trace, warn};

use crate::ai::PassiveAi;
use crate::config::Args;
use crate::input::TerminalInput;
use crate::presentation::{SharedScreen, TerminalDialogs, TerminalRenderer};
use crate::scenario;

/// How the next session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Start {
    New,
    Resume(SaveSlot),
}

pub struct App {
    args: Args,
    runtime: RuntimeConfig,
    saves: Arc<FileSaveRepository>,
    screen: SharedScreen,
    events: EventBus,
}

impl App {
    pub fn new(
        args: Args,
        runtime: RuntimeConfig,
        saves: Arc<FileSaveRepository>,
        screen: SharedScreen,
    ) -> Self {
        let events = EventBus::with_capacity(runtime.event_buffer_size);
        Self {
            args,
            runtime,
            saves,
            screen,
            events,
        }
    }

    pub async fn run(self) -> Result<()> {
        for topic in [Topic::Turn, Topic::Adventure] {
            tokio::spawn(log_events(self.events.subscribe(topic)));
        }

        let mut start = match self.args.resume {
            Some(slot) => Start::Resume(slot),
            None => Start::New,
        };

        loop {
            let result = match self.play(start).await {
                Ok(result) => result,
                Err(error) if matches!(start, Start::Resume(_)) => {
                    warn!(target: "kingdoms::app", error = %format!("{error:#}"), "cannot resume, starting a new game");
                    start = Start::New;
                    continue;
                }
                Err(error) => return Err(error),
            };
            info!(target: "kingdoms::app", %result, "game loop finished");

            start = match result {
                TurnResult::NewGame => Start::New,
                TurnResult::LoadGame => match self.latest_slot() {
                    Some(slot) => Start::Resume(slot),
                    None => {
                        self.dialogs().message("No saved game found, starting a new one.");
                        Start::New
                    }
                },
                TurnResult::Victory => {
                    self.dialogs()
                        .message("Victory! Every kingdom left standing is yours or allied.");
                    return Ok(());
                }
                TurnResult::Defeat => {
                    self.dialogs().message("Defeat. No human kingdom remains.");
                    return Ok(());
                }
                TurnResult::EndTurn | TurnResult::MainMenu | TurnResult::Quit => return Ok(()),
            };
        }
    }

    async fn play(&self, start: Start) -> Result<TurnResult> {
        let (world, cursor) = match start {
            Start::New => (
                scenario::demo_world(self.args.players).context("failed to build demo map")?,
                TurnCursor::new(),
            ),
            Start::Resume(slot) => {
                let snapshot = self
                    .saves
                    .load(slot)
                    .with_context(|| format!("failed to load the {slot} save"))?
                    .with_context(|| format!("no saved game in the {slot} slot"))?;
                info!(target: "kingdoms::app", %slot, day = snapshot.day(), "loaded saved game");
                (snapshot.world, snapshot.cursor)
            }
        };

        let mut scheduler = self.scheduler(world, cursor)?;
        scheduler
            .run_game_loop(matches!(start, Start::Resume(_)))
            .await
            .context("game loop failed")
    }

    fn scheduler(&self, world: World, cursor: TurnCursor) -> Result<TurnScheduler> {
        let (width, height) = self.screen.borrow().size()?;
        let config = self.runtime.clone().with_screen(width, height);

        TurnScheduler::builder()
            .config(config)
            .world(world)
            .cursor(cursor)
            .ai(PassiveAi::default())
            .saves(self.saves.clone())
            .input(TerminalInput::new())
            .renderer(TerminalRenderer::new(self.screen.clone()))
            .dialogs(self.dialogs())
            .events(self.events.clone())
            .build()
            .context("failed to assemble the turn loop")
    }

    fn dialogs(&self) -> TerminalDialogs {
        TerminalDialogs::new(self.screen.clone())
    }

    /// Quick save wins over the autosave when both exist.
    fn latest_slot(&self) -> Option<SaveSlot> {
        [SaveSlot::Quick, SaveSlot::Autosave]
            .into_iter()
            .find(|slot| self.saves.exists(*slot))
    }
}

/// Writes every event of one topic to the log as JSON.
async fn log_events(mut receiver: broadcast::Receiver<Event>) {
    loop {
        match receiver.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => trace!(target: "kingdoms::events", event = %json),
                Err(error) => warn!(target: "kingdoms::events", %error, "unserializable event"),
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!(target: "kingdoms::events", skipped, "event log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
