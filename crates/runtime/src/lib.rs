//! Turn loop of the adventure map.
//!
//! This crate sequences kingdom turns over a [`game_core::World`], drives the
//! interactive turn of human players, and keeps fog of war in step with hero
//! movement. Everything the loop does not own (rules, AI, input, drawing,
//! dialogs, audio, persistence) is plugged in through the traits in [`api`].
//!
//! Modules are organized by responsibility:
//! - [`scheduler`] hosts the day/turn loop and its builder
//! - [`human`] runs one human turn: input routing, commands, animation timers
//! - [`focus`] and [`visibility`] keep per-turn focus and fog masks
//! - [`api`] exposes the collaborator traits downstream clients implement
//! - [`events`] provides the topic-based event bus
//! - [`hooks`] ships the standard rules, [`repository`] the save stores
pub mod api;
pub mod config;
pub mod events;
pub mod focus;
pub mod hooks;
pub mod human;
pub mod repository;
pub mod scheduler;
pub mod visibility;

pub use api::{
    AiExecutor, AudioSink, CollaboratorKind, Dialogs, Frame, InputEvent, InputSource, Key,
    MouseButton, PollOutcome, Renderer, Result, RuntimeError, ScreenPoint, ScreenRect,
    SilentAudio, WorldHooks,
};
pub use config::{AutosaveConfig, RuntimeConfig, ScreenConfig};
pub use events::{AdventureEvent, Event, EventBus, RefreshScope, Topic, TurnEvent};
pub use focus::{FocusChange, FocusManager};
pub use hooks::StandardWorldHooks;
pub use human::{AdventureInterface, Command, HumanTurnController, PanelKind, Redraw, TurnState};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SAVE_FORMAT_VERSION,
    SaveRepository, SaveSlot, SaveSnapshot,
};
pub use scheduler::{QuitHandle, TurnScheduler, TurnSchedulerBuilder};
pub use visibility::VisibilityScheduler;
