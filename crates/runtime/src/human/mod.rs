//! The interactive turn of a human kingdom.
//!
//! [`HumanTurnController`] owns everything that lives only for one turn
//! (focus, hero animation, timers, pending redraws) and borrows the rest
//! through [`TurnContext`].

pub mod commands;
pub mod hotkeys;
pub mod interface;
mod timers;
mod turn;

use game_core::{TurnCursor, World};
use tokio::sync::watch;

use crate::api::{AudioSink, Dialogs, InputSource, Renderer, SaveRepository, WorldHooks};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::visibility::VisibilityScheduler;

pub use commands::Command;
pub use interface::{
    AdventureInterface, ConsumerContext, InputConsumer, PanelKind, PanelView, Redraw,
    StatusMode, TILE_CELLS, Viewport,
};
pub use timers::DelayTimer;
pub use turn::{HumanTurnController, TurnState};

/// Game state and collaborators a human turn works with.
pub struct TurnContext<'a> {
    pub world: &'a mut World,
    pub cursor: &'a mut TurnCursor,
    pub visibility: &'a mut VisibilityScheduler,
    pub interface: &'a mut AdventureInterface,
    pub hooks: &'a mut dyn WorldHooks,
    pub saves: &'a dyn SaveRepository,
    pub input: &'a mut dyn InputSource,
    pub renderer: &'a mut dyn Renderer,
    pub audio: &'a mut dyn AudioSink,
    pub dialogs: &'a mut dyn Dialogs,
    pub config: &'a RuntimeConfig,
    pub events: &'a EventBus,
    pub quit: &'a mut watch::Receiver<bool>,
}
