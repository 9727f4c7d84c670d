//! Traits for everything the turn loop does not own itself.
//!
//! Runtime users plug in rules, AI, presentation, and audio so the same loop
//! can drive a terminal client, a headless test, or a scripted demo.
use async_trait::async_trait;
use game_core::{
    ActionReport, Color, DayReport, Focus, HeroId, Position, TileAction, TurnResult, World,
};

use super::errors::Result;
use super::render::Frame;

/// Rules that surround the turn loop: day rollover, victory conditions, and
/// what happens when a hero steps on an object.
pub trait WorldHooks {
    fn begin_new_day(&mut self, world: &mut World) -> DayReport;

    /// `Some` ends the game with the returned result.
    fn check_game_over(&self, world: &World) -> Option<TurnResult>;

    /// Resolves `action` for `hero`, who just settled on `tile`.
    fn hero_action(
        &mut self,
        world: &mut World,
        hero: HeroId,
        tile: Position,
        action: &TileAction,
    ) -> Result<ActionReport>;
}

/// Plays a whole turn for a computer-controlled kingdom.
#[async_trait]
pub trait AiExecutor: Send {
    async fn run_kingdom_turn(&mut self, world: &mut World, color: Color) -> Result<()>;
}

/// Draws frames of the adventure map.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);

    /// Blanks the map so the next hot-seat player sees nothing of the last one.
    fn render_hidden(&mut self);
}

pub trait AudioSink {
    fn focus_changed(&mut self, focus: Focus);
}

/// Audio sink that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn focus_changed(&mut self, _focus: Focus) {}
}

/// Modal messages. Every call blocks until the player dismisses it.
pub trait Dialogs {
    fn message(&mut self, text: &str);

    fn warning(&mut self, text: &str);

    /// `true` when the player accepts.
    fn confirm(&mut self, text: &str) -> bool;

    fn announce_player_turn(&mut self, color: Color);
}
