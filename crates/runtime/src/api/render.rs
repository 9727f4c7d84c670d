//! Snapshot handed to a [`Renderer`](super::Renderer) for one frame.
use game_core::{Color, Focus, Position, Tick, VisibilityMask, World};

use crate::human::{AdventureInterface, Redraw};

/// Everything needed to draw the adventure map for the active player.
///
/// `mask` is already up to date with every completed step of this turn.
pub struct Frame<'a> {
    pub world: &'a World,
    pub color: Color,
    pub mask: Option<&'a VisibilityMask>,
    pub focus: Focus,
    pub interface: &'a AdventureInterface,
    /// Parts that changed since the last frame.
    pub redraw: Redraw,
    pub tick: Tick,
}

impl Frame<'_> {
    /// Whether `position` is hidden for the active player.
    pub fn is_fogged(&self, position: Position) -> bool {
        self.mask.is_none_or(|mask| mask.is_fogged(position))
    }
}
