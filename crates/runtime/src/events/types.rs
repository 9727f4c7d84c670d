//! Event types for different topics.

use game_core::{Color, Control, Focus, HeroId, Position, Region, Tick, TurnResult};
use serde::{Deserialize, Serialize};

use crate::human::PanelKind;

/// Day and turn boundaries, published by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    DayStarted {
        day: u32,
    },
    TurnStarted {
        color: Color,
        control: Control,
        day: u32,
    },
    TurnEnded {
        color: Color,
        result: TurnResult,
    },
    /// The kingdom owns nothing any more and drops out of the turn order.
    KingdomVanquished {
        color: Color,
    },
}

/// Which tiles a visibility refresh recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshScope {
    Full,
    Region(Region),
    /// The whole map was revealed first.
    ClearAll,
}

/// What happens inside a human turn, stamped with the loop's logical tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdventureEvent {
    HeroStepStarted {
        hero: HeroId,
        from: Position,
        to: Position,
        tick: Tick,
    },
    AnimationTick {
        hero: HeroId,
        frames_remaining: u32,
        tick: Tick,
    },
    HeroArrived {
        hero: HeroId,
        tile: Position,
        tick: Tick,
    },
    ActionFired {
        hero: HeroId,
        tile: Position,
        tick: Tick,
    },
    FocusChanged {
        color: Color,
        focus: Focus,
    },
    VisibilityRefreshed {
        color: Color,
        scope: RefreshScope,
    },
    InputDispatched {
        consumer: PanelKind,
        tick: Tick,
    },
    Rendered {
        color: Color,
        tick: Tick,
    },
}
