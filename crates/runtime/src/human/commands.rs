//! Requests produced by hotkeys and interface panels.

use game_core::{CastleId, Direction, HeroId, Position};

use super::interface::{PanelKind, Redraw};

/// Everything a player can ask for during the adventure-map turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    EndTurn,
    NextHero,
    NextTown,
    /// Walks the rest of the focused hero's route.
    ContinueMovement,
    /// Toggles the focused hero between sleeping and awake.
    SleepHero,
    Dig,
    Save,
    LoadGame,
    NewGame,
    Quit,
    FocusHero(HeroId),
    FocusCastle(CastleId),
    /// Shows details of the focused hero or castle.
    OpenFocus,
    KingdomSummary,
    MoveFocusedHeroTo(Position),
    StepFocusedHero(Direction),
    CenterOn(Position),
    QuickInfo(Position),
    ToggleInterface,
    TogglePanel(PanelKind),
    /// Debug only: reveals the whole map for the current color.
    RevealMap,
    Redraw(Redraw),
}
