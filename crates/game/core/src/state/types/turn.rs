use super::{Color, Focus};

/// Outcome of a kingdom's turn, or of the whole game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnResult {
    /// The turn ended normally; the next kingdom plays.
    EndTurn,
    NewGame,
    LoadGame,
    MainMenu,
    Quit,
    Victory,
    Defeat,
}

impl TurnResult {
    /// Everything except a normal end of turn stops the day loop.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, TurnResult::EndTurn)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, TurnResult::Victory | TurnResult::Defeat)
    }
}

/// Whose turn it is, and how the current game session was entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnCursor {
    pub current: Option<Color>,
    /// Set while a loaded game still has to reach the saved player.
    pub resumed: bool,
    /// Last human color that played on this device.
    pub last_human: Option<Color>,
    /// Focus each color held when its last turn ended.
    pub last_focus: Vec<(Color, Focus)>,
}

impl TurnCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resumed_at(color: Color) -> Self {
        Self {
            current: Some(color),
            resumed: true,
            ..Self::default()
        }
    }

    pub fn last_focus_of(&self, color: Color) -> Focus {
        self.last_focus
            .iter()
            .find(|(owner, _)| *owner == color)
            .map(|(_, focus)| *focus)
            .unwrap_or_default()
    }

    pub fn remember_focus(&mut self, color: Color, focus: Focus) {
        match self.last_focus.iter_mut().find(|(owner, _)| *owner == color) {
            Some(entry) => entry.1 = focus,
            None => self.last_focus.push((color, focus)),
        }
    }
}
