use game_core::{TurnCursor, World};
use serde::{Deserialize, Serialize};

/// Bumped whenever the snapshot layout changes.
pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SaveSlot {
    /// Written by the turn loop at the start or end of each human turn.
    Autosave,
    /// Written when the player asks to save.
    Quick,
}

impl SaveSlot {
    pub fn file_name(self) -> &'static str {
        match self {
            SaveSlot::Autosave => "autosave.sav",
            SaveSlot::Quick => "quicksave.sav",
        }
    }
}

/// Everything needed to continue a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub version: u32,
    pub world: World,
    pub cursor: TurnCursor,
}

impl SaveSnapshot {
    pub fn capture(world: &World, cursor: &TurnCursor) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            world: world.clone(),
            cursor: cursor.clone(),
        }
    }

    pub fn day(&self) -> u32 {
        self.world.day
    }
}
