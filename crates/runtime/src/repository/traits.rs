//! Repository contract for saving and loading games.

use game_core::Color;

use super::{RepositoryError, Result, SaveSlot, SaveSnapshot};

/// Storage for whole-game snapshots, one per slot.
pub trait SaveRepository: Send + Sync {
    /// Replaces the snapshot in `slot`.
    fn save(&self, slot: SaveSlot, snapshot: &SaveSnapshot) -> Result<()>;

    /// Loads `slot` and remembers it as the slot this session resumes from.
    fn load(&self, slot: SaveSlot) -> Result<Option<SaveSnapshot>>;

    fn exists(&self, slot: SaveSlot) -> bool;

    /// Slot of the most recent successful [`load`](Self::load).
    fn resume_slot(&self) -> Option<SaveSlot>;

    /// Color whose turn was in progress when the resumed save was written.
    fn load_saved_turn_color(&self) -> Result<Color> {
        let slot = self.resume_slot().ok_or(RepositoryError::NothingToResume)?;
        let snapshot = self.load(slot)?.ok_or(RepositoryError::NotFound(slot))?;
        snapshot.cursor.current.ok_or_else(|| {
            RepositoryError::CorruptedData(format!("{slot} save has no current player"))
        })
    }
}
