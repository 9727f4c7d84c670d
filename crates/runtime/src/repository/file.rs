//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{RepositoryError, Result, SAVE_FORMAT_VERSION, SaveRepository, SaveSlot, SaveSnapshot};

/// Stores one bincode file per slot under a base directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-save leaves the previous save intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
    resume_slot: Mutex<Option<SaveSlot>>,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            resume_slot: Mutex::new(None),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: SaveSlot) -> PathBuf {
        self.base_dir.join(slot.file_name())
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: SaveSlot, snapshot: &SaveSnapshot) -> Result<()> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("sav.tmp");

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(%slot, day = snapshot.day(), "Saved game to {}", path.display());
        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<SaveSnapshot>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot: SaveSnapshot = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if snapshot.version != SAVE_FORMAT_VERSION {
            return Err(RepositoryError::CorruptedData(format!(
                "{slot} save has format version {}, expected {SAVE_FORMAT_VERSION}",
                snapshot.version
            )));
        }

        *self
            .resume_slot
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)? = Some(slot);
        tracing::debug!(%slot, day = snapshot.day(), "Loaded game from {}", path.display());
        Ok(Some(snapshot))
    }

    fn exists(&self, slot: SaveSlot) -> bool {
        self.slot_path(slot).exists()
    }

    fn resume_slot(&self) -> Option<SaveSlot> {
        self.resume_slot.lock().ok().and_then(|slot| *slot)
    }
}
