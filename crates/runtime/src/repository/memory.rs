use std::collections::HashMap;
use std::sync::RwLock;

use super::{RepositoryError, Result, SaveRepository, SaveSlot, SaveSnapshot};

/// In-memory implementation of SaveRepository, for tests and demos.
#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<HashMap<SaveSlot, SaveSnapshot>>,
    resume_slot: RwLock<Option<SaveSlot>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository that already holds `snapshot` in `slot`, loaded for resuming.
    pub fn resuming(slot: SaveSlot, snapshot: SaveSnapshot) -> Self {
        Self {
            slots: RwLock::new(HashMap::from([(slot, snapshot)])),
            resume_slot: RwLock::new(Some(slot)),
        }
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: SaveSlot, snapshot: &SaveSnapshot) -> Result<()> {
        self.slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .insert(slot, snapshot.clone());
        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<SaveSnapshot>> {
        let snapshot = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .get(&slot)
            .cloned();
        if snapshot.is_some() {
            *self
                .resume_slot
                .write()
                .map_err(|_| RepositoryError::LockPoisoned)? = Some(slot);
        }
        Ok(snapshot)
    }

    fn exists(&self, slot: SaveSlot) -> bool {
        self.slots
            .read()
            .is_ok_and(|slots| slots.contains_key(&slot))
    }

    fn resume_slot(&self) -> Option<SaveSlot> {
        self.resume_slot.read().ok().and_then(|slot| *slot)
    }
}
