//! Repository layer for saved games.
//!
//! A save captures everything needed to continue a session: the world, the
//! turn cursor (whose turn it is and the last focus of every color), and the
//! day. Saves are written whole; there are no partial updates.

mod error;
mod file;
mod memory;
mod snapshot;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use snapshot::{SAVE_FORMAT_VERSION, SaveSlot, SaveSnapshot};
pub use traits::SaveRepository;
