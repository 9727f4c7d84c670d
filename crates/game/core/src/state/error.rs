//! World bookkeeping errors.
//!
//! Raised when a handle does not resolve or a placement breaks the map rules.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CastleId, Color, HeroId, Position};

/// Errors that occur while querying or mutating the [`World`](crate::state::World).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    #[error("hero {0} does not exist")]
    UnknownHero(HeroId),

    #[error("castle {0} does not exist")]
    UnknownCastle(CastleId),

    #[error("no kingdom plays {0}")]
    UnknownKingdom(Color),

    #[error("a kingdom already plays {0}")]
    DuplicateKingdom(Color),

    /// Position is outside the map bounds.
    #[error("position {position} is out of bounds (map size: {width}x{height})")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("position {0} is already occupied")]
    Occupied(Position),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        use WorldError::*;
        match self {
            // Dangling handles mean the registry and its users disagree
            UnknownHero(_) | UnknownCastle(_) | UnknownKingdom(_) => ErrorSeverity::Internal,
            DuplicateKingdom(_) | OutOfBounds { .. } | Occupied(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use WorldError::*;
        match self {
            UnknownHero(_) => "WORLD_UNKNOWN_HERO",
            UnknownCastle(_) => "WORLD_UNKNOWN_CASTLE",
            UnknownKingdom(_) => "WORLD_UNKNOWN_KINGDOM",
            DuplicateKingdom(_) => "WORLD_DUPLICATE_KINGDOM",
            OutOfBounds { .. } => "WORLD_OUT_OF_BOUNDS",
            Occupied(_) => "WORLD_OCCUPIED",
        }
    }
}
