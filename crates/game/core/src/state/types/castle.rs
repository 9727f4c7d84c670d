use std::fmt;

use super::{Color, Position};
use crate::config::GameConfig;

/// Handle into the world's castle arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastleId(pub u32);

impl fmt::Display for CastleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "castle#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Castle {
    pub id: CastleId,
    pub name: String,
    /// `None` while the castle stands unclaimed.
    pub owner: Option<Color>,
    pub position: Position,
    pub scout: u32,
}

impl Castle {
    pub fn new(id: CastleId, name: impl Into<String>, owner: Option<Color>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            position,
            scout: GameConfig::DEFAULT_CASTLE_SCOUT,
        }
    }

    pub fn is_owned_by(&self, color: Color) -> bool {
        self.owner == Some(color)
    }
}
