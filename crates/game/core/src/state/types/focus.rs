use super::{CastleId, HeroId};

/// The single entity the player is interacting with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Focus {
    #[default]
    None,
    Hero(HeroId),
    Castle(CastleId),
}

impl Focus {
    pub fn hero(self) -> Option<HeroId> {
        match self {
            Focus::Hero(id) => Some(id),
            _ => None,
        }
    }

    pub fn castle(self) -> Option<CastleId> {
        match self {
            Focus::Castle(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Focus::None)
    }
}

/// Preference used when focus has to be chosen again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusKind {
    /// First hero that can still move, else the first castle.
    FirstHero,
    /// Keep the current hero, else any hero, else a castle.
    Heroes,
    /// Keep the current castle, else any castle, else a hero.
    Castle,
}
