use super::{CastleId, Color, Colors, HeroId};

/// Who decides a kingdom's moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Control {
    Human,
    Ai,
}

/// All assets owned by one color.
///
/// Heroes and castles are referenced by handle; the world arenas own them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kingdom {
    pub color: Color,
    pub control: Control,
    /// Allied colors, always including `color`.
    pub friends: Colors,
    pub heroes: Vec<HeroId>,
    pub castles: Vec<CastleId>,
    /// Days spent without a castle.
    pub lost_town_days: u32,
    pub gold: u32,
}

impl Kingdom {
    pub fn new(color: Color, control: Control) -> Self {
        Self {
            color,
            control,
            friends: color.bit(),
            heroes: Vec::new(),
            castles: Vec::new(),
            lost_town_days: 0,
            gold: 0,
        }
    }

    pub fn is_human(&self) -> bool {
        self.control == Control::Human
    }

    /// A kingdom stays in play while it owns anything on the map.
    pub fn is_live(&self) -> bool {
        !self.heroes.is_empty() || !self.castles.is_empty()
    }

    pub fn is_friend(&self, other: Color) -> bool {
        self.friends.contains(other.bit())
    }
}
