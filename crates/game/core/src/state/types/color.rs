use bitflags::bitflags;

/// Player color. Declaration order is the canonical ascending color order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Color {
    Blue,
    Green,
    Red,
    Yellow,
    Orange,
    Purple,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Yellow,
        Color::Orange,
        Color::Purple,
    ];

    /// Capitalized name used in player-facing text.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Orange => "Orange",
            Color::Purple => "Purple",
        }
    }

    pub const fn bit(self) -> Colors {
        match self {
            Color::Blue => Colors::BLUE,
            Color::Green => Colors::GREEN,
            Color::Red => Colors::RED,
            Color::Yellow => Colors::YELLOW,
            Color::Orange => Colors::ORANGE,
            Color::Purple => Colors::PURPLE,
        }
    }
}

bitflags! {
    /// Set of player colors. Used for alliances and per-tile fog.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Colors: u8 {
        const BLUE   = 1 << 0;
        const GREEN  = 1 << 1;
        const RED    = 1 << 2;
        const YELLOW = 1 << 3;
        const ORANGE = 1 << 4;
        const PURPLE = 1 << 5;
    }
}

impl Colors {
    /// Iterates the member colors in ascending order.
    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::ALL
            .into_iter()
            .filter(move |color| self.contains(color.bit()))
    }
}

impl From<Color> for Colors {
    fn from(color: Color) -> Self {
        color.bit()
    }
}
