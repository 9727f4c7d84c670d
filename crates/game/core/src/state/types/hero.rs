use std::fmt;

use super::{ArtifactId, Color, Direction, PixelOffset, Position, Route};
use crate::config::GameConfig;

/// Handle into the world's hero arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroId(pub u32);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hero#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    /// Owning kingdom. `None` once the hero has been dismissed.
    pub owner: Option<Color>,
    pub position: Position,
    pub move_points: u32,
    pub max_move_points: u32,
    pub route: Route,
    /// Whether the route is drawn on the adventure map.
    pub route_visible: bool,
    pub sleeping: bool,
    /// Fog reveal radius in tiles.
    pub scout: u32,
    pub artifacts: Vec<ArtifactId>,
    pub direction: Direction,
    pub sprite_index: u32,
    pub offset: PixelOffset,
}

impl Hero {
    pub fn new(id: HeroId, name: impl Into<String>, owner: Color, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            owner: Some(owner),
            position,
            move_points: GameConfig::DEFAULT_HERO_MOVE_POINTS,
            max_move_points: GameConfig::DEFAULT_HERO_MOVE_POINTS,
            route: Route::default(),
            route_visible: false,
            sleeping: false,
            scout: GameConfig::DEFAULT_HERO_SCOUT,
            artifacts: Vec::new(),
            direction: Direction::default(),
            sprite_index: Direction::default().sprite_base(),
            offset: PixelOffset::ZERO,
        }
    }

    #[must_use]
    pub fn with_move_points(mut self, move_points: u32) -> Self {
        self.move_points = move_points;
        self.max_move_points = move_points;
        self
    }

    #[must_use]
    pub fn with_scout(mut self, scout: u32) -> Self {
        self.scout = scout;
        self
    }

    pub fn is_owned_by(&self, color: Color) -> bool {
        self.owner == Some(color)
    }

    /// Awake, still on the map and with points left to spend.
    pub fn may_still_move(&self) -> bool {
        self.owner.is_some() && !self.sleeping && self.move_points > 0
    }

    pub fn has_full_move_points(&self) -> bool {
        self.move_points >= self.max_move_points
    }

    pub fn is_bag_full(&self) -> bool {
        self.artifacts.len() >= GameConfig::ARTIFACT_BAG_CAPACITY
    }

    /// Shows the route and wakes the hero up, as any new order does.
    pub fn set_route(&mut self, route: Route) {
        self.route = route;
        self.route_visible = !self.route.is_empty();
        self.sleeping = false;
    }

    /// Stand still, facing `direction`.
    pub fn face(&mut self, direction: Direction) {
        self.direction = direction;
        self.sprite_index = direction.sprite_base();
        self.offset = PixelOffset::ZERO;
    }
}
