//! Adventure-map world state.
//!
//! [`World`] owns the tile grid and the hero and castle arenas. Kingdoms hold
//! handles into those arenas rather than owning the entities, so a kingdom
//! losing its assets never leaves a dangling reference behind.
mod error;
pub mod types;

pub use error::WorldError;
pub use types::{
    ArtifactId, Castle, CastleId, Color, Colors, Control, Direction, Focus, FocusKind, Hero,
    HeroId, Kingdom, PixelOffset, Position, Region, Route, Terrain, Tick, Tile, TileAction,
    TileMap, TurnCursor, TurnResult,
};

use crate::config::GameConfig;

/// Summary of what changed when a new day began.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayReport {
    pub day: u32,
    /// Kingdoms whose heroes left because they held no castle for too long.
    pub dismissed: Vec<Color>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    pub map: TileMap,
    /// Current day, starting at 1 once the first day begins.
    pub day: u32,
    /// Location of the buried ultimate artifact, if the map has one.
    pub ultimate_artifact: Option<Position>,
    /// Sorted by ascending color.
    kingdoms: Vec<Kingdom>,
    heroes: Vec<Hero>,
    castles: Vec<Castle>,
}

impl World {
    pub fn new(map: TileMap) -> Self {
        Self {
            map,
            day: 0,
            ultimate_artifact: None,
            kingdoms: Vec::new(),
            heroes: Vec::new(),
            castles: Vec::new(),
        }
    }

    // ===== kingdoms =====

    pub fn add_kingdom(&mut self, color: Color, control: Control) -> Result<(), WorldError> {
        if self.kingdom(color).is_some() {
            return Err(WorldError::DuplicateKingdom(color));
        }
        self.kingdoms.push(Kingdom::new(color, control));
        self.kingdoms.sort_by_key(|kingdom| kingdom.color);
        Ok(())
    }

    /// Makes every member of `members` a friend of every other member.
    pub fn form_alliance(&mut self, members: Colors) {
        for kingdom in &mut self.kingdoms {
            if members.contains(kingdom.color.bit()) {
                kingdom.friends |= members;
            }
        }
    }

    /// Kingdoms in ascending color order.
    pub fn kingdoms(&self) -> impl Iterator<Item = &Kingdom> {
        self.kingdoms.iter()
    }

    pub fn kingdom(&self, color: Color) -> Option<&Kingdom> {
        self.kingdoms.iter().find(|kingdom| kingdom.color == color)
    }

    pub fn kingdom_mut(&mut self, color: Color) -> Option<&mut Kingdom> {
        self.kingdoms.iter_mut().find(|kingdom| kingdom.color == color)
    }

    pub fn is_live(&self, color: Color) -> bool {
        self.kingdom(color).is_some_and(Kingdom::is_live)
    }

    /// Colors whose discoveries `color` shares. Always contains `color`.
    pub fn friends_of(&self, color: Color) -> Colors {
        self.kingdom(color)
            .map_or(color.bit(), |kingdom| kingdom.friends | color.bit())
    }

    /// Every human-controlled color, live or not.
    pub fn human_colors(&self) -> Colors {
        self.kingdoms
            .iter()
            .filter(|kingdom| kingdom.is_human())
            .fold(Colors::empty(), |acc, kingdom| acc | kingdom.color.bit())
    }

    // ===== heroes =====

    pub fn spawn_hero(
        &mut self,
        owner: Color,
        name: impl Into<String>,
        position: Position,
    ) -> Result<HeroId, WorldError> {
        self.ensure_on_map(position)?;
        if self.hero_at(position).is_some() {
            return Err(WorldError::Occupied(position));
        }
        let id = HeroId(self.heroes.len() as u32);
        self.kingdom_mut(owner)
            .ok_or(WorldError::UnknownKingdom(owner))?
            .heroes
            .push(id);
        self.heroes.push(Hero::new(id, name, owner, position));
        Ok(id)
    }

    pub fn hero(&self, id: HeroId) -> Result<&Hero, WorldError> {
        self.heroes
            .get(id.0 as usize)
            .ok_or(WorldError::UnknownHero(id))
    }

    pub fn hero_mut(&mut self, id: HeroId) -> Result<&mut Hero, WorldError> {
        self.heroes
            .get_mut(id.0 as usize)
            .ok_or(WorldError::UnknownHero(id))
    }

    /// Heroes of `color`, in recruitment order.
    pub fn heroes_of(&self, color: Color) -> impl Iterator<Item = &Hero> {
        self.kingdom(color)
            .into_iter()
            .flat_map(|kingdom| kingdom.heroes.iter())
            .filter_map(move |id| self.heroes.get(id.0 as usize))
    }

    /// Hero standing on `position`, if any.
    pub fn hero_at(&self, position: Position) -> Option<HeroId> {
        self.heroes
            .iter()
            .find(|hero| hero.owner.is_some() && hero.position == position)
            .map(|hero| hero.id)
    }

    /// Removes the hero from the map and from its kingdom.
    pub fn dismiss_hero(&mut self, id: HeroId) -> Result<(), WorldError> {
        let hero = self.hero_mut(id)?;
        let owner = hero.owner.take();
        hero.route.clear();
        hero.route_visible = false;
        if let Some(kingdom) = owner.and_then(|color| self.kingdom_mut(color)) {
            kingdom.heroes.retain(|other| *other != id);
        }
        Ok(())
    }

    // ===== castles =====

    pub fn build_castle(
        &mut self,
        owner: Option<Color>,
        name: impl Into<String>,
        position: Position,
    ) -> Result<CastleId, WorldError> {
        self.ensure_on_map(position)?;
        if self.castle_at(position).is_some() {
            return Err(WorldError::Occupied(position));
        }
        let id = CastleId(self.castles.len() as u32);
        if let Some(color) = owner {
            self.kingdom_mut(color)
                .ok_or(WorldError::UnknownKingdom(color))?
                .castles
                .push(id);
        }
        self.castles.push(Castle::new(id, name, owner, position));
        if let Some(tile) = self.map.tile_mut(position) {
            tile.action = Some(TileAction::Castle(id));
        }
        Ok(id)
    }

    pub fn castle(&self, id: CastleId) -> Result<&Castle, WorldError> {
        self.castles
            .get(id.0 as usize)
            .ok_or(WorldError::UnknownCastle(id))
    }

    pub fn castle_mut(&mut self, id: CastleId) -> Result<&mut Castle, WorldError> {
        self.castles
            .get_mut(id.0 as usize)
            .ok_or(WorldError::UnknownCastle(id))
    }

    pub fn castles_of(&self, color: Color) -> impl Iterator<Item = &Castle> {
        self.kingdom(color)
            .into_iter()
            .flat_map(|kingdom| kingdom.castles.iter())
            .filter_map(move |id| self.castles.get(id.0 as usize))
    }

    pub fn castle_at(&self, position: Position) -> Option<CastleId> {
        self.castles
            .iter()
            .find(|castle| castle.position == position)
            .map(|castle| castle.id)
    }

    /// Hands the castle to `new_owner`, updating both kingdoms' handle lists.
    pub fn transfer_castle(
        &mut self,
        id: CastleId,
        new_owner: Option<Color>,
    ) -> Result<Option<Color>, WorldError> {
        let previous = self.castle(id)?.owner;
        if previous == new_owner {
            return Ok(previous);
        }
        if let Some(kingdom) = previous.and_then(|color| self.kingdom_mut(color)) {
            kingdom.castles.retain(|other| *other != id);
        }
        if let Some(color) = new_owner {
            let kingdom = self
                .kingdom_mut(color)
                .ok_or(WorldError::UnknownKingdom(color))?;
            kingdom.castles.push(id);
            kingdom.lost_town_days = 0;
        }
        self.castle_mut(id)?.owner = new_owner;
        Ok(previous)
    }

    // ===== map queries =====

    /// A hero may step onto the tile: on the map, dry, unobstructed and free.
    pub fn is_passable(&self, position: Position) -> bool {
        self.map
            .tile(position)
            .is_some_and(|tile| !tile.blocked && !tile.terrain.is_water())
            && self.hero_at(position).is_none()
    }

    /// Movement points needed to step from `from` towards `direction`.
    ///
    /// The penalty comes from the tile being left; diagonal steps cost half again.
    pub fn step_cost(&self, from: Position, direction: Direction) -> u32 {
        let base = self
            .map
            .tile(from)
            .map_or(Terrain::default().move_cost(), |tile| tile.terrain.move_cost());
        if direction.is_diagonal() {
            base * 3 / 2
        } else {
            base
        }
    }

    /// Records that `color` has seen every tile within `radius` of `center`.
    ///
    /// Only the discoverer's own bit is cleared; allies share it when a mask
    /// is computed. Returns the clipped window that may have changed, for
    /// incremental refresh.
    pub fn reveal(&mut self, center: Position, radius: u32, color: Color) -> Option<Region> {
        let window = Region::around(center, radius).clamp(self.map.width(), self.map.height())?;
        let r = radius as i32;
        let limit = r * r + r;
        for position in window.positions() {
            let (dx, dy) = (position.x - center.x, position.y - center.y);
            if dx * dx + dy * dy > limit {
                continue;
            }
            if let Some(tile) = self.map.tile_mut(position) {
                tile.fog.remove(color.bit());
            }
        }
        Some(window)
    }

    /// Reveals around every hero and castle of `color`.
    pub fn scout_kingdom(&mut self, color: Color) {
        let sights: Vec<(Position, u32)> = self
            .heroes_of(color)
            .map(|hero| (hero.position, hero.scout))
            .chain(self.castles_of(color).map(|castle| (castle.position, castle.scout)))
            .collect();
        for (position, radius) in sights {
            self.reveal(position, radius, color);
        }
    }

    /// Drops every fog bit of `color`.
    pub fn reveal_all(&mut self, color: Color) {
        for tile in self.map.tiles_mut() {
            tile.fog.remove(color.bit());
        }
    }

    // ===== day cycle =====

    /// Starts the next day: restores movement and enforces the lost-town limit.
    pub fn advance_day(&mut self, config: &GameConfig) -> DayReport {
        self.day += 1;
        for hero in self.heroes.iter_mut().filter(|hero| hero.owner.is_some()) {
            hero.move_points = hero.max_move_points;
        }

        let mut dismissed = Vec::new();
        for kingdom in &mut self.kingdoms {
            if kingdom.castles.is_empty() && !kingdom.heroes.is_empty() {
                kingdom.lost_town_days += 1;
                if kingdom.lost_town_days > config.lost_town_days {
                    dismissed.push(kingdom.color);
                }
            } else {
                kingdom.lost_town_days = 0;
            }
        }
        for color in &dismissed {
            let heroes = self
                .kingdom(*color)
                .map(|kingdom| kingdom.heroes.clone())
                .unwrap_or_default();
            for id in heroes {
                // Handles come straight from the kingdom list.
                let _ = self.dismiss_hero(id);
            }
        }

        DayReport {
            day: self.day,
            dismissed,
        }
    }

    fn ensure_on_map(&self, position: Position) -> Result<(), WorldError> {
        if self.map.contains(position) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                position,
                width: self.map.width(),
                height: self.map.height(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        let mut world = World::new(TileMap::new(12, 12, Terrain::Grass));
        world.add_kingdom(Color::Red, Control::Human).unwrap();
        world.add_kingdom(Color::Blue, Control::Ai).unwrap();
        world
    }

    #[test]
    fn kingdoms_stay_sorted_by_color() {
        let world = world();
        let order: Vec<_> = world.kingdoms().map(|kingdom| kingdom.color).collect();
        assert_eq!(order, vec![Color::Blue, Color::Red]);
    }

    #[test]
    fn losing_the_only_castle_and_hero_ends_liveness() {
        let mut world = world();
        let castle = world
            .build_castle(Some(Color::Red), "Stonehold", Position::new(2, 2))
            .unwrap();
        let hero = world
            .spawn_hero(Color::Red, "Ariane", Position::new(3, 3))
            .unwrap();
        assert!(world.is_live(Color::Red));

        world.transfer_castle(castle, Some(Color::Blue)).unwrap();
        assert!(world.is_live(Color::Red));
        world.dismiss_hero(hero).unwrap();
        assert!(!world.is_live(Color::Red));
        assert_eq!(world.kingdom(Color::Blue).unwrap().castles, vec![castle]);
    }

    #[test]
    fn scouting_records_the_discoverer_only() {
        let mut world = world();
        world.add_kingdom(Color::Green, Control::Ai).unwrap();
        world.form_alliance(Colors::RED | Colors::GREEN);
        world
            .spawn_hero(Color::Red, "Ariane", Position::new(5, 5))
            .unwrap();

        world.scout_kingdom(Color::Red);

        let tile = world.map.tile(Position::new(5, 5)).unwrap();
        assert!(!tile.fog.contains(Colors::RED));
        assert!(tile.fog.contains(Colors::GREEN));
        assert!(tile.fog.contains(Colors::BLUE));
        // The ally still sees it through the alliance.
        assert!(!world.map.is_fog(Position::new(5, 5), world.friends_of(Color::Green)));
        assert!(world.map.is_fog(Position::new(5, 5), world.friends_of(Color::Blue)));
    }

    #[test]
    fn human_colors_ignore_computer_kingdoms() {
        let mut world = world();
        world.add_kingdom(Color::Green, Control::Ai).unwrap();
        world.add_kingdom(Color::Yellow, Control::Human).unwrap();

        assert_eq!(world.human_colors(), Colors::RED | Colors::YELLOW);
    }

    #[test]
    fn kingdom_without_castles_is_dismissed_after_the_limit() {
        let mut world = world();
        let config = GameConfig::default().with_lost_town_days(2);
        world
            .spawn_hero(Color::Red, "Ariane", Position::new(1, 1))
            .unwrap();

        assert!(world.advance_day(&config).dismissed.is_empty());
        assert!(world.advance_day(&config).dismissed.is_empty());
        let report = world.advance_day(&config);

        assert_eq!(report.day, 3);
        assert_eq!(report.dismissed, vec![Color::Red]);
        assert!(!world.is_live(Color::Red));
    }

    #[test]
    fn diagonal_steps_cost_more() {
        let mut world = world();
        world.map.tile_mut(Position::new(0, 0)).unwrap().terrain = Terrain::Swamp;
        assert_eq!(world.step_cost(Position::new(0, 0), Direction::Right), 175);
        assert_eq!(
            world.step_cost(Position::new(0, 0), Direction::BottomRight),
            262
        );
        assert_eq!(world.step_cost(Position::new(4, 4), Direction::Top), 100);
    }
}
