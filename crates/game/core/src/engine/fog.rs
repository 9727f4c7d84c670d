//! Fog-of-war direction data.
//!
//! The renderer draws fog edges from a per-tile set of directions: a fogged
//! tile records which of its eight neighbours are fogged too, so it can pick
//! the matching border sprite. Revealed tiles carry the empty set.

use bitflags::bitflags;

use crate::state::{Color, Colors, Position, Region, World};

bitflags! {
    /// Fog shape of one tile as seen by one color.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FogDirections: u16 {
        const TOP_LEFT     = 1 << 0;
        const TOP          = 1 << 1;
        const TOP_RIGHT    = 1 << 2;
        const RIGHT        = 1 << 3;
        const BOTTOM_RIGHT = 1 << 4;
        const BOTTOM       = 1 << 5;
        const BOTTOM_LEFT  = 1 << 6;
        const LEFT         = 1 << 7;
        /// The tile itself is fogged.
        const CENTER       = 1 << 8;
    }
}

const NEIGHBOURS: [(i32, i32, FogDirections); 8] = [
    (-1, -1, FogDirections::TOP_LEFT),
    (0, -1, FogDirections::TOP),
    (1, -1, FogDirections::TOP_RIGHT),
    (1, 0, FogDirections::RIGHT),
    (1, 1, FogDirections::BOTTOM_RIGHT),
    (0, 1, FogDirections::BOTTOM),
    (-1, 1, FogDirections::BOTTOM_LEFT),
    (-1, 0, FogDirections::LEFT),
];

/// Whose discoveries count when deciding what a color sees.
///
/// Tiles only record the color that discovered them. A policy picks the set
/// of colors whose records are merged into one color's view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum VisibilityPolicy {
    /// A color sees what it or any ally has discovered.
    #[default]
    Coalition,
    /// Computer turns are shown on the map of the human players, so a
    /// watcher of an auto-controlled game keeps the humans' view. Human
    /// colors still see their coalition.
    AutoControl,
}

impl VisibilityPolicy {
    pub fn viewers(self, world: &World, color: Color) -> Colors {
        let human = world.kingdom(color).is_some_and(|kingdom| kingdom.is_human());
        match self {
            VisibilityPolicy::AutoControl if !human && !world.human_colors().is_empty() => {
                world.human_colors()
            }
            VisibilityPolicy::Coalition | VisibilityPolicy::AutoControl => world.friends_of(color),
        }
    }
}

/// Per-tile fog directions for one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityMask {
    color: Color,
    width: u32,
    height: u32,
    cells: Vec<FogDirections>,
}

impl VisibilityMask {
    /// A mask that has not been computed yet shows the whole map fogged.
    pub fn new(color: Color, width: u32, height: u32) -> Self {
        Self {
            color,
            width,
            height,
            cells: vec![FogDirections::all(); (width * height) as usize],
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, position: Position) -> FogDirections {
        self.index(position)
            .map_or(FogDirections::all(), |index| self.cells[index])
    }

    pub fn is_fogged(&self, position: Position) -> bool {
        self.get(position).contains(FogDirections::CENTER)
    }

    /// Recomputes every tile.
    pub fn recompute_all(&mut self, world: &World, viewers: Colors) {
        let whole = Region::new(
            Position::ORIGIN,
            Position::new(self.width as i32 - 1, self.height as i32 - 1),
        );
        self.recompute(world, whole, viewers);
    }

    /// Recomputes tiles inside `region`. Neighbour fog just outside the region
    /// is read but not written.
    pub fn recompute(&mut self, world: &World, region: Region, viewers: Colors) {
        let Some(region) = region.clamp(self.width, self.height) else {
            return;
        };
        for position in region.positions() {
            let directions = fog_directions(world, position, viewers);
            if let Some(index) = self.index(position) {
                self.cells[index] = directions;
            }
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let inside = position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32;
        inside.then(|| (position.y as u32 * self.width + position.x as u32) as usize)
    }
}

/// Fog shape of a single tile. Neighbours beyond the map edge count as fogged.
pub fn fog_directions(world: &World, position: Position, viewers: Colors) -> FogDirections {
    if !world.map.is_fog(position, viewers) {
        return FogDirections::empty();
    }
    NEIGHBOURS
        .iter()
        .filter(|(dx, dy, _)| world.map.is_fog(position.offset(*dx, *dy), viewers))
        .fold(FogDirections::CENTER, |acc, (_, _, bit)| acc | *bit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Control, Terrain, TileMap};

    fn world() -> World {
        let mut world = World::new(TileMap::new(6, 6, Terrain::Grass));
        world.add_kingdom(Color::Red, Control::Human).unwrap();
        world.add_kingdom(Color::Blue, Control::Ai).unwrap();
        world
    }

    #[test]
    fn revealed_tile_has_no_directions() {
        let mut world = world();
        world.reveal(Position::new(3, 3), 0, Color::Red);

        assert_eq!(
            fog_directions(&world, Position::new(3, 3), Colors::RED),
            FogDirections::empty()
        );
        // The left neighbour sees the revealed tile on its right only.
        let left = fog_directions(&world, Position::new(2, 3), Colors::RED);
        assert!(left.contains(FogDirections::CENTER));
        assert!(!left.contains(FogDirections::RIGHT));
        assert!(left.contains(FogDirections::LEFT | FogDirections::TOP_RIGHT));
    }

    #[test]
    fn corner_treats_off_map_neighbours_as_fog() {
        let world = world();
        assert_eq!(
            fog_directions(&world, Position::ORIGIN, Colors::RED),
            FogDirections::all()
        );
    }

    #[test]
    fn incremental_recompute_leaves_outside_cells_untouched() {
        let mut world = world();
        let mut mask = VisibilityMask::new(Color::Red, 6, 6);
        mask.recompute_all(&world, Colors::RED);
        let before = mask.clone();

        world.reveal(Position::new(1, 1), 0, Color::Red);
        mask.recompute(&world, Region::around(Position::new(1, 1), 0), Colors::RED);

        assert!(!mask.is_fogged(Position::new(1, 1)));
        // (2, 1) is stale until its own window is refreshed.
        assert_eq!(mask.get(Position::new(2, 1)), before.get(Position::new(2, 1)));
    }

    #[test]
    fn auto_control_shows_computer_turns_the_human_map() {
        let mut world = world();
        world
            .spawn_hero(Color::Red, "Ariane", Position::new(0, 0))
            .unwrap();
        world
            .spawn_hero(Color::Blue, "Korr", Position::new(5, 5))
            .unwrap();
        world.scout_kingdom(Color::Red);
        world.scout_kingdom(Color::Blue);

        let coalition = VisibilityPolicy::Coalition.viewers(&world, Color::Blue);
        let auto = VisibilityPolicy::AutoControl.viewers(&world, Color::Blue);

        assert!(!world.map.is_fog(Position::new(5, 5), coalition));
        assert!(world.map.is_fog(Position::new(0, 0), coalition));
        assert!(!world.map.is_fog(Position::new(0, 0), auto));
        assert!(world.map.is_fog(Position::new(5, 5), auto));
    }

    #[test]
    fn allied_discoveries_reach_a_human_under_both_policies() {
        let mut world = world();
        world.form_alliance(Colors::RED | Colors::BLUE);
        world
            .spawn_hero(Color::Blue, "Korr", Position::new(5, 5))
            .unwrap();
        world.scout_kingdom(Color::Blue);

        let mut coalition = VisibilityMask::new(Color::Red, 6, 6);
        coalition.recompute_all(&world, VisibilityPolicy::Coalition.viewers(&world, Color::Red));
        let mut auto = VisibilityMask::new(Color::Red, 6, 6);
        auto.recompute_all(&world, VisibilityPolicy::AutoControl.viewers(&world, Color::Red));

        assert!(!coalition.is_fogged(Position::new(5, 5)));
        assert_eq!(coalition, auto);
    }
}
