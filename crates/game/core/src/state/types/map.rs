use super::{CastleId, Colors, Position};

/// Ground classes of the adventure map. Each carries a movement penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Terrain {
    #[default]
    Grass,
    Dirt,
    Rough,
    Sand,
    Snow,
    Swamp,
    Water,
}

impl Terrain {
    /// Movement points needed to leave a tile of this terrain orthogonally.
    pub const fn move_cost(self) -> u32 {
        match self {
            Terrain::Grass | Terrain::Dirt | Terrain::Water => 100,
            Terrain::Rough => 125,
            Terrain::Sand | Terrain::Snow => 150,
            Terrain::Swamp => 175,
        }
    }

    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::Water)
    }
}

/// Artifact identifier. Contents of artifacts are owned by the item catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArtifactId(pub u16);

impl ArtifactId {
    /// The buried artifact found by digging at the puzzle location.
    pub const ULTIMATE: Self = Self(0);
}

/// Object on a tile that reacts when a hero arrives.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileAction {
    Resource { gold: u32 },
    Artifact(ArtifactId),
    Castle(CastleId),
    Event { message: String },
}

impl TileAction {
    /// One-shot objects disappear after the first visit.
    pub const fn is_consumed_on_visit(&self) -> bool {
        !matches!(self, TileAction::Castle(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: Terrain,
    pub blocked: bool,
    pub action: Option<TileAction>,
    /// Colors for which this tile is still hidden.
    pub fog: Colors,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            blocked: false,
            action: None,
            fog: Colors::all(),
        }
    }

    /// Fogged unless at least one of `viewers` has revealed it.
    pub fn is_fog_for(&self, viewers: Colors) -> bool {
        self.fog.contains(viewers)
    }
}

/// Row-major tile grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    pub fn new(width: u32, height: u32, terrain: Terrain) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(terrain); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| (position.y as u32 * self.width + position.x as u32) as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).map(move |index| &mut self.tiles[index])
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// Hidden unless one of `viewers` revealed it. Off-map tiles count as hidden.
    pub fn is_fog(&self, position: Position, viewers: Colors) -> bool {
        self.tile(position)
            .is_none_or(|tile| tile.is_fog_for(viewers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_clears_when_any_viewer_revealed_the_tile() {
        let mut map = TileMap::new(4, 4, Terrain::Grass);
        let spot = Position::new(1, 1);
        map.tile_mut(spot).unwrap().fog.remove(Colors::RED);

        assert!(!map.is_fog(spot, Colors::RED));
        assert!(!map.is_fog(spot, Colors::RED | Colors::BLUE));
        assert!(map.is_fog(spot, Colors::BLUE));
        assert!(map.is_fog(Position::new(-1, 0), Colors::RED));
    }

    #[test]
    fn index_is_row_major() {
        let map = TileMap::new(5, 3, Terrain::Dirt);
        assert_eq!(map.index(Position::new(4, 2)), Some(14));
        assert_eq!(map.index(Position::new(5, 0)), None);
    }
}
