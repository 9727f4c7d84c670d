mod castle;
mod color;
mod common;
mod focus;
mod hero;
mod kingdom;
mod map;
mod route;
mod turn;

pub use castle::{Castle, CastleId};
pub use color::{Color, Colors};
pub use common::{PixelOffset, Position, Region, Tick};
pub use focus::{Focus, FocusKind};
pub use hero::{Hero, HeroId};
pub use kingdom::{Control, Kingdom};
pub use map::{ArtifactId, Terrain, Tile, TileAction, TileMap};
pub use route::{Direction, Route};
pub use turn::{TurnCursor, TurnResult};
