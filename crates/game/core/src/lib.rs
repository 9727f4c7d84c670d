//! Adventure-map rules and data types shared by the turn runtime and clients.
//!
//! `game-core` owns the world model (kingdoms, heroes, castles, tiles), the
//! fog-of-war math, hero movement animation and the kingdom turn order. It
//! performs no I/O and never blocks, so the runtime can drive it from a
//! single-threaded event loop and tests can step it tick by tick.
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use config::GameConfig;
pub use engine::{
    ActionError, ActionReport, Arrival, DigOutcome, FogDirections, HeroMotion,
    HeroMovementAnimator, MotionPhase, MoveError, Step, TickOutcome, VisibilityMask,
    VisibilityPolicy, apply_tile_action, dig, plan_route, turn_order,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ArtifactId, Castle, CastleId, Color, Colors, Control, DayReport, Direction, Focus, FocusKind,
    Hero, HeroId, Kingdom, PixelOffset, Position, Region, Route, Terrain, Tick, Tile, TileAction,
    TileMap, TurnCursor, TurnResult, World, WorldError,
};
