//! Step validation and route planning for adventure-map heroes.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, HeroId, Position, Route, World, WorldError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("hero {0} is already walking")]
    AlreadyMoving(HeroId),

    #[error("hero {0} has nowhere to go")]
    NoRoute(HeroId),

    #[error("{to} is not the next step of the route from {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("{destination} cannot be reached")]
    Unreachable { destination: Position },

    #[error("not enough movement points: {required} needed, {available} left")]
    InsufficientMovePoints { required: u32, available: u32 },

    #[error(transparent)]
    World(#[from] WorldError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        use MoveError::*;
        match self {
            InsufficientMovePoints { .. } | Blocked { .. } | Unreachable { .. } => {
                ErrorSeverity::Recoverable
            }
            AlreadyMoving(_) | NoRoute(_) | NotAdjacent { .. } => ErrorSeverity::Validation,
            World(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use MoveError::*;
        match self {
            AlreadyMoving(_) => "MOVE_ALREADY_MOVING",
            NoRoute(_) => "MOVE_NO_ROUTE",
            NotAdjacent { .. } => "MOVE_NOT_ADJACENT",
            Blocked { .. } => "MOVE_BLOCKED",
            Unreachable { .. } => "MOVE_UNREACHABLE",
            InsufficientMovePoints { .. } => "MOVE_INSUFFICIENT_POINTS",
            World(error) => error.error_code(),
        }
    }
}

/// A validated single-tile move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub hero: HeroId,
    pub from: Position,
    pub to: Position,
    pub direction: Direction,
    pub cost: u32,
}

/// Checks that `hero` may walk onto `to` right now.
pub fn validate_step(world: &World, hero: HeroId, to: Position) -> Result<Step, MoveError> {
    let walker = world.hero(hero)?;
    let from = walker.position;
    if walker.route.front() != Some(to) {
        return Err(if walker.route.is_empty() {
            MoveError::NoRoute(hero)
        } else {
            MoveError::NotAdjacent { from, to }
        });
    }
    let direction = Direction::between(from, to).ok_or(MoveError::NotAdjacent { from, to })?;
    if !world.is_passable(to) {
        return Err(MoveError::Blocked { destination: to });
    }
    let cost = world.step_cost(from, direction);
    if walker.move_points < cost {
        return Err(MoveError::InsufficientMovePoints {
            required: cost,
            available: walker.move_points,
        });
    }
    Ok(Step {
        hero,
        from,
        to,
        direction,
        cost,
    })
}

/// Cheapest route from the hero's tile to `destination`, excluding the start.
pub fn plan_route(world: &World, hero: HeroId, destination: Position) -> Result<Route, MoveError> {
    let start = world.hero(hero)?.position;
    if start == destination || !world.is_passable(destination) {
        return Err(MoveError::Unreachable { destination });
    }

    let mut best: HashMap<Position, u32> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut frontier = BinaryHeap::from([Reverse((0u32, start))]);

    while let Some(Reverse((cost, position))) = frontier.pop() {
        if position == destination {
            break;
        }
        if best.get(&position).is_some_and(|known| cost > *known) {
            continue;
        }
        for direction in Direction::ALL {
            let next = direction.apply(position);
            if !world.is_passable(next) {
                continue;
            }
            let next_cost = cost + world.step_cost(position, direction);
            if best.get(&next).is_none_or(|known| next_cost < *known) {
                best.insert(next, next_cost);
                came_from.insert(next, position);
                frontier.push(Reverse((next_cost, next)));
            }
        }
    }

    let mut steps = Vec::new();
    let mut cursor = destination;
    while cursor != start {
        steps.push(cursor);
        cursor = *came_from
            .get(&cursor)
            .ok_or(MoveError::Unreachable { destination })?;
    }
    steps.reverse();
    Ok(Route::new(steps))
}
