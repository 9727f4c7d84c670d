use std::collections::VecDeque;

use super::Position;

/// Eight-way step direction on the adventure map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    #[default]
    Bottom,
    BottomRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::TopLeft,
        Direction::Top,
        Direction::TopRight,
        Direction::Left,
        Direction::Right,
        Direction::BottomLeft,
        Direction::Bottom,
        Direction::BottomRight,
    ];

    /// Unit vector of the step. `y` grows downwards.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::TopLeft => (-1, -1),
            Direction::Top => (0, -1),
            Direction::TopRight => (1, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::BottomLeft => (-1, 1),
            Direction::Bottom => (0, 1),
            Direction::BottomRight => (1, 1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    pub fn between(from: Position, to: Position) -> Option<Direction> {
        if !from.is_adjacent(to) {
            return None;
        }
        let delta = (to.x - from.x, to.y - from.y);
        Self::ALL.into_iter().find(|direction| direction.delta() == delta)
    }

    pub const fn apply(self, position: Position) -> Position {
        let (dx, dy) = self.delta();
        position.offset(dx, dy)
    }

    /// First sprite of the walk cycle for this heading. Left-facing headings
    /// reuse the right-facing frames mirrored.
    pub const fn sprite_base(self) -> u32 {
        match self {
            Direction::Top => 0,
            Direction::TopLeft | Direction::TopRight => 9,
            Direction::Left | Direction::Right => 18,
            Direction::BottomLeft | Direction::BottomRight => 27,
            Direction::Bottom => 36,
        }
    }

    pub const fn is_mirrored(self) -> bool {
        matches!(
            self,
            Direction::TopLeft | Direction::Left | Direction::BottomLeft
        )
    }
}

/// Remaining steps a hero intends to walk, excluding its current tile.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    steps: VecDeque<Position>,
}

impl Route {
    pub fn new(steps: impl IntoIterator<Item = Position>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn front(&self) -> Option<Position> {
        self.steps.front().copied()
    }

    pub fn destination(&self) -> Option<Position> {
        self.steps.back().copied()
    }

    pub fn pop_front(&mut self) -> Option<Position> {
        self.steps.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn steps(&self) -> impl Iterator<Item = Position> + '_ {
        self.steps.iter().copied()
    }
}
