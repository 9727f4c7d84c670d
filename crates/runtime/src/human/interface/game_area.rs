//! The scrolling adventure map view.

use game_core::{Direction, Focus, Position, World};

use crate::api::{InputEvent, MouseButton, ScreenPoint, ScreenRect};
use crate::human::commands::Command;

use super::{ConsumerContext, InputConsumer, PanelKind, Redraw};

/// Terminal cells per map tile, horizontally. Rows map one to one.
pub const TILE_CELLS: u16 = 2;

/// Window of map tiles currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    origin: Position,
    columns: u32,
    rows: u32,
}

impl Viewport {
    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.origin.x
            && position.y >= self.origin.y
            && position.x < self.origin.x + self.columns as i32
            && position.y < self.origin.y + self.rows as i32
    }

    /// Puts `position` in the middle of the window, as far as the map allows.
    pub fn center_on(&mut self, position: Position, world: &World) {
        let origin = position.offset(-(self.columns as i32 / 2), -(self.rows as i32 / 2));
        self.origin = self.clamped(origin, world);
    }

    /// Moves the window one tile. Returns `false` at the map edge.
    pub fn scroll(&mut self, direction: Direction, world: &World) -> bool {
        let origin = self.clamped(direction.apply(self.origin), world);
        let moved = origin != self.origin;
        self.origin = origin;
        moved
    }

    fn clamped(&self, origin: Position, world: &World) -> Position {
        let max_x = (world.map.width() as i32 - self.columns as i32).max(0);
        let max_y = (world.map.height() as i32 - self.rows as i32).max(0);
        Position::new(origin.x.clamp(0, max_x), origin.y.clamp(0, max_y))
    }
}

pub struct GameArea {
    rect: ScreenRect,
    viewport: Viewport,
    cursor: Option<Position>,
    scroll: Option<Direction>,
}

impl GameArea {
    pub(super) fn new() -> Self {
        Self {
            rect: ScreenRect::default(),
            viewport: Viewport::default(),
            cursor: None,
            scroll: None,
        }
    }

    pub(super) fn place(&mut self, rect: ScreenRect) {
        self.rect = rect;
        self.viewport.columns = u32::from(rect.width / TILE_CELLS);
        self.viewport.rows = u32::from(rect.height);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Tile under the pointer, if the pointer is over the map.
    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    /// Direction the view should scroll while the pointer rests on the border.
    pub fn scroll_request(&self) -> Option<Direction> {
        self.scroll
    }

    pub fn stop_scrolling(&mut self) {
        self.scroll = None;
    }

    /// Map tile drawn at `point`.
    pub fn tile_at(&self, point: ScreenPoint) -> Option<Position> {
        if !self.rect.contains(point) {
            return None;
        }
        let column = (point.x - self.rect.x) / TILE_CELLS;
        let row = point.y - self.rect.y;
        Some(self.viewport.origin.offset(i32::from(column), i32::from(row)))
    }

    /// Screen cell where `position` is drawn, if it is on screen.
    pub fn cell_of(&self, position: Position) -> Option<ScreenPoint> {
        if !self.viewport.contains(position) {
            return None;
        }
        let column = (position.x - self.viewport.origin.x) as u16;
        let row = (position.y - self.viewport.origin.y) as u16;
        Some(ScreenPoint::new(
            self.rect.x + column * TILE_CELLS,
            self.rect.y + row,
        ))
    }

    fn edge(&self, point: ScreenPoint) -> Option<Direction> {
        let left = point.x == self.rect.x;
        let right = point.x + 1 == self.rect.right();
        let top = point.y == self.rect.y;
        let bottom = point.y + 1 == self.rect.bottom();
        match (left, right, top, bottom) {
            (true, _, true, _) => Some(Direction::TopLeft),
            (_, true, true, _) => Some(Direction::TopRight),
            (true, _, _, true) => Some(Direction::BottomLeft),
            (_, true, _, true) => Some(Direction::BottomRight),
            (true, ..) => Some(Direction::Left),
            (_, true, ..) => Some(Direction::Right),
            (_, _, true, _) => Some(Direction::Top),
            (.., true) => Some(Direction::Bottom),
            _ => None,
        }
    }

    fn click(&self, tile: Position, context: &ConsumerContext<'_>) -> Option<Command> {
        let world = context.world;
        let own_hero = world
            .hero_at(tile)
            .filter(|id| world.hero(*id).is_ok_and(|hero| hero.is_owned_by(context.color)));
        if let Some(hero) = own_hero {
            return Some(if context.focus == Focus::Hero(hero) {
                Command::OpenFocus
            } else {
                Command::FocusHero(hero)
            });
        }
        if context.focus.hero().is_some() {
            return Some(Command::MoveFocusedHeroTo(tile));
        }
        let own_castle = world
            .castle_at(tile)
            .filter(|id| world.castle(*id).is_ok_and(|castle| castle.is_owned_by(context.color)));
        own_castle.map(|castle| {
            if context.focus == Focus::Castle(castle) {
                Command::OpenFocus
            } else {
                Command::FocusCastle(castle)
            }
        })
    }
}

impl InputConsumer for GameArea {
    fn kind(&self) -> PanelKind {
        PanelKind::GameArea
    }

    fn rect(&self) -> ScreenRect {
        self.rect
    }

    fn queue_event_processing(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Vec<Command> {
        match *event {
            InputEvent::MouseMove { point } | InputEvent::MouseDrag { point } => {
                self.scroll = self.edge(point);
                let cursor = self.tile_at(point);
                if cursor == self.cursor {
                    return Vec::new();
                }
                self.cursor = cursor;
                vec![Command::Redraw(Redraw::GAME_AREA)]
            }
            InputEvent::MouseDown { point, button } => {
                let Some(tile) = self
                    .tile_at(point)
                    .filter(|tile| context.world.map.contains(*tile))
                else {
                    return Vec::new();
                };
                match button {
                    MouseButton::Left => self.click(tile, context).into_iter().collect(),
                    MouseButton::Right => vec![Command::QuickInfo(tile)],
                }
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Color, Control, Terrain, TileMap};

    fn world() -> World {
        let mut world = World::new(TileMap::new(50, 40, Terrain::Grass));
        world.add_kingdom(Color::Red, Control::Human).unwrap();
        world
    }

    fn area() -> GameArea {
        let mut area = GameArea::new();
        area.place(ScreenRect::new(0, 0, 40, 20));
        area
    }

    #[test]
    fn center_clamps_to_the_map() {
        let world = world();
        let mut area = area();

        area.viewport_mut().center_on(Position::new(25, 20), &world);
        assert_eq!(area.viewport().origin(), Position::new(15, 10));

        area.viewport_mut().center_on(Position::new(1, 1), &world);
        assert_eq!(area.viewport().origin(), Position::ORIGIN);

        area.viewport_mut().center_on(Position::new(49, 39), &world);
        assert_eq!(area.viewport().origin(), Position::new(30, 20));
        assert!(!area.viewport_mut().scroll(Direction::BottomRight, &world));
    }

    #[test]
    fn clicks_map_to_tiles_through_the_viewport() {
        let world = world();
        let mut area = area();
        area.viewport_mut().center_on(Position::new(25, 20), &world);

        assert_eq!(area.tile_at(ScreenPoint::new(5, 3)), Some(Position::new(17, 13)));
        assert_eq!(area.cell_of(Position::new(17, 13)), Some(ScreenPoint::new(4, 3)));
    }

    #[test]
    fn border_requests_scrolling() {
        let world = world();
        let mut area = area();
        let context = ConsumerContext {
            world: &world,
            color: Color::Red,
            focus: Focus::None,
            screen: ScreenRect::new(0, 0, 64, 20),
        };

        area.queue_event_processing(
            &InputEvent::MouseMove {
                point: ScreenPoint::new(39, 10),
            },
            &context,
        );
        assert_eq!(area.scroll_request(), Some(Direction::Right));

        area.queue_event_processing(
            &InputEvent::MouseMove {
                point: ScreenPoint::new(0, 0),
            },
            &context,
        );
        assert_eq!(area.scroll_request(), Some(Direction::TopLeft));

        area.queue_event_processing(
            &InputEvent::MouseMove {
                point: ScreenPoint::new(10, 10),
            },
            &context,
        );
        assert_eq!(area.scroll_request(), None);
    }

    #[test]
    fn clicking_with_a_hero_focused_moves_it() {
        let mut world = world();
        let hero = world
            .spawn_hero(Color::Red, "Talan", Position::new(2, 2))
            .unwrap();
        let mut area = area();
        let context = ConsumerContext {
            world: &world,
            color: Color::Red,
            focus: Focus::Hero(hero),
            screen: ScreenRect::new(0, 0, 64, 20),
        };

        let on_hero = area.queue_event_processing(&InputEvent::click(4, 2), &context);
        assert_eq!(on_hero, vec![Command::OpenFocus]);

        let elsewhere = area.queue_event_processing(&InputEvent::click(6, 2), &context);
        assert_eq!(elsewhere, vec![Command::MoveFocusedHeroTo(Position::new(3, 2))]);
    }
}
