//! Sidebar panels. With the hidden interface they float over the map and can
//! be dragged by their top border.

use game_core::{Color, Focus, Position, World};

use crate::api::{InputEvent, MouseButton, ScreenPoint, ScreenRect};
use crate::human::commands::Command;

use super::{ConsumerContext, InputConsumer, PanelKind, Redraw};

#[derive(Clone, Copy, Debug, Default)]
pub(super) struct PanelFrame {
    rect: ScreenRect,
    floating: bool,
    visible: bool,
    /// Offset of the grab point from the top-left corner while dragging.
    grab: Option<(u16, u16)>,
}

impl PanelFrame {
    pub(super) fn place(&mut self, rect: ScreenRect, floating: bool) {
        *self = Self {
            rect,
            floating,
            visible: true,
            grab: None,
        };
    }

    pub(super) fn toggle(&mut self) {
        self.visible = !self.visible;
        self.grab = None;
    }

    /// Area inside the border.
    fn inner(&self) -> ScreenRect {
        ScreenRect::new(
            self.rect.x.saturating_add(1),
            self.rect.y.saturating_add(1),
            self.rect.width.saturating_sub(2),
            self.rect.height.saturating_sub(2),
        )
    }

    /// Handles dragging of floating panels. `None` leaves the event to the panel.
    fn drag(&mut self, event: &InputEvent, screen: ScreenRect) -> Option<Vec<Command>> {
        if !self.floating {
            return None;
        }
        match (*event, self.grab) {
            (
                InputEvent::MouseDown {
                    point,
                    button: MouseButton::Left,
                },
                None,
            ) if point.y == self.rect.y => {
                self.grab = Some((point.x - self.rect.x, 0));
                Some(Vec::new())
            }
            (
                InputEvent::MouseDrag { point } | InputEvent::MouseMove { point },
                Some((dx, dy)),
            ) => {
                let origin = ScreenPoint::new(point.x.saturating_sub(dx), point.y.saturating_sub(dy));
                self.rect = self.rect.moved_to(origin, screen);
                Some(vec![Command::Redraw(Redraw::all())])
            }
            (InputEvent::MouseUp { .. }, Some(_)) => {
                self.grab = None;
                Some(vec![Command::Redraw(Redraw::all())])
            }
            (InputEvent::Key(_), Some(_)) => Some(Vec::new()),
            _ => None,
        }
    }
}

/// What the status window shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum StatusMode {
    #[default]
    Day,
    Funds,
    Focus,
}

impl StatusMode {
    fn next(self) -> Self {
        match self {
            StatusMode::Day => StatusMode::Funds,
            StatusMode::Funds => StatusMode::Focus,
            StatusMode::Focus => StatusMode::Day,
        }
    }
}

pub struct StatusPanel {
    pub(super) frame: PanelFrame,
    mode: StatusMode,
}

impl StatusPanel {
    pub(super) fn new() -> Self {
        Self {
            frame: PanelFrame::default(),
            mode: StatusMode::default(),
        }
    }

    pub fn mode(&self) -> StatusMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: StatusMode) {
        self.mode = mode;
    }
}

impl InputConsumer for StatusPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Status
    }

    fn rect(&self) -> ScreenRect {
        self.frame.rect
    }

    fn is_visible(&self) -> bool {
        self.frame.visible
    }

    fn is_mouse_captured(&self) -> bool {
        self.frame.grab.is_some()
    }

    fn queue_event_processing(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Vec<Command> {
        if let Some(commands) = self.frame.drag(event, context.screen) {
            return commands;
        }
        match event {
            InputEvent::MouseDown {
                button: MouseButton::Left,
                ..
            } => {
                self.mode = self.mode.next();
                vec![Command::Redraw(Redraw::STATUS)]
            }
            _ => Vec::new(),
        }
    }
}

/// Buttons in display order.
pub const BUTTONS: [(&str, Command); 7] = [
    ("Hero", Command::NextHero),
    ("Move", Command::ContinueMovement),
    ("Realm", Command::KingdomSummary),
    ("End", Command::EndTurn),
    ("Dig", Command::Dig),
    ("Save", Command::Save),
    ("View", Command::ToggleInterface),
];

pub struct ButtonsPanel {
    pub(super) frame: PanelFrame,
}

impl ButtonsPanel {
    pub(super) fn new() -> Self {
        Self {
            frame: PanelFrame::default(),
        }
    }

    fn button_at(&self, point: ScreenPoint) -> Option<Command> {
        let inner = self.frame.inner();
        if !inner.contains(point) {
            return None;
        }
        let index = usize::from(point.x - inner.x) * BUTTONS.len() / usize::from(inner.width);
        BUTTONS.get(index).map(|(_, command)| *command)
    }
}

impl InputConsumer for ButtonsPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Buttons
    }

    fn rect(&self) -> ScreenRect {
        self.frame.rect
    }

    fn is_visible(&self) -> bool {
        self.frame.visible
    }

    fn is_mouse_captured(&self) -> bool {
        self.frame.grab.is_some()
    }

    fn queue_event_processing(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Vec<Command> {
        if let Some(commands) = self.frame.drag(event, context.screen) {
            return commands;
        }
        match event {
            InputEvent::MouseDown {
                point,
                button: MouseButton::Left,
            } => self.button_at(*point).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Lists the kingdom's heroes, then its castles, one per row.
pub struct IconsPanel {
    pub(super) frame: PanelFrame,
}

impl IconsPanel {
    pub(super) fn new() -> Self {
        Self {
            frame: PanelFrame::default(),
        }
    }

    pub fn entries(world: &World, color: Color) -> Vec<Focus> {
        world
            .heroes_of(color)
            .map(|hero| Focus::Hero(hero.id))
            .chain(world.castles_of(color).map(|castle| Focus::Castle(castle.id)))
            .collect()
    }
}

impl InputConsumer for IconsPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Icons
    }

    fn rect(&self) -> ScreenRect {
        self.frame.rect
    }

    fn is_visible(&self) -> bool {
        self.frame.visible
    }

    fn is_mouse_captured(&self) -> bool {
        self.frame.grab.is_some()
    }

    fn queue_event_processing(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Vec<Command> {
        if let Some(commands) = self.frame.drag(event, context.screen) {
            return commands;
        }
        let InputEvent::MouseDown {
            point,
            button: MouseButton::Left,
        } = event
        else {
            return Vec::new();
        };
        let inner = self.frame.inner();
        if !inner.contains(*point) {
            return Vec::new();
        }
        let row = usize::from(point.y - inner.y);
        match Self::entries(context.world, context.color).get(row) {
            Some(entry) if *entry == context.focus => vec![Command::OpenFocus],
            Some(Focus::Hero(hero)) => vec![Command::FocusHero(*hero)],
            Some(Focus::Castle(castle)) => vec![Command::FocusCastle(*castle)],
            Some(Focus::None) | None => Vec::new(),
        }
    }
}

/// Miniature of the whole map. Clicking centers the view on that spot.
pub struct Radar {
    pub(super) frame: PanelFrame,
}

impl Radar {
    pub(super) fn new() -> Self {
        Self {
            frame: PanelFrame::default(),
        }
    }

    /// Map tile drawn at `point`, scaling the map to the radar's inner area.
    pub fn tile_at(&self, world: &World, point: ScreenPoint) -> Option<Position> {
        let inner = self.frame.inner();
        if !inner.contains(point) {
            return None;
        }
        let x = u32::from(point.x - inner.x) * world.map.width() / u32::from(inner.width);
        let y = u32::from(point.y - inner.y) * world.map.height() / u32::from(inner.height);
        Some(Position::new(x as i32, y as i32))
    }
}

impl InputConsumer for Radar {
    fn kind(&self) -> PanelKind {
        PanelKind::Radar
    }

    fn rect(&self) -> ScreenRect {
        self.frame.rect
    }

    fn is_visible(&self) -> bool {
        self.frame.visible
    }

    fn is_mouse_captured(&self) -> bool {
        self.frame.grab.is_some()
    }

    fn queue_event_processing(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Vec<Command> {
        if let Some(commands) = self.frame.drag(event, context.screen) {
            return commands;
        }
        match event {
            InputEvent::MouseDown {
                point,
                button: MouseButton::Left,
            }
            | InputEvent::MouseDrag { point } => self
                .tile_at(context.world, *point)
                .map(Command::CenterOn)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Cells of the control panel, left to right.
const CONTROL_CELLS: [Command; 5] = [
    Command::TogglePanel(PanelKind::Radar),
    Command::TogglePanel(PanelKind::Icons),
    Command::TogglePanel(PanelKind::Buttons),
    Command::TogglePanel(PanelKind::Status),
    Command::EndTurn,
];

/// Width of one control panel cell.
pub const CONTROL_CELL_WIDTH: u16 = 4;

/// Toggles for the floating panels. Exists only with the hidden interface.
pub struct ControlPanel {
    pub(super) frame: PanelFrame,
}

impl ControlPanel {
    pub(super) fn new() -> Self {
        Self {
            frame: PanelFrame::default(),
        }
    }
}

impl InputConsumer for ControlPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Control
    }

    fn rect(&self) -> ScreenRect {
        self.frame.rect
    }

    fn is_visible(&self) -> bool {
        self.frame.floating && self.frame.visible
    }

    fn queue_event_processing(
        &mut self,
        event: &InputEvent,
        _context: &ConsumerContext<'_>,
    ) -> Vec<Command> {
        let InputEvent::MouseDown {
            point,
            button: MouseButton::Left,
        } = event
        else {
            return Vec::new();
        };
        let inner = self.frame.inner();
        if !inner.contains(*point) {
            return Vec::new();
        }
        let cell = usize::from((point.x - inner.x) / CONTROL_CELL_WIDTH);
        CONTROL_CELLS.get(cell).copied().into_iter().collect()
    }
}
