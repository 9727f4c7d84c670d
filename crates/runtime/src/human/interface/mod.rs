//! Adventure-map interface: panels, the game area, and pointer routing.
//!
//! Every pointer event reaches exactly one [`InputConsumer`]. A consumer that
//! holds the input grab (a panel being dragged) wins; otherwise the first
//! visible consumer in z-order whose rect contains the cursor takes it.
//! Z-order, top to bottom: status, buttons, icons, radar, control panel
//! (hidden interface only), game area.

mod game_area;
mod panels;

use bitflags::bitflags;
use game_core::{Color, Focus, World};
use serde::{Deserialize, Serialize};

use crate::api::{InputEvent, ScreenRect};

use super::commands::Command;

pub use game_area::{GameArea, TILE_CELLS, Viewport};
pub use panels::{
    BUTTONS, ButtonsPanel, CONTROL_CELL_WIDTH, ControlPanel, IconsPanel, Radar, StatusMode,
    StatusPanel,
};

bitflags! {
    /// Parts of the screen waiting to be redrawn.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Redraw: u8 {
        const GAME_AREA = 1 << 0;
        const RADAR     = 1 << 1;
        const ICONS     = 1 << 2;
        const BUTTONS   = 1 << 3;
        const STATUS    = 1 << 4;
        const CONTROL   = 1 << 5;
    }
}

/// Identifies a consumer in logs and events.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum PanelKind {
    Status,
    Buttons,
    Icons,
    Radar,
    Control,
    GameArea,
}

/// Read-only state a consumer may look at while turning an event into commands.
#[derive(Clone, Copy)]
pub struct ConsumerContext<'a> {
    pub world: &'a World,
    pub color: Color,
    pub focus: Focus,
    pub screen: ScreenRect,
}

/// A screen region that turns raw input into [`Command`]s.
pub trait InputConsumer {
    fn kind(&self) -> PanelKind;

    fn rect(&self) -> ScreenRect;

    fn is_visible(&self) -> bool {
        true
    }

    /// Holding the grab routes every pointer event here regardless of position.
    fn is_mouse_captured(&self) -> bool {
        false
    }

    fn queue_event_processing(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Vec<Command>;
}

/// Panel geometry handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelView {
    pub kind: PanelKind,
    pub rect: ScreenRect,
    pub visible: bool,
}

/// Width of the sidebar in the standard layout.
pub const SIDEBAR_WIDTH: u16 = 24;

pub struct AdventureInterface {
    screen: ScreenRect,
    hidden: bool,
    status: StatusPanel,
    buttons: ButtonsPanel,
    icons: IconsPanel,
    radar: Radar,
    control: ControlPanel,
    game_area: GameArea,
}

impl AdventureInterface {
    pub fn new(width: u16, height: u16, hidden: bool) -> Self {
        let mut interface = Self {
            screen: ScreenRect::new(0, 0, width, height),
            hidden,
            status: StatusPanel::new(),
            buttons: ButtonsPanel::new(),
            icons: IconsPanel::new(),
            radar: Radar::new(),
            control: ControlPanel::new(),
            game_area: GameArea::new(),
        };
        interface.relayout();
        interface
    }

    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn status(&self) -> &StatusPanel {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusPanel {
        &mut self.status
    }

    pub fn game_area(&self) -> &GameArea {
        &self.game_area
    }

    pub fn game_area_mut(&mut self) -> &mut GameArea {
        &mut self.game_area
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = ScreenRect::new(0, 0, width, height);
        self.relayout();
    }

    /// Switches between the sidebar layout and floating panels over a
    /// full-screen map.
    pub fn toggle_hidden(&mut self) {
        self.hidden = !self.hidden;
        self.relayout();
    }

    /// Shows or hides one floating panel. Only meaningful with the hidden
    /// interface; the sidebar always shows everything.
    pub fn toggle_panel(&mut self, kind: PanelKind) {
        if !self.hidden {
            return;
        }
        match kind {
            PanelKind::Status => self.status.frame.toggle(),
            PanelKind::Buttons => self.buttons.frame.toggle(),
            PanelKind::Icons => self.icons.frame.toggle(),
            PanelKind::Radar => self.radar.frame.toggle(),
            PanelKind::Control | PanelKind::GameArea => {}
        }
    }

    /// Current geometry of every consumer, in z-order.
    pub fn panels(&self) -> Vec<PanelView> {
        self.consumers()
            .iter()
            .map(|consumer| PanelView {
                kind: consumer.kind(),
                rect: consumer.rect(),
                visible: consumer.is_visible(),
            })
            .collect()
    }

    /// Routes a pointer event to a single consumer.
    ///
    /// Returns the consumer that took the event and the commands it produced.
    /// Events without a position, or over no visible consumer, go nowhere.
    pub fn dispatch_pointer(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Option<(PanelKind, Vec<Command>)> {
        let point = event.point()?;
        let mut consumers = self.consumers_mut();

        let index = consumers
            .iter()
            .position(|consumer| consumer.is_mouse_captured())
            .or_else(|| {
                consumers.iter().position(|consumer| {
                    consumer.is_visible() && consumer.rect().contains(point)
                })
            })?;

        let consumer = &mut consumers[index];
        let kind = consumer.kind();
        let commands = consumer.queue_event_processing(event, context);

        // Leaving the map stops edge scrolling.
        if kind != PanelKind::GameArea && matches!(event, InputEvent::MouseMove { .. }) {
            self.game_area.stop_scrolling();
        }
        Some((kind, commands))
    }

    /// Routes a key to the consumer holding the grab, if any.
    pub fn dispatch_grabbed_key(
        &mut self,
        event: &InputEvent,
        context: &ConsumerContext<'_>,
    ) -> Option<(PanelKind, Vec<Command>)> {
        let mut consumers = self.consumers_mut();
        let consumer = consumers
            .iter_mut()
            .find(|consumer| consumer.is_mouse_captured())?;
        Some((
            consumer.kind(),
            consumer.queue_event_processing(event, context),
        ))
    }

    fn consumers(&self) -> [&dyn InputConsumer; 6] {
        [
            &self.status,
            &self.buttons,
            &self.icons,
            &self.radar,
            &self.control,
            &self.game_area,
        ]
    }

    fn consumers_mut(&mut self) -> [&mut dyn InputConsumer; 6] {
        [
            &mut self.status,
            &mut self.buttons,
            &mut self.icons,
            &mut self.radar,
            &mut self.control,
            &mut self.game_area,
        ]
    }

    fn relayout(&mut self) {
        let ScreenRect { width, height, .. } = self.screen;
        let column = width.saturating_sub(SIDEBAR_WIDTH);

        let radar = ScreenRect::new(column, 0, SIDEBAR_WIDTH, 9);
        let icons = ScreenRect::new(column, 9, SIDEBAR_WIDTH, 8);
        let buttons = ScreenRect::new(column, 17, SIDEBAR_WIDTH, 3);

        if self.hidden {
            self.game_area.place(self.screen);
            self.control.frame.place(ScreenRect::new(0, 0, 22, 3), true);
            self.radar.frame.place(radar, true);
            self.icons.frame.place(icons, true);
            self.buttons.frame.place(
                ScreenRect::new(0, height.saturating_sub(3), SIDEBAR_WIDTH, 3),
                true,
            );
            self.status.frame.place(
                ScreenRect::new(column, height.saturating_sub(6), SIDEBAR_WIDTH, 6),
                true,
            );
        } else {
            self.game_area.place(ScreenRect::new(0, 0, column, height));
            self.control.frame.place(ScreenRect::default(), false);
            self.radar.frame.place(radar, false);
            self.icons.frame.place(icons, false);
            self.buttons.frame.place(buttons, false);
            self.status.frame.place(
                ScreenRect::new(column, 20, SIDEBAR_WIDTH, height.saturating_sub(20).max(3)),
                false,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MouseButton, ScreenPoint};
    use game_core::{Control, Terrain, TileMap};

    fn world() -> World {
        let mut world = World::new(TileMap::new(40, 30, Terrain::Grass));
        world.add_kingdom(Color::Blue, Control::Human).unwrap();
        world
    }

    fn context(world: &World) -> ConsumerContext<'_> {
        ConsumerContext {
            world,
            color: Color::Blue,
            focus: Focus::None,
            screen: ScreenRect::new(0, 0, 80, 24),
        }
    }

    #[test]
    fn status_panel_wins_over_the_game_area_it_overlaps() {
        let world = world();
        let mut interface = AdventureInterface::new(80, 24, true);
        let status = interface.status.rect();
        assert!(interface.game_area.rect().contains(ScreenPoint::new(status.x + 2, status.y + 2)));

        let (kind, _) = interface
            .dispatch_pointer(
                &InputEvent::click(status.x + 2, status.y + 2),
                &context(&world),
            )
            .unwrap();

        assert_eq!(kind, PanelKind::Status);
    }

    #[test]
    fn control_panel_only_exists_with_the_hidden_interface() {
        let world = world();
        let mut interface = AdventureInterface::new(80, 24, false);

        let (kind, _) = interface
            .dispatch_pointer(&InputEvent::click(1, 1), &context(&world))
            .unwrap();
        assert_eq!(kind, PanelKind::GameArea);

        interface.toggle_hidden();
        let (kind, _) = interface
            .dispatch_pointer(&InputEvent::click(1, 1), &context(&world))
            .unwrap();
        assert_eq!(kind, PanelKind::Control);
    }

    #[test]
    fn dragged_panel_keeps_the_grab_outside_its_rect() {
        let world = world();
        let mut interface = AdventureInterface::new(80, 24, true);
        let radar = interface.radar.rect();

        interface.dispatch_pointer(
            &InputEvent::MouseDown {
                point: ScreenPoint::new(radar.x + 1, radar.y),
                button: MouseButton::Left,
            },
            &context(&world),
        );
        let (kind, _) = interface
            .dispatch_pointer(
                &InputEvent::MouseDrag {
                    point: ScreenPoint::new(10, 12),
                },
                &context(&world),
            )
            .unwrap();
        assert_eq!(kind, PanelKind::Radar);

        interface.dispatch_pointer(
            &InputEvent::MouseUp {
                point: ScreenPoint::new(10, 12),
                button: MouseButton::Left,
            },
            &context(&world),
        );
        assert_eq!(interface.radar.rect().x, 9);
        assert_eq!(interface.radar.rect().y, 12);
        assert!(!interface.radar.is_mouse_captured());
    }

    #[test]
    fn hidden_floating_panels_can_be_toggled_off() {
        let world = world();
        let mut interface = AdventureInterface::new(80, 24, true);
        let status = interface.status.rect();

        interface.toggle_panel(PanelKind::Status);
        let (kind, _) = interface
            .dispatch_pointer(
                &InputEvent::click(status.x + 2, status.y + 2),
                &context(&world),
            )
            .unwrap();

        assert_eq!(kind, PanelKind::GameArea);
    }
}
