//! Input events and the asynchronous source the human turn polls.
//!
//! The human turn suspends in exactly one place: [`InputSource::poll`]. The
//! source returns as soon as a batch of events is ready, the deadline of the
//! earliest armed timer passes, or the quit signal flips.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::Instant;

use super::errors::Result;

/// Terminal cell coordinates, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: u16,
    pub y: u16,
}

impl ScreenPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ScreenRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && u32::from(point.x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(point.y) < u32::from(self.y) + u32::from(self.height)
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Moves the rect so its top-left corner sits on `origin`, kept inside `bounds`.
    pub fn moved_to(&self, origin: ScreenPoint, bounds: ScreenRect) -> Self {
        let max_x = bounds.right().saturating_sub(self.width).max(bounds.x);
        let max_y = bounds.bottom().saturating_sub(self.height).max(bounds.y);
        Self {
            x: origin.x.clamp(bounds.x, max_x),
            y: origin.y.clamp(bounds.y, max_y),
            ..*self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Function(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(Key),
    MouseDown {
        point: ScreenPoint,
        button: MouseButton,
    },
    MouseUp {
        point: ScreenPoint,
        button: MouseButton,
    },
    /// Cursor moved with a button held.
    MouseDrag { point: ScreenPoint },
    MouseMove { point: ScreenPoint },
    Resize { width: u16, height: u16 },
}

impl InputEvent {
    pub fn click(x: u16, y: u16) -> Self {
        InputEvent::MouseDown {
            point: ScreenPoint::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Pointer position carried by the event, if any.
    pub fn point(&self) -> Option<ScreenPoint> {
        match self {
            InputEvent::MouseDown { point, .. }
            | InputEvent::MouseUp { point, .. }
            | InputEvent::MouseDrag { point }
            | InputEvent::MouseMove { point } => Some(*point),
            InputEvent::Key(_) | InputEvent::Resize { .. } => None,
        }
    }

    /// Key presses and button presses; these interrupt a walking hero.
    pub fn is_press(&self) -> bool {
        matches!(self, InputEvent::Key(_) | InputEvent::MouseDown { .. })
    }
}

/// Result of one suspension of the human turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Events(Vec<InputEvent>),
    /// The deadline passed with no input.
    Timeout,
    /// The quit signal was observed.
    Quit,
}

/// Source of player input for the human turn.
#[async_trait]
pub trait InputSource: Send {
    /// Waits for the next batch of events.
    ///
    /// Implementations must return [`PollOutcome::Timeout`] once `deadline`
    /// passes and [`PollOutcome::Quit`] as soon as `quit` holds `true`.
    /// With no deadline the call waits for input or quit only.
    async fn poll(
        &mut self,
        deadline: Option<Instant>,
        quit: &mut watch::Receiver<bool>,
    ) -> Result<PollOutcome>;

    /// Whether more input is already buffered. Rendering is skipped while
    /// events are still queued.
    fn has_pending(&self) -> bool {
        false
    }
}

/// Resolves once `quit` holds `true`. Never resolves if every sender is gone.
pub async fn quit_requested(quit: &mut watch::Receiver<bool>) {
    if quit.wait_for(|requested| *requested).await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = ScreenRect::new(2, 3, 4, 2);
        assert!(rect.contains(ScreenPoint::new(2, 3)));
        assert!(rect.contains(ScreenPoint::new(5, 4)));
        assert!(!rect.contains(ScreenPoint::new(6, 4)));
        assert!(!rect.contains(ScreenPoint::new(5, 5)));
    }

    #[test]
    fn moved_rect_stays_on_screen() {
        let screen = ScreenRect::new(0, 0, 80, 24);
        let panel = ScreenRect::new(0, 0, 20, 6);

        let moved = panel.moved_to(ScreenPoint::new(75, 30), screen);

        assert_eq!(moved, ScreenRect::new(60, 18, 20, 6));
    }

    #[test]
    fn only_presses_interrupt() {
        assert!(InputEvent::Key(Key::Char('e')).is_press());
        assert!(InputEvent::click(1, 1).is_press());
        assert!(
            !InputEvent::MouseMove {
                point: ScreenPoint::new(1, 1)
            }
            .is_press()
        );
    }
}
