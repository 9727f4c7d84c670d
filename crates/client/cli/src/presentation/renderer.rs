//! Runtime renderer backed by the shared terminal.
use runtime::{Frame as AdventureFrame, Renderer};
use tracing::warn;

use super::screen::SharedScreen;

pub struct TerminalRenderer {
    screen: SharedScreen,
}

impl TerminalRenderer {
    pub fn new(screen: SharedScreen) -> Self {
        Self { screen }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: &AdventureFrame<'_>) {
        if let Err(error) = self.screen.borrow_mut().draw_adventure(frame) {
            warn!(target: "kingdoms::ui", %error, "failed to draw frame");
        }
    }

    fn render_hidden(&mut self) {
        if let Err(error) = self.screen.borrow_mut().draw_hidden() {
            warn!(target: "kingdoms::ui", %error, "failed to blank the screen");
        }
    }
}
