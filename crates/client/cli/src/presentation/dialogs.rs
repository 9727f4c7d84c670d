//! Modal popups. Each call draws over the last frame and blocks until the
//! player answers.
use std::io;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use game_core::Color as KingdomColor;
use runtime::Dialogs;
use tracing::{debug, warn};

use super::screen::SharedScreen;
use super::ui::{Popup, Tone};

pub struct TerminalDialogs {
    screen: SharedScreen,
}

impl TerminalDialogs {
    pub fn new(screen: SharedScreen) -> Self {
        Self { screen }
    }

    fn show(&mut self, title: &str, text: &str, tone: Tone) -> io::Result<bool> {
        self.screen
            .borrow_mut()
            .draw_popup(&Popup { title, text, tone })?;
        let question = tone == Tone::Question;
        loop {
            if let Some(answer) = answer_for(&event::read()?, question) {
                return Ok(answer);
            }
        }
    }

    fn notify(&mut self, title: &str, text: &str, tone: Tone) {
        if let Err(error) = self.show(title, text, tone) {
            warn!(target: "kingdoms::dialogs", %error, text, "failed to show popup");
        }
    }
}

impl Dialogs for TerminalDialogs {
    fn message(&mut self, text: &str) {
        self.notify("Message", text, Tone::Info);
    }

    fn warning(&mut self, text: &str) {
        self.notify("Warning", text, Tone::Warning);
    }

    fn confirm(&mut self, text: &str) -> bool {
        match self.show("Confirm", text, Tone::Question) {
            Ok(answer) => {
                debug!(target: "kingdoms::dialogs", answer, text, "confirmation answered");
                answer
            }
            Err(error) => {
                warn!(target: "kingdoms::dialogs", %error, text, "confirmation failed, assuming no");
                false
            }
        }
    }

    fn announce_player_turn(&mut self, color: KingdomColor) {
        let text = format!("{} player's turn.", color.name());
        self.notify("Next player", &text, Tone::Info);
    }
}

/// `Some` once `event` dismisses the popup. Questions take y/n, anything
/// else takes Enter, Space, Esc or a click.
fn answer_for(event: &Event, question: bool) -> Option<bool> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter if question => Some(true),
            KeyCode::Char('n' | 'N') | KeyCode::Esc if question => Some(false),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc if !question => Some(true),
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) if !question => Some(true),
        _ => None,
    }
}
