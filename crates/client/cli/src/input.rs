//! Crossterm input for the human turn.
//!
//! The terminal is polled without blocking every few milliseconds. Between
//! polls the source sleeps until the next check or the turn's deadline,
//! whichever comes first, and wakes early when quit is requested.
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as TermButton,
    MouseEvent, MouseEventKind,
};
use runtime::{
    InputEvent, InputSource, Key, MouseButton, PollOutcome, Result, RuntimeError, ScreenPoint,
    api::quit_requested,
};
use tokio::sync::watch;
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    /// Everything the terminal has buffered right now.
    fn drain(&self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO).map_err(RuntimeError::Input)? {
            let raw = event::read().map_err(RuntimeError::Input)?;
            events.extend(translate(&raw));
        }
        Ok(events)
    }
}

#[async_trait]
impl InputSource for TerminalInput {
    async fn poll(
        &mut self,
        deadline: Option<Instant>,
        quit: &mut watch::Receiver<bool>,
    ) -> Result<PollOutcome> {
        loop {
            let requested = *quit.borrow();
            if requested {
                return Ok(PollOutcome::Quit);
            }

            let events = self.drain()?;
            if !events.is_empty() {
                return Ok(PollOutcome::Events(events));
            }

            let now = Instant::now();
            if deadline.is_some_and(|deadline| deadline <= now) {
                return Ok(PollOutcome::Timeout);
            }
            let next_check = now + POLL_INTERVAL;
            let wake = deadline.map_or(next_check, |deadline| deadline.min(next_check));

            tokio::select! {
                _ = tokio::time::sleep_until(wake) => {}
                _ = quit_requested(quit) => return Ok(PollOutcome::Quit),
            }
        }
    }

    fn has_pending(&self) -> bool {
        event::poll(Duration::ZERO).unwrap_or(false)
    }
}

/// Maps a terminal event onto the runtime's input model.
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key).map(InputEvent::Key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Key::Char('q'));
    }
    Some(match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::F(n) => Key::Function(n),
        _ => return None,
    })
}

fn translate_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    let point = ScreenPoint::new(mouse.column, mouse.row);
    let button = |button: TermButton| match button {
        TermButton::Left => Some(MouseButton::Left),
        TermButton::Right => Some(MouseButton::Right),
        TermButton::Middle => None,
    };
    match mouse.kind {
        MouseEventKind::Down(pressed) => Some(InputEvent::MouseDown {
            point,
            button: button(pressed)?,
        }),
        MouseEventKind::Up(released) => Some(InputEvent::MouseUp {
            point,
            button: button(released)?,
        }),
        MouseEventKind::Drag(_) => Some(InputEvent::MouseDrag { point }),
        MouseEventKind::Moved => Some(InputEvent::MouseMove { point }),
        _ => None,
    }
}
