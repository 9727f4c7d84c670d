//! The terminal shared by the renderer and the dialogs.
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratatui::{buffer::Buffer, layout::Rect};
use runtime::Frame as AdventureFrame;

use super::terminal::Tui;
use super::ui::{self, Popup};

pub type SharedScreen = Rc<RefCell<Screen>>;

pub struct Screen {
    terminal: Tui,
    /// Last adventure frame. Popups are drawn over it.
    backdrop: Buffer,
}

impl Screen {
    pub fn shared(terminal: Tui) -> SharedScreen {
        Rc::new(RefCell::new(Self {
            terminal,
            backdrop: Buffer::empty(Rect::ZERO),
        }))
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    pub fn draw_adventure(&mut self, view: &AdventureFrame<'_>) -> io::Result<()> {
        let completed = self
            .terminal
            .draw(|frame| ui::draw_adventure(frame, view))?;
        self.backdrop = completed.buffer.clone();
        Ok(())
    }

    pub fn draw_hidden(&mut self) -> io::Result<()> {
        self.terminal.draw(ui::draw_hidden)?;
        self.backdrop = Buffer::empty(Rect::ZERO);
        Ok(())
    }

    pub fn draw_popup(&mut self, popup: &Popup<'_>) -> io::Result<()> {
        let backdrop = &self.backdrop;
        self.terminal.draw(|frame| {
            if backdrop.area == frame.area() {
                frame.buffer_mut().merge(backdrop);
            }
            ui::draw_popup(frame, popup);
        })?;
        Ok(())
    }
}
