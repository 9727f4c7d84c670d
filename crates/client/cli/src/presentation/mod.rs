//! Terminal presentation components used by the CLI client.
pub mod dialogs;
pub mod renderer;
pub mod screen;
pub mod terminal;
pub mod ui;

pub use dialogs::TerminalDialogs;
pub use renderer::TerminalRenderer;
pub use screen::{Screen, SharedScreen};
