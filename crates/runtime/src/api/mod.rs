//! Public runtime API surface.
//!
//! This module gathers the collaborator traits and value types exposed to
//! consumers of the runtime crate so the turn loop itself can stay focused
//! on sequencing.

pub mod collaborators;
pub mod errors;
pub mod input;
pub mod render;

pub use collaborators::{AiExecutor, AudioSink, Dialogs, Renderer, SilentAudio, WorldHooks};
pub use errors::{CollaboratorKind, RepositoryError, Result, RuntimeError};
pub use input::{
    InputEvent, InputSource, Key, MouseButton, PollOutcome, ScreenPoint, ScreenRect,
    quit_requested,
};
pub use render::Frame;

pub use crate::repository::SaveRepository;
