//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from collaborators, repositories, and world bookkeeping so
//! the binary can bubble them up with consistent context.
use std::fmt;

use game_core::{ActionError, Color, ErrorSeverity, GameError, MoveError, WorldError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The turn order reached `encountered` before the saved color.
    #[error("saved game expects {saved} to move, but {encountered} comes first")]
    ResumeMismatch { saved: Color, encountered: Color },

    #[error("saved color {saved} has no live kingdom to resume")]
    SavedColorMissing { saved: Color },

    /// Games are saved on human turns only.
    #[error("saved color {saved} is played by the computer")]
    SavedColorNotHuman { saved: Color },

    #[error("{kind} collaborator not set")]
    MissingCollaborator { kind: CollaboratorKind },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("AI turn failed: {0}")]
    Ai(String),

    #[error("input source failed")]
    Input(#[source] std::io::Error),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::ResumeMismatch { .. }
            | RuntimeError::SavedColorMissing { .. }
            | RuntimeError::SavedColorNotHuman { .. } => ErrorSeverity::Fatal,
            RuntimeError::MissingCollaborator { .. } | RuntimeError::Input(_) => {
                ErrorSeverity::Fatal
            }
            RuntimeError::Repository(_) | RuntimeError::Ai(_) => ErrorSeverity::Internal,
            RuntimeError::World(error) => error.severity(),
            RuntimeError::Move(error) => error.severity(),
            RuntimeError::Action(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::ResumeMismatch { .. } => "RUNTIME_RESUME_MISMATCH",
            RuntimeError::SavedColorMissing { .. } => "RUNTIME_SAVED_COLOR_MISSING",
            RuntimeError::SavedColorNotHuman { .. } => "RUNTIME_SAVED_COLOR_NOT_HUMAN",
            RuntimeError::MissingCollaborator { .. } => "RUNTIME_MISSING_COLLABORATOR",
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::World(error) => error.error_code(),
            RuntimeError::Move(error) => error.error_code(),
            RuntimeError::Action(error) => error.error_code(),
            RuntimeError::Ai(_) => "RUNTIME_AI",
            RuntimeError::Input(_) => "RUNTIME_INPUT",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollaboratorKind {
    World,
    Ai,
    Saves,
    Input,
    Renderer,
    Dialogs,
}

impl fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CollaboratorKind::World => "world",
            CollaboratorKind::Ai => "ai executor",
            CollaboratorKind::Saves => "save repository",
            CollaboratorKind::Input => "input source",
            CollaboratorKind::Renderer => "renderer",
            CollaboratorKind::Dialogs => "dialogs",
        };
        write!(f, "{}", label)
    }
}
