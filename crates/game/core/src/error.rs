//! Common error infrastructure for game-core.
//!
//! Domain errors (`MoveError`, `ActionError`, `WorldError`) live next to the
//! rules they validate and implement [`GameError`] so callers can decide how
//! to surface them without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player can try something else this turn
/// - **Validation**: the request itself was malformed
/// - **Internal**: state inconsistency that should be investigated
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: not enough movement points, bag full.
    Recoverable,

    /// Examples: step to a non-adjacent tile, no hero selected.
    Validation,

    /// Examples: a kingdom lists a hero the arena does not know.
    Internal,

    /// Examples: a loaded save whose turn order cannot be replayed.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
