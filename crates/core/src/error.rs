use std::fmt;

/// Faults reported by [`GameState`](crate::GameState) commands.
///
/// Rule violations (blocked moves, rotations without room) are not errors;
/// they are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A command was issued before the first `reset()`.
    NotStarted,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotStarted => write!(f, "game not initialized: call reset() first"),
        }
    }
}

impl std::error::Error for GameError {}
