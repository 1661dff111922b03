//! Read-only view of a game for the presentation layer.

use crate::board::{COLS, ROWS};
use crate::pieces::Shape;
use crate::types::{GameStatus, PieceKind};
use crate::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Colour values per cell: 0 empty, `color_index + 1` when locked.
    pub board: [[u8; COLS]; ROWS],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub status: GameStatus,
    pub started: bool,
    pub session_id: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.started && self.status.is_playable()
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLS]; ROWS],
            active: None,
            ghost_y: None,
            next: None,
            status: GameStatus::Running,
            started: false,
            session_id: 0,
            piece_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: crate::types::BASE_FALL_INTERVAL_MS,
        }
    }
}
