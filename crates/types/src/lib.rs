//! Core types module - shared data structures and constants
//!
//! Everything in here is plain data with no dependencies, so the same
//! definitions serve the simulation core, the terminal view and the key map.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity Curve
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_INTERVAL_MS` | 500 | Gravity interval at level 1 |
//! | `FALL_INTERVAL_STEP_MS` | 50 | Interval reduction per level |
//! | `FALL_INTERVAL_FLOOR_MS` | 100 | Fastest gravity interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//! assert_eq!(parsed.cell_value(), 3);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 1.
pub const BASE_FALL_INTERVAL_MS: u32 = 500;

/// Gravity speed-up per level.
pub const FALL_INTERVAL_STEP_MS: u32 = 50;

/// Gravity never gets faster than this.
pub const FALL_INTERVAL_FLOOR_MS: u32 = 100;

/// Cleared lines per level step.
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row for a soft drop step.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled during a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Base points for clearing N rows with one lock, multiplied by the level.
///
/// Index 0 is unused; a single piece can clear at most 4 rows.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven tetromino piece kinds, in catalog order
///
/// The declaration order doubles as the colour index:
/// - **I** (0): cyan bar
/// - **O** (1): yellow square
/// - **T** (2): purple
/// - **S** (3): green
/// - **Z** (4): red
/// - **J** (5): blue
/// - **L** (6): orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase single-letter name, as shown in the side panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Position in the catalog (0..=6).
    pub fn color_index(&self) -> u8 {
        *self as u8
    }

    /// Value written into exported board grids: `color_index + 1`, so 0 stays "empty".
    pub fn cell_value(&self) -> u8 {
        self.color_index() + 1
    }

    /// Inverse of [`PieceKind::cell_value`]. Returns `None` for 0 and anything out of range.
    pub fn from_cell_value(value: u8) -> Option<Self> {
        match value {
            1..=7 => Some(Self::ALL[(value - 1) as usize]),
            _ => None,
        }
    }
}

/// Lifecycle status of a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }

    /// Whether gravity and movement commands have any effect.
    pub fn is_playable(&self) -> bool {
        matches!(self, GameStatus::Running)
    }
}

/// Result of a gravity step (timer tick, soft drop or hard drop)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The active piece descended one row.
    Moved,
    /// The active piece locked; rows were cleared and the next piece spawned.
    Locked,
    /// Nothing happened because the session is paused or over.
    Idle,
}

/// Commands accepted by the game state
///
/// These are what the key map produces; each maps to one command method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise, with a one-column wall kick
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Core-side event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// The follow-up spawn collided and ended the session.
    pub topped_out: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by the specified piece kind
pub type Cell = Option<PieceKind>;
