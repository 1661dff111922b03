//! Game state module - the session state machine
//!
//! Ties together the board, the active and next pieces, the piece source and
//! the score/level progress. Every command takes `&mut self`, so gravity
//! ticks and input commands are serialized by construction.
//!
//! Commands never fail for rule reasons: a blocked move or rotation is a
//! no-op reported as `Ok(false)`, and commands while paused or after game
//! over do nothing. The only error is [`GameError::NotStarted`], returned
//! until the first [`GameState::reset`].

use crate::board::Board;
use crate::collision::{drop_distance, is_valid_placement};
use crate::error::GameError;
use crate::pieces::{shape_of, spawn_x, try_rotate, Shape};
use crate::rng::{PieceSource, RandomPieces};
use crate::scoring::Progress;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameStatus, LockEvent, PieceKind, StepOutcome};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece in its canonical orientation, centered on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = shape_of(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    pub fn color_index(&self) -> u8 {
        self.kind.color_index()
    }

    /// Check whether the piece fits on the board where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        is_valid_placement(board, &self.shape, self.x, self.y)
    }

    /// Check whether the piece fits after shifting by `(dx, dy)`
    pub fn fits_at(&self, board: &Board, dx: i8, dy: i8) -> bool {
        is_valid_placement(board, &self.shape, self.x + dx, self.y + dy)
    }

    /// Absolute board coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape.minos().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = RandomPieces> {
    board: Board,
    active: Option<Piece>,
    next: Option<PieceKind>,
    pieces: S,
    progress: Progress,
    status: GameStatus,
    started: bool,
    /// Monotonic session id (increments on every reset).
    session_id: u32,
    /// Monotonic id for spawned pieces within a session.
    piece_id: u32,
    /// Last lock/line-clear event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<RandomPieces> {
    /// Create an uninitialized game whose pieces come from a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_source(RandomPieces::seeded(seed))
    }
}

impl Default for GameState<RandomPieces> {
    fn default() -> Self {
        Self::with_source(RandomPieces::from_entropy())
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create an uninitialized game drawing pieces from `pieces`
    ///
    /// Commands return [`GameError::NotStarted`] until [`reset`](Self::reset).
    pub fn with_source(pieces: S) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            pieces,
            progress: Progress::new(),
            status: GameStatus::Running,
            started: false,
            session_id: 0,
            piece_id: 0,
            last_event: None,
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    /// Current gravity interval; drivers re-read this after every tick.
    pub fn fall_interval_ms(&self) -> u32 {
        self.progress.fall_interval_ms
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup (pre-filled rows, puzzles).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn ensure_started(&self) -> Result<(), GameError> {
        if self.started {
            Ok(())
        } else {
            Err(GameError::NotStarted)
        }
    }

    /// Whether movement and gravity commands apply right now.
    fn playable(&self) -> bool {
        self.status.is_playable() && self.active.is_some()
    }

    /// Start a fresh session
    ///
    /// Clears the board and all counters, drops the pending next piece and
    /// spawns the first piece. The piece source keeps its position, so a
    /// seeded game continues its sequence rather than replaying it.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.progress = Progress::new();
        self.status = GameStatus::Running;
        self.started = true;
        self.session_id = self.session_id.wrapping_add(1);
        self.piece_id = 0;
        self.last_event = None;

        log::info!("session {} started", self.session_id);
        self.spawn_piece();
    }

    /// Promote the next piece to active and draw a new next piece
    ///
    /// Returns whether the spawn placement was valid; a blocked spawn ends
    /// the session. Once the game is over this is a no-op returning
    /// `Ok(false)`.
    pub fn spawn(&mut self) -> Result<bool, GameError> {
        self.ensure_started()?;
        if self.status == GameStatus::GameOver {
            return Ok(false);
        }
        Ok(self.spawn_piece())
    }

    /// Unchecked spawn used by `reset` and the lock cycle. On the first
    /// spawn of a session there is no pending piece, so one is drawn directly.
    fn spawn_piece(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.pieces.next_piece(),
        };
        self.next = Some(self.pieces.next_piece());

        let piece = Piece::spawn(kind);
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if piece.is_valid(&self.board) {
            return true;
        }

        self.status = GameStatus::GameOver;
        log::info!(
            "session {} over: {:?} blocked at spawn (score {}, lines {})",
            self.session_id,
            kind,
            self.progress.score,
            self.progress.lines
        );
        false
    }

    /// Gravity step, invoked by the external driver on a timer
    ///
    /// Moves the active piece down one row, or locks it when it cannot
    /// descend (clearing rows, scoring and spawning the next piece).
    pub fn tick(&mut self) -> Result<StepOutcome, GameError> {
        self.ensure_started()?;
        if !self.playable() {
            return Ok(StepOutcome::Idle);
        }
        Ok(self.gravity_step())
    }

    fn gravity_step(&mut self) -> StepOutcome {
        if self.try_move(0, 1) {
            StepOutcome::Moved
        } else {
            self.lock_active();
            StepOutcome::Locked
        }
    }

    pub fn move_left(&mut self) -> Result<bool, GameError> {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> Result<bool, GameError> {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> Result<bool, GameError> {
        self.ensure_started()?;
        if !self.playable() {
            return Ok(false);
        }
        Ok(self.try_move(dx, 0))
    }

    /// Move the active piece if the target placement is valid
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !active.fits_at(&self.board, dx, dy) {
            return false;
        }
        self.active = Some(Piece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    /// One gravity step, plus a point when the piece actually moved
    ///
    /// Locking through a soft drop earns nothing beyond line clears.
    pub fn soft_drop(&mut self) -> Result<StepOutcome, GameError> {
        self.ensure_started()?;
        if !self.playable() {
            return Ok(StepOutcome::Idle);
        }
        let outcome = self.gravity_step();
        if outcome == StepOutcome::Moved {
            self.progress.record_drop(1, false);
        }
        Ok(outcome)
    }

    /// Drop to the lowest valid row (2 points per row) and lock immediately
    pub fn hard_drop(&mut self) -> Result<StepOutcome, GameError> {
        self.ensure_started()?;
        if !self.playable() {
            return Ok(StepOutcome::Idle);
        }
        let Some(active) = self.active else {
            return Ok(StepOutcome::Idle);
        };

        let rows = drop_distance(&self.board, &active.shape, active.x, active.y);
        if rows > 0 {
            self.active = Some(Piece {
                y: active.y + rows,
                ..active
            });
        }
        self.progress.record_drop(rows as u32, true);
        self.lock_active();
        Ok(StepOutcome::Locked)
    }

    /// Rotate clockwise, trying the anchor, then one column left, then right
    pub fn rotate(&mut self) -> Result<bool, GameError> {
        self.ensure_started()?;
        if !self.playable() {
            return Ok(false);
        }
        let Some(active) = self.active else {
            return Ok(false);
        };

        let rotated = try_rotate(&active.shape, active.x, active.y, |shape, x, y| {
            is_valid_placement(&self.board, shape, x, y)
        });

        match rotated {
            Some((shape, x)) => {
                self.active = Some(Piece { shape, x, ..active });
                Ok(true)
            }
            None => {
                log::trace!("rotation of {:?} at ({}, {}) blocked", active.kind, active.x, active.y);
                Ok(false)
            }
        }
    }

    /// Toggle Running <-> Paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) -> Result<bool, GameError> {
        self.ensure_started()?;
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::GameOver => return Ok(false),
        };
        log::debug!("status -> {}", self.status.as_str());
        Ok(true)
    }

    /// Apply a game action
    ///
    /// Returns whether the action changed anything. `Restart` is always
    /// accepted, including before the first reset.
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, GameError> {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop().map(|o| o != StepOutcome::Idle),
            GameAction::HardDrop => self.hard_drop().map(|o| o != StepOutcome::Idle),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset();
                Ok(true)
            }
        }
    }

    /// Lock the active piece onto the board, clear rows, score and spawn
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock_piece(&active.shape, active.x, active.y, active.kind);

        let cleared = self.board.clear_full_rows();
        let line_clear_score = self.progress.record_line_clear(cleared.len());

        if cleared.is_empty() {
            log::debug!("{:?} locked at ({}, {})", active.kind, active.x, active.y);
        } else {
            log::debug!(
                "{:?} locked at ({}, {}), cleared rows {:?} for {} points (level {}, {}ms)",
                active.kind,
                active.x,
                active.y,
                cleared.as_slice(),
                line_clear_score,
                self.progress.level,
                self.progress.fall_interval_ms
            );
        }

        let spawned = self.spawn_piece();
        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: cleared.len() as u32,
            line_clear_score,
            topped_out: !spawned,
        });
    }

    /// Take and clear the last lock/line-clear event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the active piece would land on (for ghost rendering)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + drop_distance(&self.board, &active.shape, active.x, active.y))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.status = self.status;
        out.started = self.started;
        out.session_id = self.session_id;
        out.piece_id = self.piece_id;
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.fall_interval_ms = self.progress.fall_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequencePieces;
    use crate::types::BOARD_WIDTH;

    fn game_with(kinds: &[PieceKind]) -> GameState<SequencePieces> {
        let mut state = GameState::with_source(SequencePieces::new(kinds.to_vec()));
        state.reset();
        state
    }

    /// Fill row `y` except the columns in `gaps`.
    fn fill_row_except(board: &mut Board, y: i8, gaps: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.fall_interval_ms(), 500);
        assert!(state.active.is_none());
        assert!(state.next.is_none());
    }

    #[test]
    fn test_commands_before_reset_fail() {
        let mut state = GameState::new(1);
        assert_eq!(state.tick(), Err(GameError::NotStarted));
        assert_eq!(state.move_left(), Err(GameError::NotStarted));
        assert_eq!(state.move_right(), Err(GameError::NotStarted));
        assert_eq!(state.soft_drop(), Err(GameError::NotStarted));
        assert_eq!(state.hard_drop(), Err(GameError::NotStarted));
        assert_eq!(state.rotate(), Err(GameError::NotStarted));
        assert_eq!(state.toggle_pause(), Err(GameError::NotStarted));
        assert_eq!(state.apply_action(GameAction::Restart), Ok(true));
        assert!(state.started());
    }

    #[test]
    fn test_reset_spawns_and_queues_next() {
        let state = game_with(&[PieceKind::T, PieceKind::O, PieceKind::L]);
        assert_eq!(state.active.map(|p| p.kind), Some(PieceKind::T));
        assert_eq!(state.next, Some(PieceKind::O));
        assert_eq!(state.session_id, 1);
        assert_eq!(state.piece_id, 1);
    }

    #[test]
    fn test_spawn_promotes_next() {
        let mut state = game_with(&[PieceKind::T, PieceKind::O, PieceKind::L]);
        assert_eq!(state.spawn(), Ok(true));
        assert_eq!(state.active.map(|p| p.kind), Some(PieceKind::O));
        assert_eq!(state.next, Some(PieceKind::L));
    }

    #[test]
    fn test_spawn_requires_running_session() {
        let mut state = GameState::with_source(SequencePieces::new(vec![PieceKind::T, PieceKind::O]));
        assert_eq!(state.spawn(), Err(GameError::NotStarted));
        assert!(state.active.is_none());
        assert!(state.next.is_none());
        assert_eq!(state.piece_id, 0);

        state.reset();
        fill_row_except(&mut state.board, 0, &[0]);
        fill_row_except(&mut state.board, 1, &[0]);
        assert_eq!(state.spawn(), Ok(false));
        assert!(state.game_over());

        let (active, next, piece_id) = (state.active, state.next, state.piece_id);
        assert_eq!(state.spawn(), Ok(false));
        assert_eq!(state.active, active);
        assert_eq!(state.next, next);
        assert_eq!(state.piece_id, piece_id);
    }

    #[test]
    fn test_spawn_centers_i_piece() {
        let state = game_with(&[PieceKind::I]);
        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (3, 0));
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = game_with(&[PieceKind::O]);
        assert_eq!(state.tick(), Ok(StepOutcome::Moved));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_tick_locks_at_floor() {
        let mut state = game_with(&[PieceKind::O]);
        for _ in 0..18 {
            assert_eq!(state.tick(), Ok(StepOutcome::Moved));
        }
        assert_eq!(state.tick(), Ok(StepOutcome::Locked));
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(5, 18), Some(Some(PieceKind::O)));
        assert_eq!(state.active.unwrap().y, 0);
        assert_eq!(state.piece_id, 2);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.topped_out);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_move_stops_at_walls() {
        let mut state = game_with(&[PieceKind::O]);
        let mut moved = 0;
        while state.move_left().unwrap() {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active.unwrap().x, 0);

        let mut moved = 0;
        while state.move_right().unwrap() {
            moved += 1;
        }
        assert_eq!(moved, 8);
        assert_eq!(state.active.unwrap().x, 8);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_soft_drop_scores_only_moves() {
        let mut state = game_with(&[PieceKind::O]);
        assert_eq!(state.soft_drop(), Ok(StepOutcome::Moved));
        assert_eq!(state.score(), 1);

        state.active = Some(Piece {
            y: 18,
            ..state.active.unwrap()
        });
        assert_eq!(state.soft_drop(), Ok(StepOutcome::Locked));
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_hard_drop_scores_rows() {
        let mut state = game_with(&[PieceKind::O]);
        // Floor made of a partial row 7: O lands with its bottom on row 6.
        fill_row_except(&mut state.board, 7, &[0]);
        assert_eq!(state.hard_drop(), Ok(StepOutcome::Locked));
        assert_eq!(state.score(), 5 * 2);
        assert_eq!(state.board.get(4, 6), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_hard_drop_adds_line_clear_bonus() {
        let mut state = game_with(&[PieceKind::I]);
        fill_row_except(&mut state.board, 19, &[3, 4, 5, 6]);
        assert_eq!(state.hard_drop(), Ok(StepOutcome::Locked));
        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 19 * 2 + 100);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let mut state = game_with(&[PieceKind::T]);
        state.tick().unwrap();
        let before = state.active.unwrap();
        assert!(state.rotate().unwrap());
        let after = state.active.unwrap();
        assert_eq!(after.x, before.x);
        assert_eq!(after.shape.to_rows(), vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_rotate_rejected_at_right_wall() {
        let mut state = game_with(&[PieceKind::I]);
        // Vertical I hugging the right wall, then rotate back to horizontal.
        state.tick().unwrap();
        assert!(state.rotate().unwrap());
        while state.move_right().unwrap() {}
        let vertical = state.active.unwrap();
        assert_eq!(vertical.x, 9);

        // Horizontal I needs x <= 6; candidates are 9, 8 and 10.
        assert!(!state.rotate().unwrap());
        assert_eq!(state.active.unwrap(), vertical);
    }

    #[test]
    fn test_rotate_kicks_left_by_one() {
        let mut state = game_with(&[PieceKind::T]);
        state.tick().unwrap();
        // Rotate to the vertical T (2 wide), push to the right wall.
        assert!(state.rotate().unwrap());
        while state.move_right().unwrap() {}
        assert_eq!(state.active.unwrap().x, 8);

        // Next orientation is 3 wide: x=8 overflows, x=7 fits.
        assert!(state.rotate().unwrap());
        assert_eq!(state.active.unwrap().x, 7);
    }

    #[test]
    fn test_pause_blocks_commands() {
        let mut state = game_with(&[PieceKind::T]);
        assert_eq!(state.toggle_pause(), Ok(true));
        assert!(state.paused());

        let before = state.active;
        assert_eq!(state.tick(), Ok(StepOutcome::Idle));
        assert_eq!(state.move_left(), Ok(false));
        assert_eq!(state.rotate(), Ok(false));
        assert_eq!(state.soft_drop(), Ok(StepOutcome::Idle));
        assert_eq!(state.hard_drop(), Ok(StepOutcome::Idle));
        assert_eq!(state.active, before);
        assert_eq!(state.score(), 0);

        assert_eq!(state.toggle_pause(), Ok(true));
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.tick(), Ok(StepOutcome::Moved));
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut state = game_with(&[PieceKind::T]);
        fill_row_except(&mut state.board, 0, &[0]);
        fill_row_except(&mut state.board, 1, &[0]);

        assert_eq!(state.spawn(), Ok(false));
        assert!(state.game_over());

        let before = state.active;
        assert_eq!(state.tick(), Ok(StepOutcome::Idle));
        assert_eq!(state.move_left(), Ok(false));
        assert_eq!(state.rotate(), Ok(false));
        assert_eq!(state.hard_drop(), Ok(StepOutcome::Idle));
        assert_eq!(state.toggle_pause(), Ok(false));
        assert_eq!(state.active, before);

        state.reset();
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.session_id, 2);
    }

    #[test]
    fn test_lock_into_top_out_reports_event() {
        let mut state = game_with(&[PieceKind::O]);
        // Column stack leaving only the spawn rows empty.
        for y in 2..20 {
            fill_row_except(&mut state.board, y, &[0]);
        }
        assert_eq!(state.tick(), Ok(StepOutcome::Locked));
        let event = state.take_last_event().unwrap();
        assert!(event.topped_out);
        assert!(state.game_over());
    }

    #[test]
    fn test_ghost_y() {
        let state = game_with(&[PieceKind::O]);
        assert_eq!(state.ghost_y(), Some(18));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = game_with(&[PieceKind::L, PieceKind::J]);
        state.board.set(0, 19, Some(PieceKind::S));
        let snap = state.snapshot();
        assert_eq!(snap.board[19][0], PieceKind::S.cell_value());
        assert_eq!(snap.active.map(|a| a.kind), Some(PieceKind::L));
        assert_eq!(snap.next, Some(PieceKind::J));
        assert_eq!(snap.level, 1);
        assert!(snap.playable());
    }
}
