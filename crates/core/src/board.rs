//! Board module - manages the grid of locked cells
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of
//! the piece that locked there. Storage is a flat row-major array, so the
//! board is `Copy`-sized, allocation-free and cheap to clone.
//!
//! Coordinates: `(x, y)` with x in 0..10 (left to right) and y in 0..20 (top
//! to bottom). Rows with `y < 0` are the spawn buffer above the visible grid:
//! they are never stored and always read as unoccupied.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use crate::pieces::Shape;

/// Number of columns as `usize`.
pub const COLS: usize = BOARD_WIDTH as usize;

/// Number of rows as `usize`.
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = COLS * ROWS;

/// Row indices removed by one [`Board::clear_full_rows`] call, top to bottom.
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from exported colour values (0 = empty, 1..=7 = piece).
    ///
    /// Values outside 1..=7 are treated as empty.
    pub fn from_u8_grid(grid: &[[u8; COLS]; ROWS]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * COLS + x] = PieceKind::from_cell_value(v);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `(x, y)` blocks a piece.
    ///
    /// Columns outside the board and rows at or below the floor are blocked.
    /// Rows above the top (`y < 0`) are open so pieces can spawn partly
    /// off-grid.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row, shifting the rows above down
    ///
    /// All full rows are identified before anything moves, then the board is
    /// compacted in one bottom-up pass with `copy_within` and the vacated top
    /// rows are emptied. Surviving rows keep their relative order. Returns the
    /// removed row indices (as they were before the clear), top to bottom.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut full = [false; ROWS];
        let mut cleared = ClearedRows::new();
        for (y, is_full) in full.iter_mut().enumerate() {
            if self.is_row_full(y) {
                *is_full = true;
                cleared.push(y);
            }
        }

        if cleared.is_empty() {
            return cleared;
        }

        let mut write_y = ROWS;
        for read_y in (0..ROWS).rev() {
            if full[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * COLS;
                self.cells.copy_within(src..src + COLS, write_y * COLS);
            }
        }

        self.cells[..write_y * COLS].fill(None);
        cleared
    }

    /// Write `kind` into every filled cell of `shape` anchored at `(x, y)`
    ///
    /// Cells that land above the grid (`y < 0`) are dropped. No collision
    /// check is done; callers validate the placement first. Returns how many
    /// cells were written.
    pub fn lock_piece(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.minos() {
            if y + dy >= 0 && self.set(x + dx, y + dy, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Export the grid as colour values (0 = empty, `color_index + 1` otherwise).
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, cell) in dst.iter_mut().zip(src) {
                *d = cell.map_or(0, |kind| kind.cell_value());
            }
        }
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
