//! Pieces module - the shape catalog and the rotation transform
//!
//! Shapes are small boolean matrices (at most 4x4) stored inline, so every
//! shape is `Copy` and rotating one never touches the catalog's canonical
//! definitions. Rotation is a pure matrix transform followed by a three-step
//! wall kick (stay, one column left, one column right).

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest row or column count any catalog shape needs.
pub const MAX_SHAPE_DIM: usize = 4;

/// Column offsets tried, in order, when a rotation collides.
pub const KICK_OFFSETS: [i8; 3] = [0, -1, 1];

/// Offset of a filled cell relative to the shape's top-left anchor, as `(dx, dy)`.
pub type MinoOffset = (i8, i8);

/// An immutable, rectangular polyomino matrix.
///
/// `cells[r][c]` outside `rows x cols` is always `false`, so derived
/// equality compares shapes by their visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

/// Build a shape from a literal 0/1 matrix at compile time.
const fn matrix<const R: usize, const C: usize>(m: [[u8; C]; R]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    let mut r = 0;
    while r < R {
        let mut c = 0;
        while c < C {
            cells[r][c] = m[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape {
        rows: R as u8,
        cols: C as u8,
        cells,
    }
}

/// Canonical spawn orientations, indexed by [`PieceKind::color_index`].
const CATALOG: [Shape; 7] = [
    // I
    matrix([[1, 1, 1, 1]]),
    // O
    matrix([[1, 1], [1, 1]]),
    // T
    matrix([[0, 1, 0], [1, 1, 1]]),
    // S
    matrix([[0, 1, 1], [1, 1, 0]]),
    // Z
    matrix([[1, 1, 0], [0, 1, 1]]),
    // J
    matrix([[1, 0, 0], [1, 1, 1]]),
    // L
    matrix([[0, 0, 1], [1, 1, 1]]),
];

/// Get the canonical (spawn) shape for a piece kind
pub fn shape_of(kind: PieceKind) -> Shape {
    CATALOG[kind.color_index() as usize]
}

impl Shape {
    /// Build a shape from row slices of 0/1 values.
    ///
    /// Returns `None` unless the matrix is non-empty, rectangular and fits in
    /// [`MAX_SHAPE_DIM`] x [`MAX_SHAPE_DIM`].
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }

        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    /// Number of matrix rows.
    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Number of matrix columns.
    pub fn width(&self) -> u8 {
        self.cols
    }

    /// Offsets `(dx, dy)` of every filled cell, row by row.
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> {
        let shape = *self;
        (0..shape.rows).flat_map(move |r| {
            (0..shape.cols)
                .filter(move |&c| shape.cells[r as usize][c as usize])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Matrix rows as 0/1 values (for tests and debugging).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|r| {
                (0..self.cols as usize)
                    .map(|c| u8::from(self.cells[r][c]))
                    .collect()
            })
            .collect()
    }
}

/// Rotate a shape 90° clockwise.
///
/// An `R x C` matrix becomes `C x R` with `out[c][r] = in[R-1-r][c]`.
/// No re-centering is applied; the wall kick absorbs edge collisions.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let rows = shape.rows as usize;
    let cols = shape.cols as usize;
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    for (c, out_row) in cells.iter_mut().enumerate().take(cols) {
        for (r, out) in out_row.iter_mut().enumerate().take(rows) {
            *out = shape.cells[rows - 1 - r][c];
        }
    }
    Shape {
        rows: shape.cols,
        cols: shape.rows,
        cells,
    }
}

/// Anchor column that centers a shape horizontally on the board.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8
}

/// Try to rotate with the one-column wall kick
///
/// Returns `Some((rotated_shape, new_x))` for the first kick offset that
/// `is_valid` accepts, or `None` when every candidate collides.
pub fn try_rotate<F>(shape: &Shape, x: i8, y: i8, is_valid: F) -> Option<(Shape, i8)>
where
    F: Fn(&Shape, i8, i8) -> bool,
{
    let rotated = rotate_cw(shape);
    KICK_OFFSETS
        .iter()
        .map(|&dx| x + dx)
        .find(|&kx| is_valid(&rotated, kx, y))
        .map(|kx| (rotated, kx))
}
