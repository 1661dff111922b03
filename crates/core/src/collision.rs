//! Placement legality
//!
//! One predicate decides every move: shifting, gravity, rotation (including
//! each kick candidate), hard drop and spawn all go through
//! [`is_valid_placement`].

use crate::board::Board;
use crate::pieces::Shape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `shape` anchored at `(x, y)` fits on `board`.
///
/// A filled cell is illegal when it leaves the side walls or passes the
/// floor, or when it overlaps a locked cell on a visible row. Cells above
/// the grid only need to respect the side walls.
pub fn is_valid_placement(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    shape.minos().all(|(dx, dy)| {
        let bx = x + dx;
        let by = y + dy;
        if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
            return false;
        }
        by < 0 || !board.is_occupied(bx, by)
    })
}

/// How many rows `shape` can fall from `(x, y)` before it would collide.
pub fn drop_distance(board: &Board, shape: &Shape, x: i8, y: i8) -> i8 {
    let mut distance = 0;
    while is_valid_placement(board, shape, x, y + distance + 1) {
        distance += 1;
    }
    distance
}
