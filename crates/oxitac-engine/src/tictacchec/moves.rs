//! Per-piece movement legality rules.
//!
//! Each rule is a pure function of the board and the move endpoints; the
//! game dispatches on the piece-kind tag. Placement, turn, and capture
//! ownership checks happen before these rules run, so a rule only answers
//! "can this piece travel from `from` to `to`".

use crate::core::{Coordinate, PawnDirection};

use super::board::Board;

fn file_distance(from: Coordinate, to: Coordinate) -> u8 {
    from.x().abs_diff(to.x())
}

fn rank_distance(from: Coordinate, to: Coordinate) -> u8 {
    from.y().abs_diff(to.y())
}

/// A pawn advances exactly one row along its current direction: straight
/// ahead onto an empty square, or one file sideways when capturing.
#[must_use]
pub fn pawn_move_is_legal(
    from: Coordinate,
    to: Coordinate,
    direction: PawnDirection,
    taking: bool,
) -> bool {
    if rank_distance(from, to) != 1 {
        return false;
    }
    let advances = i16::from(to.y()) - i16::from(from.y()) == i16::from(direction.row_step());
    if !advances {
        return false;
    }
    if taking {
        file_distance(from, to) == 1
    } else {
        from.x() == to.x()
    }
}

/// A knight jumps a (1,2) or (2,1) offset and is never blocked.
#[must_use]
pub fn knight_move_is_legal(from: Coordinate, to: Coordinate) -> bool {
    let dx = file_distance(from, to);
    let dy = rank_distance(from, to);
    (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
}

/// A bishop slides diagonally; every square strictly between the endpoints
/// must be empty.
#[must_use]
pub fn bishop_move_is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    if file_distance(from, to) != rank_distance(from, to) {
        return false;
    }
    path_is_clear(board, from, to)
}

/// A rook slides along one rank or one file; every square strictly between
/// the endpoints must be empty.
#[must_use]
pub fn rook_move_is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    if from.x() != to.x() && from.y() != to.y() {
        return false;
    }
    path_is_clear(board, from, to)
}

/// Walks unit steps from `from` toward `to` (exclusive on both ends) and
/// checks that every intermediate square is empty. The endpoints must lie
/// on a shared rank, file, or diagonal.
fn path_is_clear(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    let step_x = (i16::from(to.x()) - i16::from(from.x())).signum();
    let step_y = (i16::from(to.y()) - i16::from(from.y())).signum();
    let mut x = i16::from(from.x()) + step_x;
    let mut y = i16::from(from.y()) + step_y;
    while (x, y) != (i16::from(to.x()), i16::from(to.y())) {
        let square = Coordinate::new(u8::try_from(x).unwrap(), u8::try_from(y).unwrap());
        if !board.get(square).is_empty() {
            return false;
        }
        x += step_x;
        y += step_y;
    }
    true
}
