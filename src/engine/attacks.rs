//! Direction tables and attack detection.
//!
//! Every piece except the pawn moves along a fixed list of (row, column)
//! unit directions for up to a per-piece number of steps. The same tables
//! drive both move generation and the reverse question answered here: is a
//! square attacked? Attack detection walks outward from the target square
//! and inspects the first occupied square on each ray.

use crate::engine::board::Board;
use crate::engine::types::{Color, PieceType, Position};

// =========================================================================
// Direction tables
// =========================================================================

/// A (row delta, column delta) unit step.
pub type Direction = (i8, i8);

pub const ORTHOGONAL: &[Direction] = &[(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const DIAGONAL: &[Direction] = &[(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Orthogonal directions followed by diagonal ones.
pub const COMPASS: &[Direction] = &[
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_JUMPS: &[Direction] = &[
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
];

/// Longest possible ray on an 8×8 board.
pub const MAX_STEPS: i8 = 8;

/// Directions and step cap for a non-pawn piece.
///
/// Pawns move asymmetrically and get an empty table; they are generated
/// separately.
pub fn movement(kind: PieceType) -> (&'static [Direction], i8) {
    match kind {
        PieceType::King => (COMPASS, 1),
        PieceType::Queen => (COMPASS, MAX_STEPS),
        PieceType::Rook => (ORTHOGONAL, MAX_STEPS),
        PieceType::Bishop => (DIAGONAL, MAX_STEPS),
        PieceType::Knight => (KNIGHT_JUMPS, 1),
        PieceType::Pawn => (&[], 0),
    }
}

// =========================================================================
// Attack detection
// =========================================================================

/// Whether the king of `color` is attacked.
///
/// Returns `false` when `color` has no king on the board. With more than one
/// king the first in scan order is tested.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_position(color) {
        Some(king) => is_square_attacked(board, king, !color),
        None => false,
    }
}

/// Whether any piece of colour `by` attacks `target`.
///
/// Walks are made from `target` outward and stop at the first occupied
/// square; only that occupant is tested against the attackers allowed for
/// the pattern.
pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
    attacked_along_lines(board, target, by)
        || attacked_along_diagonals(board, target, by)
        || attacked_by_knight(board, target, by)
}

/// Rook, queen, or adjacent king on a rank or file.
fn attacked_along_lines(board: &Board, target: Position, by: Color) -> bool {
    ORTHOGONAL.iter().any(|&dir| {
        first_piece_on_ray(board, target, dir).is_some_and(|(step, pos)| {
            board.get(pos).is_some_and(|piece| {
                piece.color == by
                    && match piece.kind {
                        PieceType::Rook | PieceType::Queen => true,
                        PieceType::King => step == 1,
                        _ => false,
                    }
            })
        })
    })
}

/// Bishop, queen, adjacent king, or a pawn one step away on the diagonal it
/// captures along.
fn attacked_along_diagonals(board: &Board, target: Position, by: Color) -> bool {
    // An attacking pawn sits one row behind the target from its own point of
    // view: a white pawn below the target, a black pawn above it.
    let pawn_row_delta = -by.forward();

    DIAGONAL.iter().any(|&(dr, dc)| {
        first_piece_on_ray(board, target, (dr, dc)).is_some_and(|(step, pos)| {
            board.get(pos).is_some_and(|piece| {
                piece.color == by
                    && match piece.kind {
                        PieceType::Bishop | PieceType::Queen => true,
                        PieceType::King => step == 1,
                        PieceType::Pawn => step == 1 && dr == pawn_row_delta,
                        _ => false,
                    }
            })
        })
    })
}

fn attacked_by_knight(board: &Board, target: Position, by: Color) -> bool {
    KNIGHT_JUMPS.iter().any(|&(dr, dc)| {
        target
            .offset(dr, dc, 1)
            .and_then(|pos| board.get(pos))
            .is_some_and(|piece| piece.color == by && piece.kind == PieceType::Knight)
    })
}

/// First occupied square walking from `from` along `dir`, with its step number.
fn first_piece_on_ray(
    board: &Board,
    from: Position,
    (dr, dc): Direction,
) -> Option<(i8, Position)> {
    (1..=MAX_STEPS)
        .map_while(|step| from.offset(dr, dc, step).map(|pos| (step, pos)))
        .find(|&(_, pos)| board.get(pos).is_some())
}

// =========================================================================
// Tests
// =========================================================================
