//! Move generation.
//!
//! Pipeline:
//!   1. Generate candidate moves for the piece on a square, ignoring whether
//!      the mover's own king is left attacked.
//!   2. Filter: apply each candidate to a copy of the board and keep it only
//!      if the mover's king is not in check afterwards.
//!
//! Output order is deterministic: direction-table order, then step order.

use crate::engine::attacks::{self, Direction};
use crate::engine::board::Board;
use crate::engine::types::{Color, Move, PieceType, Position};

// =========================================================================
// Public API
// =========================================================================

/// Candidate moves for the piece on `from`.
///
/// An empty square yields no moves.
pub fn piece_moves(board: &Board, from: Position) -> Vec<Move> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let mut moves = Vec::with_capacity(28);
    match piece.kind {
        PieceType::Pawn => generate_pawn_moves(board, from, piece.color, &mut moves),
        kind => {
            let (directions, max_steps) = attacks::movement(kind);
            generate_directional_moves(board, from, piece.color, directions, max_steps, &mut moves);
        }
    }
    moves
}

/// Legal moves for the piece on `from`, or `None` if the square is empty.
pub fn legal_moves(board: &Board, from: Position) -> Option<Vec<Move>> {
    let piece = board.get(from)?;

    let legal = piece_moves(board, from)
        .into_iter()
        .filter(|&mv| {
            let mut copy = *board;
            copy.apply_move(mv);
            let safe = !attacks::is_in_check(&copy, piece.color);
            if !safe {
                tracing::trace!(%mv, "candidate leaves own king in check");
            }
            safe
        })
        .collect();
    Some(legal)
}

/// All legal moves for every piece of `color`, in board scan order.
pub fn all_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces(color)
        .filter_map(|(pos, _)| legal_moves(board, pos))
        .flatten()
        .collect()
}

/// Whether `color` has at least one legal move.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .any(|(pos, _)| legal_moves(board, pos).is_some_and(|moves| !moves.is_empty()))
}

// =========================================================================
// King, queen, rook, bishop, knight
// =========================================================================

/// Walk each direction up to `max_steps` squares.
///
/// Empty squares are emitted and the walk continues; an enemy piece is
/// emitted as a capture and ends the ray; a friendly piece or the board edge
/// ends the ray without emitting.
fn generate_directional_moves(
    board: &Board,
    from: Position,
    us: Color,
    directions: &[Direction],
    max_steps: i8,
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        for step in 1..=max_steps {
            let Some(to) = from.offset(dr, dc, step) else {
                break;
            };
            match board.get(to) {
                None => moves.push(Move::new(from, to)),
                Some(target) => {
                    if target.color != us {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

// =========================================================================
// Pawn moves
// =========================================================================

fn generate_pawn_moves(board: &Board, from: Position, us: Color, moves: &mut Vec<Move>) {
    let forward = us.forward();

    // --- Single push ---
    if let Some(one) = from.offset(forward, 0, 1) {
        if board.get(one).is_none() {
            push_pawn_move(from, one, us, moves);

            // --- Double push ---
            if from.row() == us.pawn_row() {
                if let Some(two) = from.offset(forward, 0, 2) {
                    if board.get(two).is_none() {
                        push_pawn_move(from, two, us, moves);
                    }
                }
            }
        }
    }

    // --- Captures ---
    for side in [-1, 1] {
        let Some(to) = from.offset(forward, side, 1) else {
            continue;
        };
        if board.get(to).is_some_and(|target| target.color != us) {
            push_pawn_move(from, to, us, moves);
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the far rank.
fn push_pawn_move(from: Position, to: Position, us: Color, moves: &mut Vec<Move>) {
    if to.row() == us.promotion_row() {
        for promo in PieceType::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, promo));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Piece;
    use std::collections::HashSet;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn targets(moves: &[Move]) -> HashSet<Position> {
        moves.iter().map(|m| m.to).collect()
    }

    fn squares(names: &[&str]) -> HashSet<Position> {
        names.iter().map(|n| sq(n)).collect()
    }

    fn lone(name: &str, color: Color, kind: PieceType) -> Board {
        let mut b = Board::empty();
        b.place(sq(name), Piece::new(color, kind));
        b
    }

    // -----------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------

    #[test]
    fn empty_square_has_no_candidates() {
        assert!(piece_moves(&Board::starting(), sq("e4")).is_empty());
        assert_eq!(legal_moves(&Board::starting(), sq("e4")), None);
    }

    // -----------------------------------------------------------------
    // King
    // -----------------------------------------------------------------

    #[test]
    fn king_in_center_has_eight_moves() {
        let b = lone("d4", Color::White, PieceType::King);
        let moves = piece_moves(&b, sq("d4"));
        assert_eq!(moves.len(), 8);
        assert_eq!(
            targets(&moves),
            squares(&["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"])
        );
    }

    #[test]
    fn king_in_corner_has_three_moves() {
        let b = lone("a1", Color::Black, PieceType::King);
        assert_eq!(targets(&piece_moves(&b, sq("a1"))), squares(&["a2", "b1", "b2"]));
    }

    #[test]
    fn king_order_follows_compass_table() {
        let b = lone("d4", Color::White, PieceType::King);
        let order: Vec<Position> = piece_moves(&b, sq("d4")).iter().map(|m| m.to).collect();
        let expected: Vec<Position> = ["d5", "d3", "e4", "c4", "e5", "c5", "e3", "c3"]
            .iter()
            .map(|n| sq(n))
            .collect();
        assert_eq!(order, expected);
    }

    // -----------------------------------------------------------------
    // Knight
    // -----------------------------------------------------------------

    #[test]
    fn knight_in_center_has_eight_moves() {
        let b = lone("d4", Color::White, PieceType::Knight);
        assert_eq!(
            targets(&piece_moves(&b, sq("d4"))),
            squares(&["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"])
        );
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let b = Board::starting();
        assert_eq!(targets(&piece_moves(&b, sq("g1"))), squares(&["f3", "h3"]));
        assert_eq!(targets(&piece_moves(&b, sq("b8"))), squares(&["a6", "c6"]));
    }

    // -----------------------------------------------------------------
    // Sliders
    // -----------------------------------------------------------------

    #[test]
    fn rook_on_empty_board_has_fourteen_moves() {
        let b = lone("d4", Color::White, PieceType::Rook);
        let moves = piece_moves(&b, sq("d4"));
        assert_eq!(moves.len(), 14);
        assert!(moves.iter().all(|m| m.to.row() == 4 || m.to.column() == 4));
    }

    #[test]
    fn bishop_on_empty_board_has_thirteen_moves() {
        let b = lone("d4", Color::White, PieceType::Bishop);
        let moves = piece_moves(&b, sq("d4"));
        assert_eq!(moves.len(), 13);
        assert!(moves.iter().all(|m| {
            (m.to.row() as i8 - 4).abs() == (m.to.column() as i8 - 4).abs()
        }));
    }

    #[test]
    fn queen_on_empty_board_has_twenty_seven_moves() {
        let b = lone("d4", Color::White, PieceType::Queen);
        assert_eq!(piece_moves(&b, sq("d4")).len(), 27);
    }

    #[test]
    fn slider_stops_at_friend_and_captures_enemy() {
        // White rook a1, white pawn a4, black knight d1.
        let mut b = lone("a1", Color::White, PieceType::Rook);
        b.place(sq("a4"), Piece::new(Color::White, PieceType::Pawn));
        b.place(sq("d1"), Piece::new(Color::Black, PieceType::Knight));
        assert_eq!(
            targets(&piece_moves(&b, sq("a1"))),
            squares(&["a2", "a3", "b1", "c1", "d1"])
        );
    }

    #[test]
    fn starting_sliders_are_boxed_in() {
        let b = Board::starting();
        for name in ["a1", "c1", "d1", "e1", "f1", "h1", "a8", "c8", "d8", "e8"] {
            assert!(piece_moves(&b, sq(name)).is_empty(), "{name} should be blocked");
        }
    }

    // -----------------------------------------------------------------
    // Pawns
    // -----------------------------------------------------------------

    #[test]
    fn white_pawn_from_start_row() {
        let b = Board::starting();
        let moves = piece_moves(&b, sq("a2"));
        assert_eq!(
            moves,
            vec![Move::new(sq("a2"), sq("a3")), Move::new(sq("a2"), sq("a4"))]
        );
    }

    #[test]
    fn black_pawn_moves_down() {
        let b = Board::starting();
        assert_eq!(targets(&piece_moves(&b, sq("e7"))), squares(&["e6", "e5"]));
    }

    #[test]
    fn pawn_off_start_row_single_step_only() {
        let b = lone("e3", Color::White, PieceType::Pawn);
        assert_eq!(targets(&piece_moves(&b, sq("e3"))), squares(&["e4"]));
    }

    #[test]
    fn pawn_blocked_directly() {
        let mut b = lone("e2", Color::White, PieceType::Pawn);
        b.place(sq("e3"), Piece::new(Color::Black, PieceType::Knight));
        assert!(piece_moves(&b, sq("e2")).is_empty());
    }

    #[test]
    fn pawn_double_step_blocked_on_second_square() {
        let mut b = lone("e7", Color::Black, PieceType::Pawn);
        b.place(sq("e5"), Piece::new(Color::White, PieceType::Pawn));
        assert_eq!(targets(&piece_moves(&b, sq("e7"))), squares(&["e6"]));
    }

    #[test]
    fn pawn_captures_diagonally_only_enemies() {
        let mut b = lone("d4", Color::White, PieceType::Pawn);
        b.place(sq("c5"), Piece::new(Color::Black, PieceType::Rook));
        b.place(sq("e5"), Piece::new(Color::White, PieceType::Rook));
        assert_eq!(targets(&piece_moves(&b, sq("d4"))), squares(&["d5", "c5"]));
    }

    #[test]
    fn pawn_on_edge_column_has_one_capture_side() {
        let mut b = lone("a6", Color::Black, PieceType::Pawn);
        b.place(sq("b5"), Piece::new(Color::White, PieceType::Bishop));
        assert_eq!(targets(&piece_moves(&b, sq("a6"))), squares(&["a5", "b5"]));
    }

    #[test]
    fn pawn_promotion_emits_four_moves() {
        let b = lone("c7", Color::White, PieceType::Pawn);
        let moves = piece_moves(&b, sq("c7"));
        assert_eq!(
            moves,
            PieceType::PROMOTIONS
                .iter()
                .map(|&p| Move::with_promotion(sq("c7"), sq("c8"), p))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn pawn_promotion_on_capture() {
        let mut b = lone("b2", Color::Black, PieceType::Pawn);
        b.place(sq("b1"), Piece::new(Color::White, PieceType::Knight));
        b.place(sq("a1"), Piece::new(Color::White, PieceType::Rook));
        let moves = piece_moves(&b, sq("b2"));
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.to == sq("a1") && m.promotion.is_some()));
    }

    #[test]
    fn pawn_on_far_row_has_no_moves() {
        // A white pawn placed on row 8 cannot move off the board.
        let b = lone("e8", Color::White, PieceType::Pawn);
        assert!(piece_moves(&b, sq("e8")).is_empty());
    }

    // -----------------------------------------------------------------
    // Legality filter
    // -----------------------------------------------------------------

    #[test]
    fn pinned_piece_cannot_leave_the_pin() {
        // White king e1, white rook e2, black rook e8: the rook may only
        // slide along the e-file.
        let b = board("4r2k/8/8/8/8/8/4R3/4K3");
        let legal = legal_moves(&b, sq("e2")).unwrap();
        assert_eq!(
            targets(&legal),
            squares(&["e3", "e4", "e5", "e6", "e7", "e8"])
        );
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let b = board("7k/8/8/8/8/8/r7/4K3");
        let legal = legal_moves(&b, sq("e1")).unwrap();
        assert_eq!(targets(&legal), squares(&["d1", "f1"]));
    }

    #[test]
    fn king_may_capture_unprotected_attacker() {
        let b = board("7k/8/8/8/8/8/4q3/4K3");
        let legal = legal_moves(&b, sq("e1")).unwrap();
        assert_eq!(legal, vec![Move::new(sq("e1"), sq("e2"))]);
    }

    #[test]
    fn legal_moves_do_not_mutate_board() {
        let b = board("4r2k/8/8/8/8/8/4R3/4K3");
        let before = b;
        let _ = legal_moves(&b, sq("e2"));
        assert_eq!(b, before);
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let b = Board::starting();
        assert_eq!(all_legal_moves(&b, Color::White).len(), 20);
        assert_eq!(all_legal_moves(&b, Color::Black).len(), 20);
        assert!(has_legal_move(&b, Color::White));
    }

    #[test]
    fn stalemated_side_has_no_move() {
        let b = board("k7/2K5/1Q6/8/8/8/8/8");
        assert!(all_legal_moves(&b, Color::Black).is_empty());
        assert!(!has_legal_move(&b, Color::Black));
    }
}
