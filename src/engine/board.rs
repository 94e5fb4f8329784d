//! Mailbox board representation.
//!
//! `Board` stores an optional piece for each of the 64 squares, indexed by
//! `[row - 1][column - 1]`. It is a plain `Copy` value, so the legality
//! filter can simulate a move on a private copy without touching the
//! authoritative board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::types::{ChessError, Color, Move, Piece, PieceType, Position};

/// Back rank from column a to column h, shared by both sides.
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// FEN piece placement of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// An 8×8 grid holding at most one piece per square.
///
/// Equality is structural: two boards are equal iff every square matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board::default()
    }

    /// A board set up in the standard starting position.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }

    /// Put `piece` on `pos`, replacing whatever was there.
    #[inline]
    pub fn place(&mut self, pos: Position, piece: Piece) {
        *self.square_mut(pos) = Some(piece);
    }

    /// The piece on `pos`, if any.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row() as usize - 1][pos.column() as usize - 1]
    }

    /// Empty `pos`, returning its previous occupant.
    #[inline]
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        self.square_mut(pos).take()
    }

    #[inline]
    fn square_mut(&mut self, pos: Position) -> &mut Option<Piece> {
        &mut self.squares[pos.row() as usize - 1][pos.column() as usize - 1]
    }

    /// Clear the board and set up the standard starting position.
    pub fn reset(&mut self) {
        self.squares = [[None; 8]; 8];
        for color in [Color::White, Color::Black] {
            for (i, &kind) in BACK_RANK.iter().enumerate() {
                let column = i as u8 + 1;
                self.place(Position::new(color.back_row(), column), Piece::new(color, kind));
                self.place(
                    Position::new(color.pawn_row(), column),
                    Piece::new(color, PieceType::Pawn),
                );
            }
        }
    }

    /// Apply `mv` without any legality check.
    ///
    /// The start square is cleared and the moving piece, or the promotion
    /// piece of the mover's colour, lands on the end square. An empty start
    /// square leaves the board unchanged.
    pub fn apply_move(&mut self, mv: Move) {
        let Some(piece) = self.take(mv.from) else {
            return;
        };
        let landed = match mv.promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        self.place(mv.to, landed);
    }

    /// Occupied squares of `color`, row 1 to 8, column 1 to 8 within a row.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| match self.get(pos) {
            Some(piece) if piece.color == color => Some((pos, piece)),
            _ => None,
        })
    }

    /// Square of the first king of `color` in scan order.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceType::King)
            .map(|(pos, _)| pos)
    }

    /// Number of occupied squares.
    pub fn piece_count(&self) -> usize {
        self.squares.iter().flatten().filter(|sq| sq.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// FEN piece placement
// ---------------------------------------------------------------------------

impl Board {
    /// Parse the piece-placement field of a FEN string.
    ///
    /// Only the first whitespace-separated field is read, so a full FEN
    /// record is accepted as well; the remaining fields are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let placement = fen
            .split_whitespace()
            .next()
            .ok_or_else(|| ChessError::InvalidFen("empty string".to_string()))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let row = 8 - rank_idx as u8; // FEN starts from rank 8
            let mut column: u8 = 1;
            for ch in rank_str.chars() {
                if column > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "too many squares in rank {row}"
                    )));
                }
                if let Some(digit) = ch.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(ChessError::InvalidFen(format!(
                            "invalid empty count '{ch}' in rank {row}"
                        )));
                    }
                    column += digit as u8;
                } else if let Some((color, kind)) = PieceType::from_char(ch) {
                    board.place(Position::new(row, column), Piece::new(color, kind));
                    column += 1;
                } else {
                    return Err(ChessError::InvalidFen(format!(
                        "invalid character '{ch}' in piece placement"
                    )));
                }
            }
            if column != 9 {
                return Err(ChessError::InvalidFen(format!(
                    "rank {row} has {} squares instead of 8",
                    column - 1
                )));
            }
        }

        Ok(board)
    }

    /// Export the piece-placement field of a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);
        for row in (1..=8u8).rev() {
            let mut empty = 0;
            for column in 1..=8u8 {
                match self.get(Position::new(row, column)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if row > 1 {
                fen.push('/');
            }
        }
        fen
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=8u8).rev() {
            write!(f, "{row} ")?;
            for column in 1..=8u8 {
                let c = self
                    .get(Position::new(row, column))
                    .map_or('.', Piece::to_char);
                write!(f, "{c}")?;
                if column < 8 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
