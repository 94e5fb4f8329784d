//! Stateful game controller wrapping `Board`.
//!
//! `Game` owns the board and the side to move, validates and applies moves,
//! and answers check / checkmate / stalemate queries. It is the primary type
//! external collaborators interact with.

use serde::{Deserialize, Serialize};

use crate::engine::attacks;
use crate::engine::board::Board;
use crate::engine::movegen;
use crate::engine::types::{ChessError, Color, GameStatus, Move, Position};

// =========================================================================
// Game
// =========================================================================

/// A chess game: one board and the team to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    board: Board,
    team_turn: Color,
}

impl Game {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Create a new game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::with_board(Board::starting(), Color::White)
    }

    /// Create a game from an arbitrary board. The board is not validated.
    pub fn with_board(board: Board, team_turn: Color) -> Self {
        Self { board, team_turn }
    }

    /// Create a game from a FEN record.
    ///
    /// The piece placement is required; the side-to-move field is optional
    /// and defaults to White. Castling, en passant and clock fields are
    /// ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let board = Board::from_fen(fen)?;
        let team_turn = match fen.split_whitespace().nth(1) {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(ChessError::InvalidFen(format!(
                    "invalid side to move: '{other}'"
                )));
            }
        };
        Ok(Self::with_board(board, team_turn))
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board wholesale. No legality validation is performed.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Side to move.
    pub fn team_turn(&self) -> Color {
        self.team_turn
    }

    /// Override the side to move.
    pub fn set_team_turn(&mut self, team: Color) {
        self.team_turn = team;
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Legal moves for the piece on `from`, regardless of whose turn it is.
    ///
    /// `None` if the square is empty.
    pub fn legal_moves(&self, from: Position) -> Option<Vec<Move>> {
        movegen::legal_moves(&self.board, from)
    }

    /// Every legal move available to `team`.
    pub fn all_legal_moves(&self, team: Color) -> Vec<Move> {
        movegen::all_legal_moves(&self.board, team)
    }

    /// Whether `team`'s king is attacked.
    pub fn is_in_check(&self, team: Color) -> bool {
        attacks::is_in_check(&self.board, team)
    }

    /// In check with no legal move.
    pub fn is_in_checkmate(&self, team: Color) -> bool {
        self.is_in_check(team) && !movegen::has_legal_move(&self.board, team)
    }

    /// Not in check, yet no legal move.
    pub fn is_in_stalemate(&self, team: Color) -> bool {
        !self.is_in_check(team) && !movegen::has_legal_move(&self.board, team)
    }

    /// Status of the side to move.
    pub fn status(&self) -> GameStatus {
        let in_check = self.is_in_check(self.team_turn);
        let can_move = movegen::has_legal_move(&self.board, self.team_turn);

        match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Active,
        }
    }

    // -----------------------------------------------------------------
    // Make move
    // -----------------------------------------------------------------

    /// Play a move for the side to move.
    ///
    /// Returns `ChessError::InvalidMove` if the start square is empty, holds
    /// a piece of the side not on move, or `mv` is not among its legal
    /// moves. A rejected move leaves the game untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), ChessError> {
        if let Err(err) = self.validate(mv) {
            tracing::debug!(%mv, error = %err, "move rejected");
            return Err(err);
        }

        self.board.apply_move(mv);
        self.team_turn = !self.team_turn;

        tracing::debug!(%mv, next = %self.team_turn, "move applied");
        Ok(())
    }

    fn validate(&self, mv: Move) -> Result<(), ChessError> {
        let piece = self
            .board
            .get(mv.from)
            .ok_or_else(|| ChessError::invalid_move(mv, "no piece on start square"))?;

        if piece.color != self.team_turn {
            return Err(ChessError::invalid_move(
                mv,
                format!("not {}'s turn", piece.color),
            ));
        }

        let legal = self.legal_moves(mv.from).unwrap_or_default();
        if !legal.contains(&mv) {
            return Err(ChessError::invalid_move(mv, "not a legal move"));
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
