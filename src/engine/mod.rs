pub mod attacks;
pub mod board;
pub mod game;
pub mod movegen;
pub mod types;

pub use attacks::{is_in_check, is_square_attacked};
pub use board::Board;
pub use game::Game;
pub use movegen::{all_legal_moves, legal_moves, piece_moves};
pub use types::*;
