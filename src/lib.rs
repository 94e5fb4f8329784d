//! Chess rules engine: board state, per-piece move generation, and check,
//! checkmate and stalemate detection.

pub mod config;
pub mod engine;
