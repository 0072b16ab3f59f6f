//! Core chess rules: board state, legal-move generation, terminal-state
//! classification, notation, and material evaluation.
//!
//! Everything here is a pure computation over an in-memory [`Position`];
//! there is no I/O and no background work. Sessions and move selectors build
//! on top of this crate.

pub mod board;
pub mod eval;
pub mod movegen;
pub mod notation;
pub mod outcome;
pub mod types;
pub mod zobrist;

pub use board::{CastlingRights, FenError, Position, Undo};
pub use eval::{evaluate, material_value};
pub use movegen::{legal_moves, legal_moves_into, perft};
pub use notation::{NotationError, coordinate, parse_coordinate, parse_move, parse_san, san};
pub use outcome::{DrawReason, GameStatus, classify};
pub use types::*;
pub use zobrist::ZOBRIST;

/// A source of moves for the automated side.
///
/// Implementations must return a member of the legal-move set for the given
/// position, or `None` only when that set is empty. Selectors are move
/// *sources*, not state transitions: the session applies whatever they return
/// through the same path as a human move.
pub trait MoveSelector: Send {
    fn choose_move(&mut self, pos: &Position) -> Option<Move>;

    /// Display name for logs and records.
    fn name(&self) -> &str;
}
