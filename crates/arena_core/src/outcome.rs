use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has replies.
    Check,
    Checkmate {
        winner: Color,
    },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => f.write_str("ongoing"),
            GameStatus::Check => f.write_str("check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                f.write_str("draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::SeventyFiveMoves) => {
                f.write_str("draw by the seventy-five-move rule")
            }
            GameStatus::Draw(DrawReason::FivefoldRepetition) => {
                f.write_str("draw by fivefold repetition")
            }
        }
    }
}

/// Classify a position after a move has been applied.
///
/// `repetitions` is how many times this exact position (occupancy, side to
/// move, castling rights, en-passant target) has occurred over the whole
/// game, including right now; the caller owns that history. Mate and
/// stalemate outrank the clock and repetition draws, which only matter while
/// the game could otherwise continue.
pub fn classify(pos: &Position, repetitions: u32) -> GameStatus {
    let has_moves = !legal_moves(pos).is_empty();
    let in_check = pos.in_check(pos.side_to_move);

    if !has_moves {
        return if in_check {
            GameStatus::Checkmate {
                winner: pos.side_to_move.other(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if pos.is_insufficient_material() {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    if pos.is_seventyfive_move_draw() {
        return GameStatus::Draw(DrawReason::SeventyFiveMoves);
    }
    if repetitions >= 5 {
        return GameStatus::Draw(DrawReason::FivefoldRepetition);
    }
    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}
