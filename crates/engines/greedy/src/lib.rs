//! Greedy Material Move Selector
//!
//! The default automated opponent: plays every legal move one ply deep,
//! scores the resulting position by material only, and picks uniformly at
//! random among the best-scoring moves. Intentionally weak; its only promise
//! is a legal, plausible reply.

use arena_core::{Move, MoveSelector, Position, evaluate, legal_moves_into};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;


/// One-ply greedy selector over the material balance.
///
/// The RNG used for tie-breaking is owned by the selector, so a fixed seed
/// reproduces the same game against the same inputs.
#[derive(Debug)]
pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for GreedyEngine {
    fn choose_move(&mut self, pos: &Position) -> Option<Move> {
        let mut scratch = pos.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut scratch, &mut moves);

        let mut best_score = i32::MIN;
        let mut best_moves: Vec<Move> = Vec::new();
        for mv in moves {
            let undo = scratch.make_move(mv);
            // evaluate() scores for the side to move, which is now the
            // opponent; negate to get the mover's view.
            let score = -evaluate(&scratch);
            scratch.unmake_move(mv, undo);

            if score > best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
        }

        let choice = best_moves.choose(&mut self.rng).copied();
        if let Some(mv) = choice {
            log::debug!(
                "greedy picked one of {} moves at score {}: {:?}",
                best_moves.len(),
                best_score,
                mv
            );
        }
        choice
    }

    fn name(&self) -> &str {
        "Greedy v1.0"
    }
}
