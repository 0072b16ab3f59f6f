//! Random Move Selector
//!
//! Picks uniformly from the legal-move set. No evaluation at all; useful as
//! a baseline opponent and as an unbiased move source for randomized
//! playout tests.

use arena_core::{Move, MoveSelector, Position, legal_moves};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[cfg(test)]
mod lib_tests;

#[derive(Debug)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
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

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomEngine {
    fn choose_move(&mut self, pos: &Position) -> Option<Move> {
        legal_moves(pos).choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
