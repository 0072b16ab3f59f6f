//! Game session orchestration.
//!
//! A [`GameSession`] owns one live [`Position`] plus the applied-move
//! history and terminal status. Human text input and the automated opponent
//! converge on the same apply-then-classify path, so the rules are enforced
//! in exactly one place. Sessions are single-owner: a hosting application
//! serving many games keeps one independent session per game and serializes
//! calls against each.

use arena_core::{
    GameStatus, Move, MoveSelector, NotationError, Position, classify, legal_moves, notation,
};
use greedy_engine::GreedyEngine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed, ambiguous, or illegal move text; the position is untouched.
    #[error(transparent)]
    Notation(#[from] NotationError),
    /// The game already ended; start a new session to keep playing.
    #[error("the game is already over")]
    GameOver,
}

/// One live game: position, history, status, and the automated side's
/// move selector.
pub struct GameSession {
    position: Position,
    moves: Vec<Move>,
    san_history: Vec<String>,
    /// Position hashes after every ply, starting with the initial position;
    /// drives repetition counting.
    hash_history: Vec<u64>,
    status: GameStatus,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    /// Standard starting position against the greedy opponent.
    pub fn new() -> Self {
        Self::build(Position::startpos(), Box::new(GreedyEngine::new()))
    }

    pub fn with_selector(selector: Box<dyn MoveSelector>) -> Self {
        Self::build(Position::startpos(), selector)
    }

    /// Start from an arbitrary position, for analysis setups and tests.
    pub fn from_position(position: Position) -> Self {
        Self::build(position, Box::new(GreedyEngine::new()))
    }

    pub fn from_position_with(position: Position, selector: Box<dyn MoveSelector>) -> Self {
        Self::build(position, selector)
    }

    fn build(position: Position, selector: Box<dyn MoveSelector>) -> Self {
        let hash_history = vec![position.position_hash()];
        let status = classify(&position, 1);
        GameSession {
            position,
            moves: Vec::new(),
            san_history: Vec::new(),
            hash_history,
            status,
            selector,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Legal moves for the side to move; empty once the session is terminal,
    /// even when the bare position would still have moves (clock and
    /// repetition draws).
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_terminal() {
            Vec::new()
        } else {
            legal_moves(&self.position)
        }
    }

    /// Applied moves in short algebraic notation, for display.
    pub fn history(&self) -> &[String] {
        &self.san_history
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Decode, validate, and apply one move of text input. All-or-nothing:
    /// on any error the session is unchanged.
    pub fn submit_move(&mut self, text: &str) -> Result<Move, SessionError> {
        self.ensure_ongoing()?;
        let mv = notation::parse_move(&self.position, text)?;
        self.apply(mv);
        Ok(mv)
    }

    /// Apply an already-decoded move after checking legal-set membership.
    pub fn play(&mut self, mv: Move) -> Result<(), SessionError> {
        self.ensure_ongoing()?;
        if !legal_moves(&self.position).contains(&mv) {
            return Err(NotationError::Illegal(notation::coordinate(mv)).into());
        }
        self.apply(mv);
        Ok(())
    }

    /// Let the automated side move. Runs the selector, then the same
    /// apply-then-classify path as a submitted move.
    pub fn request_automated_move(&mut self) -> Result<Move, SessionError> {
        self.ensure_ongoing()?;
        let mv = self
            .selector
            .choose_move(&self.position)
            .expect("selector returned no move for a position with legal moves");
        // A selector inventing moves is a programming error, not user input.
        assert!(
            legal_moves(&self.position).contains(&mv),
            "selector {} returned a move outside the legal set",
            self.selector.name()
        );
        self.apply(mv);
        Ok(mv)
    }

    /// Occurrences of the current position across the game, including now.
    pub fn repetition_count(&self) -> u32 {
        let current = self.position.position_hash();
        self.hash_history.iter().filter(|&&h| h == current).count() as u32
    }

    /// Claimable-draw query; fivefold ends the game automatically.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            moves: self.san_history.clone(),
            status: self.status,
        }
    }

    fn ensure_ongoing(&self) -> Result<(), SessionError> {
        if self.status.is_terminal() {
            Err(SessionError::GameOver)
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, mv: Move) {
        // Encode before applying; SAN needs the pre-move position.
        let san = notation::san(&self.position, mv);
        log::debug!("applying {san}");

        self.position.make_move(mv);
        self.hash_history.push(self.position.position_hash());
        self.moves.push(mv);
        self.san_history.push(san);

        self.status = classify(&self.position, self.repetition_count());
        if self.status.is_terminal() {
            log::info!("game over after {} plies: {}", self.moves.len(), self.status);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of a finished or in-flight game, for display and
/// external persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in short algebraic notation, in play order.
    pub moves: Vec<String>,
    pub status: GameStatus,
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<GameRecord, serde_json::Error> {
        serde_json::from_str(text)
    }
}
