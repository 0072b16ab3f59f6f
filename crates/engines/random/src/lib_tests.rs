use super::*;
use arena_core::{MoveSelector, Position, legal_moves};

fn fen(text: &str) -> Position {
    Position::from_fen(text).expect("valid FEN")
}

#[test]
fn always_returns_a_legal_move() {
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let legal = legal_moves(&pos);
    let mut engine = RandomEngine::new();
    for _ in 0..100 {
        let mv = engine.choose_move(&pos).expect("position has moves");
        assert!(legal.contains(&mv));
    }
}

#[test]
fn fixed_seed_reproduces_the_choice() {
    let pos = Position::startpos();
    let mut first = RandomEngine::with_seed(9);
    let mut second = RandomEngine::with_seed(9);
    for _ in 0..10 {
        assert_eq!(first.choose_move(&pos), second.choose_move(&pos));
    }
}

#[test]
fn returns_none_without_legal_moves() {
    // Stalemate: black king buried in the corner.
    let pos = fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    let mut engine = RandomEngine::with_seed(4);
    assert_eq!(engine.choose_move(&pos), None);
}
