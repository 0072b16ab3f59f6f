use super::*;
use crate::board::Position;
use crate::types::*;

fn fen(text: &str) -> Position {
    Position::from_fen(text).expect("valid FEN")
}

#[test]
fn startpos_has_twenty_moves() {
    let moves = legal_moves(&Position::startpos());
    assert_eq!(moves.len(), 20);
}

#[test]
fn kiwipete_has_forty_eight_moves() {
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    assert_eq!(legal_moves(&pos).len(), 48);
}

#[test]
fn generation_is_deterministic() {
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    assert_eq!(legal_moves(&pos), legal_moves(&pos));
}

#[test]
fn pinned_piece_cannot_move() {
    // Rook on e1 pins the knight on e5 against the king on e8.
    let pos = fen("4k3/8/8/4n3/8/8/8/4R1K1 b - - 0 1");
    let knight = Square::parse("e5").unwrap();
    let moves = legal_moves(&pos);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.from != knight));
}

#[test]
fn en_passant_is_generated_with_its_flag() {
    let pos = fen("r1bqkbnr/ppp1pppp/2n5/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    let capture = legal_moves(&pos)
        .into_iter()
        .find(|m| m.from == Square::parse("e5").unwrap() && m.to == Square::parse("d6").unwrap())
        .expect("exd6 must be legal");
    assert!(capture.is_en_passant);
}

#[test]
fn en_passant_expires_without_the_target() {
    // Same board but the target square is gone: no capture to d6.
    let pos = fen("r1bqkbnr/ppp1pppp/2n5/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3");
    assert!(
        !legal_moves(&pos)
            .iter()
            .any(|m| m.to == Square::parse("d6").unwrap())
    );
}

#[test]
fn promotions_cover_all_four_kinds() {
    let pos = fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let promotions: Vec<Move> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.to == Square::A8)
        .collect();
    assert_eq!(promotions.len(), 4);
    for kind in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        assert!(promotions.iter().any(|m| m.promotion == Some(kind)));
    }
}

#[test]
fn castling_is_generated_when_the_path_is_safe() {
    let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moves = legal_moves(&pos);
    assert!(moves.iter().any(|m| m.is_castle && m.to == Square::G1));
    assert!(moves.iter().any(|m| m.is_castle && m.to == Square::C1));
}

#[test]
fn castling_through_an_attacked_square_is_illegal() {
    // Black rook on g3 covers g1: king-side castling is out even though
    // f1/g1 are empty and the right is intact.
    let pos = fen("4k3/8/8/8/8/6r1/8/R3K2R w KQ - 0 1");
    let moves = legal_moves(&pos);
    assert!(!moves.iter().any(|m| m.is_castle && m.to == Square::G1));
    // The queen-side path is untouched.
    assert!(moves.iter().any(|m| m.is_castle && m.to == Square::C1));
}

#[test]
fn castling_out_of_check_is_illegal() {
    let pos = fen("4k3/8/8/8/8/4r3/8/R3K2R w KQ - 0 1");
    assert!(pos.in_check(Color::White));
    assert!(!legal_moves(&pos).iter().any(|m| m.is_castle));
}

#[test]
fn castling_needs_an_empty_path() {
    let pos = fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
    assert!(!legal_moves(&pos).iter().any(|m| m.is_castle));
}

#[test]
fn no_generated_move_leaves_the_mover_in_check() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        "rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
    ];
    for text in fens {
        let mut pos = fen(text);
        let mover = pos.side_to_move;
        for mv in legal_moves(&pos) {
            let undo = pos.make_move(mv);
            assert!(!pos.in_check(mover), "{text}: {mv:?} leaves the king hanging");
            pos.unmake_move(mv, undo);
        }
    }
}
