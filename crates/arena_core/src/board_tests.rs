use super::*;
use crate::types::*;

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn fen(text: &str) -> Position {
    Position::from_fen(text).expect("valid FEN")
}

#[test]
fn startpos_round_trips_through_fen() {
    assert_eq!(Position::startpos().to_fen(), STARTPOS_FEN);
    assert_eq!(fen(STARTPOS_FEN), Position::startpos());
}

#[test]
fn fen_clock_fields_default_when_omitted() {
    let pos = fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 1);
}

#[test]
fn fen_rejects_malformed_input() {
    assert_eq!(
        Position::from_fen("8/8/8 w"),
        Err(FenError::MissingFields(2))
    );
    assert!(matches!(
        Position::from_fen("9/8/8/8/8/8/8/8 w - -"),
        Err(FenError::Board(_))
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -"),
        Err(FenError::SideToMove(_))
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq -"),
        Err(FenError::Castling(_))
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9"),
        Err(FenError::EnPassant(_))
    ));
}

#[test]
fn make_then_unmake_restores_the_position() {
    let mut pos = Position::startpos();
    let original = pos.clone();

    let e2 = Square::parse("e2").unwrap();
    let e4 = Square::parse("e4").unwrap();
    let undo = pos.make_move(Move::new(e2, e4));
    assert_ne!(pos, original);
    pos.unmake_move(Move::new(e2, e4), undo);
    assert_eq!(pos, original);
}

#[test]
fn double_push_sets_en_passant_target_for_one_ply() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(
        Square::parse("e2").unwrap(),
        Square::parse("e4").unwrap(),
    ));
    assert_eq!(pos.en_passant, Square::parse("e3"));

    pos.make_move(Move::new(
        Square::parse("g8").unwrap(),
        Square::parse("f6").unwrap(),
    ));
    assert_eq!(pos.en_passant, None);
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    // After 1. e4 Nc6 2. e5 d5: the black pawn sits on d5, not d6.
    let mut pos = fen("r1bqkbnr/ppp1pppp/2n5/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    let capture = Move::en_passant(
        Square::parse("e5").unwrap(),
        Square::parse("d6").unwrap(),
    );
    let undo = pos.make_move(capture);

    assert_eq!(pos.piece_at(Square::parse("d5").unwrap()), None);
    assert_eq!(
        pos.piece_at(Square::parse("d6").unwrap()),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(undo.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
    assert_eq!(undo.en_passant_capture_sq, Square::parse("d5"));
}

#[test]
fn promotion_replaces_the_pawn() {
    let mut pos = fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    pos.make_move(Move::promoting(
        Square::parse("a7").unwrap(),
        Square::parse("a8").unwrap(),
        PieceKind::Rook,
    ));
    assert_eq!(
        pos.piece_at(Square::A8),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
}

#[test]
fn castling_moves_both_king_and_rook() {
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    pos.make_move(Move::castle(Square::E1, Square::G1));
    assert_eq!(
        pos.piece_at(Square::G1),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        pos.piece_at(Square::F1),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert_eq!(pos.piece_at(Square::H1), None);
    assert!(!pos.castling.white_king);
    assert!(!pos.castling.white_queen);
}

#[test]
fn rook_moves_and_rook_captures_revoke_rights() {
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    pos.make_move(Move::new(Square::A1, Square::parse("a3").unwrap()));
    assert!(!pos.castling.white_queen);
    assert!(pos.castling.white_king);

    // Rook takes rook on h8: black loses the king-side right too.
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    pos.make_move(Move::new(Square::H1, Square::H8));
    assert!(!pos.castling.black_king);
    assert!(pos.castling.black_queen);
    assert!(!pos.castling.white_king);
}

#[test]
fn halfmove_clock_resets_on_pawn_moves_and_captures_only() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(
        Square::parse("g1").unwrap(),
        Square::parse("f3").unwrap(),
    ));
    assert_eq!(pos.halfmove_clock, 1);
    pos.make_move(Move::new(
        Square::parse("b8").unwrap(),
        Square::parse("c6").unwrap(),
    ));
    assert_eq!(pos.halfmove_clock, 2);
    pos.make_move(Move::new(
        Square::parse("e2").unwrap(),
        Square::parse("e4").unwrap(),
    ));
    assert_eq!(pos.halfmove_clock, 0);
}

#[test]
fn fullmove_number_increments_after_black() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(
        Square::parse("e2").unwrap(),
        Square::parse("e4").unwrap(),
    ));
    assert_eq!(pos.fullmove_number, 1);
    pos.make_move(Move::new(
        Square::parse("e7").unwrap(),
        Square::parse("e5").unwrap(),
    ));
    assert_eq!(pos.fullmove_number, 2);
}

#[test]
fn attack_queries_see_through_nothing() {
    let pos = fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    // Rook on a1 attacks along the first rank up to the king on e1;
    // squares behind the king are shadowed.
    assert!(pos.is_square_attacked(Square::D1, Color::White));
    assert!(!pos.is_square_attacked(Square::G1, Color::White));
}

#[test]
fn check_detection() {
    let pos = fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
    assert!(pos.in_check(Color::Black));
    assert!(!pos.in_check(Color::White));
}
