use crate::board::Position;
use crate::types::*;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all strictly legal moves for the side to move.
///
/// The result is deterministic for a fixed position: squares are scanned in
/// index order and the filter preserves generation order, so callers may
/// index into the returned set as long as they hold the same position.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut scratch = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut scratch, &mut out);
    out
}

/// Buffer-reusing variant; the position is restored before returning.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    // Play each candidate and reject those that leave the mover in check.
    // This one filter covers pins, discovered checks, and king walks.
    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let exposed = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !exposed
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in Square::all() {
        let Some(piece) = pos.piece_at(from) else {
            continue;
        };
        if piece.color != pos.side_to_move {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => gen_pawn(pos, from, piece.color, out),
            PieceKind::Knight => gen_steps(pos, from, piece.color, &KNIGHT_JUMPS, out),
            PieceKind::Bishop => gen_slides(pos, from, piece.color, &BISHOP_DIRS, out),
            PieceKind::Rook => gen_slides(pos, from, piece.color, &ROOK_DIRS, out),
            PieceKind::Queen => gen_slides(pos, from, piece.color, &KING_STEPS, out),
            PieceKind::King => {
                gen_steps(pos, from, piece.color, &KING_STEPS, out);
                gen_castles(pos, from, piece.color, out);
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, color: Color, out: &mut Vec<Move>) {
    if to.rank() == color.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(Move::promoting(from, to, kind));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, color: Color, out: &mut Vec<Move>) {
    let forward = color.forward();

    if let Some(to) = from.offset(0, forward)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, color, out);

        if from.rank() == color.pawn_start_rank()
            && let Some(two) = from.offset(0, 2 * forward)
            && pos.piece_at(two).is_none()
        {
            out.push(Move::new(from, two));
        }
    }

    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, forward) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != color => push_pawn_move(from, to, color, out),
            None if pos.en_passant == Some(to) => out.push(Move::en_passant(from, to)),
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, color: Color, steps: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in steps {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(target) if target.color != color => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slides(pos: &Position, from: Square, color: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(target) => {
                    if target.color != color {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            cursor = to.offset(df, dr);
        }
    }
}

fn gen_castles(pos: &Position, from: Square, color: Color, out: &mut Vec<Move>) {
    let (home, king_side, queen_side, f, g, d, c, b) = match color {
        Color::White => (
            Square::E1,
            pos.castling.white_king,
            pos.castling.white_queen,
            Square::F1,
            Square::G1,
            Square::D1,
            Square::C1,
            Square::B1,
        ),
        Color::Black => (
            Square::E8,
            pos.castling.black_king,
            pos.castling.black_queen,
            Square::F8,
            Square::G8,
            Square::D8,
            Square::C8,
            Square::B8,
        ),
    };
    // Rights imply the king never moved, but the board may have been set up
    // from FEN, so verify the start square. No castling out of check.
    if from != home || pos.in_check(color) {
        return;
    }

    let enemy = color.other();
    if king_side
        && pos.piece_at(f).is_none()
        && pos.piece_at(g).is_none()
        && !pos.is_square_attacked(f, enemy)
        && !pos.is_square_attacked(g, enemy)
    {
        out.push(Move::castle(home, g));
    }
    if queen_side
        && pos.piece_at(d).is_none()
        && pos.piece_at(c).is_none()
        && pos.piece_at(b).is_none()
        && !pos.is_square_attacked(d, enemy)
        && !pos.is_square_attacked(c, enemy)
    {
        out.push(Move::castle(home, c));
    }
}

/// Legal-move tree size to the given depth; the standard validation tool for
/// the generator.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let undo = pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.unmake_move(mv, undo);
    }
    nodes
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
