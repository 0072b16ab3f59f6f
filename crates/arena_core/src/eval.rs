use crate::board::Position;
use crate::types::{Color, PieceKind, Square};

/// Classic point value of a piece. The king carries no material value.
pub fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// Material balance from the side-to-move perspective.
pub fn evaluate(pos: &Position) -> i32 {
    let mut balance = 0;
    for sq in Square::all() {
        if let Some(piece) = pos.piece_at(sq) {
            let value = material_value(piece.kind);
            balance += if piece.color == Color::White {
                value
            } else {
                -value
            };
        }
    }
    match pos.side_to_move {
        Color::White => balance,
        Color::Black => -balance,
    }
}
