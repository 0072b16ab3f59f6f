use thiserror::Error;

use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub white_king: bool,
    pub white_queen: bool,
    pub black_king: bool,
    pub black_queen: bool,
}

impl CastlingRights {
    pub fn all() -> CastlingRights {
        CastlingRights {
            white_king: true,
            white_queen: true,
            black_king: true,
            black_queen: true,
        }
    }

    pub fn none() -> CastlingRights {
        CastlingRights {
            white_king: false,
            white_queen: false,
            black_king: false,
            black_queen: false,
        }
    }

    /// Lost permanently once the king moves.
    pub fn revoke_both(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_king = false;
                self.white_queen = false;
            }
            Color::Black => {
                self.black_king = false;
                self.black_queen = false;
            }
        }
    }

    /// Lost once the rook on this home square moves or is captured there.
    /// Squares that are not rook home squares are ignored.
    pub fn revoke_for_rook_square(&mut self, square: Square) {
        match square {
            Square::A1 => self.white_queen = false,
            Square::H1 => self.white_king = false,
            Square::A8 => self.black_queen = false,
            Square::H8 => self.black_king = false,
            _ => {}
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN needs at least 4 fields, found {0}")]
    MissingFields(usize),
    #[error("invalid FEN board field: {0}")]
    Board(String),
    #[error("invalid FEN side to move: {0}")]
    SideToMove(String),
    #[error("invalid FEN castling field: {0}")]
    Castling(String),
    #[error("invalid FEN en passant field: {0}")]
    EnPassant(String),
    #[error("invalid FEN move counter: {0}")]
    Counter(String),
}

/// The authoritative game state for one ply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square behind a pawn that just advanced two ranks; cleared on the next ply.
    pub en_passant: Option<Square>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Everything `make_move` destroys and `unmake_move` restores.
#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    /// (from, to) of the rook's half of a castle.
    pub rook_hop: Option<(Square, Square)>,
    /// Square the pawn actually disappeared from in an en-passant capture.
    pub en_passant_capture_sq: Option<Square>,
}

impl Position {
    pub fn startpos() -> Position {
        let mut pos = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            let file = file as i8;
            pos.put(file, 0, Piece::new(Color::White, kind));
            pos.put(file, 1, Piece::new(Color::White, PieceKind::Pawn));
            pos.put(file, 6, Piece::new(Color::Black, PieceKind::Pawn));
            pos.put(file, 7, Piece::new(Color::Black, kind));
        }
        pos
    }

    fn put(&mut self, file: i8, rank: i8, piece: Piece) {
        if let Some(sq) = Square::new(file, rank) {
            self.board[sq.index()] = Some(piece);
        }
    }

    /// Forsyth-Edwards Notation parser; the clock fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields(fields.len()));
        }

        let mut board = [None; 64];
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::Board(fields[0].to_string()));
        }
        for (row, rank_text) in ranks.iter().enumerate() {
            // FEN lists rank 8 first.
            let rank = 7 - row as i8;
            let mut file: i8 = 0;
            for ch in rank_text.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as i8;
                } else {
                    let piece = Piece::from_fen_char(ch)
                        .ok_or_else(|| FenError::Board(fields[0].to_string()))?;
                    let sq = Square::new(file, rank)
                        .ok_or_else(|| FenError::Board(fields[0].to_string()))?;
                    board[sq.index()] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::Board(fields[0].to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::Board(fields[0].to_string()));
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::none();
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                match ch {
                    'K' => castling.white_king = true,
                    'Q' => castling.white_queen = true,
                    'k' => castling.black_king = true,
                    'q' => castling.black_queen = true,
                    _ => return Err(FenError::Castling(fields[2].to_string())),
                }
            }
        }

        let en_passant = match fields[3] {
            "-" => None,
            name => Some(
                Square::parse(name).ok_or_else(|| FenError::EnPassant(name.to_string()))?,
            ),
        };

        let halfmove_text = fields.get(4).copied().unwrap_or("0");
        let halfmove_clock = halfmove_text
            .parse()
            .map_err(|_| FenError::Counter(halfmove_text.to_string()))?;
        let fullmove_text = fields.get(5).copied().unwrap_or("1");
        let fullmove_number = fullmove_text
            .parse()
            .map_err(|_| FenError::Counter(fullmove_text.to_string()))?;

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0u8;
            for file in 0..8u8 {
                match self.board[(rank * 8 + file) as usize] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling == CastlingRights::none() {
            out.push('-');
        } else {
            if self.castling.white_king {
                out.push('K');
            }
            if self.castling.white_queen {
                out.push('Q');
            }
            if self.castling.black_king {
                out.push('k');
            }
            if self.castling.black_queen {
                out.push('q');
            }
        }

        match self.en_passant {
            Some(sq) => {
                out.push(' ');
                out.push(sq.file_char());
                out.push(sq.rank_char());
            }
            None => out.push_str(" -"),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.index()] = piece;
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.piece_at(sq) == Some(Piece::new(color, PieceKind::King))
        })
    }

    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        // Pawns attack diagonally forward, so scan one rank back from the target.
        let back = -by.forward();
        for file_delta in [-1, 1] {
            if let Some(sq) = target.offset(file_delta, back)
                && self.piece_at(sq) == Some(Piece::new(by, PieceKind::Pawn))
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT_JUMPS {
            if let Some(sq) = target.offset(df, dr)
                && self.piece_at(sq) == Some(Piece::new(by, PieceKind::Knight))
            {
                return true;
            }
        }

        for (df, dr) in KING_STEPS {
            if let Some(sq) = target.offset(df, dr)
                && self.piece_at(sq) == Some(Piece::new(by, PieceKind::King))
            {
                return true;
            }
        }

        self.slider_attacks(target, by, &BISHOP_DIRS, PieceKind::Bishop)
            || self.slider_attacks(target, by, &ROOK_DIRS, PieceKind::Rook)
    }

    fn slider_attacks(
        &self,
        target: Square,
        by: Color,
        dirs: &[(i8, i8)],
        kind: PieceKind,
    ) -> bool {
        for &(df, dr) in dirs {
            let mut cursor = target.offset(df, dr);
            while let Some(sq) = cursor {
                if let Some(piece) = self.piece_at(sq) {
                    if piece.color == by && (piece.kind == kind || piece.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                cursor = sq.offset(df, dr);
            }
        }
        false
    }

    /// Apply a move in place.
    ///
    /// Precondition: `mv` was produced by the move generator for this
    /// position. Anything else is a caller bug, and the board state it would
    /// produce is undefined; a vacant from-square panics outright.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self
            .piece_at(mv.from)
            .expect("make_move: no piece on the from-square");
        let mut captured = self.piece_at(mv.to);

        let prev_castling = self.castling;
        let prev_en_passant = self.en_passant;
        let prev_halfmove = self.halfmove_clock;
        let prev_fullmove = self.fullmove_number;

        self.en_passant = None;
        let mut clock_reset = moved.kind == PieceKind::Pawn || captured.is_some();

        // En passant removes a pawn that is not on the destination square.
        let mut en_passant_capture_sq = None;
        if mv.is_en_passant
            && let Some(cap_sq) = mv.to.offset(0, -moved.color.forward())
        {
            captured = self.piece_at(cap_sq);
            self.set_piece(cap_sq, None);
            en_passant_capture_sq = Some(cap_sq);
            clock_reset = true;
        }

        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(moved));

        if moved.kind == PieceKind::Pawn && mv.to.rank() == moved.color.promotion_rank() {
            let kind = mv.promotion.unwrap_or(PieceKind::Queen);
            self.set_piece(mv.to, Some(Piece::new(moved.color, kind)));
        }

        // The rook's half of a castle.
        let mut rook_hop = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let hop = match (moved.color, mv.to) {
                (Color::White, Square::G1) => Some((Square::H1, Square::F1)),
                (Color::White, Square::C1) => Some((Square::A1, Square::D1)),
                (Color::Black, Square::G8) => Some((Square::H8, Square::F8)),
                (Color::Black, Square::C8) => Some((Square::A8, Square::D8)),
                _ => None,
            };
            if let Some((rook_from, rook_to)) = hop {
                let rook = self.piece_at(rook_from);
                self.set_piece(rook_from, None);
                self.set_piece(rook_to, rook);
                rook_hop = Some((rook_from, rook_to));
            }
        }

        // Castling rights: king move loses both, rook move or a capture on a
        // rook home square loses that side.
        match moved.kind {
            PieceKind::King => self.castling.revoke_both(moved.color),
            PieceKind::Rook => self.castling.revoke_for_rook_square(mv.from),
            _ => {}
        }
        if let Some(piece) = captured
            && piece.kind == PieceKind::Rook
        {
            self.castling.revoke_for_rook_square(mv.to);
        }

        // A double pawn push exposes the passed-over square for one reply.
        if moved.kind == PieceKind::Pawn {
            let from_rank = mv.from.rank();
            let to_rank = mv.to.rank();
            if (to_rank - from_rank).abs() == 2 && from_rank == moved.color.pawn_start_rank() {
                self.en_passant = Square::new(mv.from.file(), (from_rank + to_rank) / 2);
            }
        }

        self.halfmove_clock = if clock_reset {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_en_passant,
            halfmove_clock: prev_halfmove,
            fullmove_number: prev_fullmove,
            moved_piece: moved,
            rook_hop,
            en_passant_capture_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rook_from, rook_to)) = undo.rook_hop {
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, rook);
        }

        // Putting the original piece back also reverts a promotion.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        if mv.is_en_passant {
            if let Some(cap_sq) = undo.en_passant_capture_sq {
                self.set_piece(cap_sq, undo.captured);
            }
        } else {
            self.set_piece(mv.to, undo.captured);
        }
    }

    /// Claimable draw: fifty full moves without a pawn move or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Automatic draw: seventy-five full moves without a pawn move or capture.
    pub fn is_seventyfive_move_draw(&self) -> bool {
        self.halfmove_clock >= 150
    }

    /// Neither side can force checkmate: bare kings, a lone minor piece, or
    /// bishops only with every bishop on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0u32;
        let mut light_bishops = 0u32;
        let mut dark_bishops = 0u32;
        for sq in Square::all() {
            let Some(piece) = self.piece_at(sq) else {
                continue;
            };
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    if sq.is_light() {
                        light_bishops += 1;
                    } else {
                        dark_bishops += 1;
                    }
                }
                // Any pawn, rook, or queen is mating material.
                _ => return false,
            }
        }
        let minors = knights + light_bishops + dark_bishops;
        if minors <= 1 {
            return true;
        }
        knights == 0 && (light_bishops == 0 || dark_bishops == 0)
    }

    /// Zobrist hash over occupancy, side to move, castling rights, and the
    /// en-passant file. Independent of the move clocks, so two visits to the
    /// same position compare equal for repetition counting.
    pub fn position_hash(&self) -> u64 {
        let mut hash = 0u64;
        for sq in Square::all() {
            if let Some(piece) = self.piece_at(sq) {
                hash ^= ZOBRIST.piece_key(piece, sq);
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_to_move;
        }
        for (index, held) in [
            self.castling.white_king,
            self.castling.white_queen,
            self.castling.black_king,
            self.castling.black_queen,
        ]
        .into_iter()
        .enumerate()
        {
            if held {
                hash ^= ZOBRIST.castling_key(index);
            }
        }
        if let Some(sq) = self.en_passant {
            hash ^= ZOBRIST.ep_key(sq.file());
        }
        hash
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
