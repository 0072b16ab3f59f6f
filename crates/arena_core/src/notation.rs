//! Move text codec: short algebraic notation and coordinate notation.
//!
//! Parsing never pattern-matches squares in isolation; every candidate is
//! resolved against the legal-move set of the position, so the castle and
//! en-passant flags on the returned [`Move`] are always correct and anything
//! that fails to resolve is rejected without touching the position.

use thiserror::Error;

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::{Move, Piece, PieceKind, Square};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    /// The text is not recognizable as either notation.
    #[error("unrecognized move text: {0:?}")]
    Unparseable(String),
    /// The text resolves to more than one legal move.
    #[error("ambiguous move: {0:?} matches more than one legal move")]
    Ambiguous(String),
    /// The text parses but names no legal move in this position.
    #[error("illegal move: {0:?}")]
    Illegal(String),
}

/// Decode move text against a position: short algebraic first, then
/// coordinate form.
pub fn parse_move(pos: &Position, text: &str) -> Result<Move, NotationError> {
    let text = text.trim();
    match parse_san(pos, text) {
        Ok(mv) => Ok(mv),
        Err(san_err) => match parse_coordinate(pos, text) {
            Ok(mv) => Ok(mv),
            // The algebraic reading was the closer interpretation.
            Err(NotationError::Unparseable(_)) => Err(san_err),
            Err(coord_err) => Err(coord_err),
        },
    }
}

/// Decode coordinate notation (`e2e4`, `e7e8q`).
pub fn parse_coordinate(pos: &Position, text: &str) -> Result<Move, NotationError> {
    let unparseable = || NotationError::Unparseable(text.to_string());

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(unparseable());
    }
    let from = Square::parse(&text[0..2]).ok_or_else(unparseable)?;
    let to = Square::parse(&text[2..4]).ok_or_else(unparseable)?;
    let promotion = match text.len() {
        5 => {
            let kind = PieceKind::from_letter(text.as_bytes()[4] as char)
                .filter(|k| PROMOTION_LETTERS.contains(k))
                .ok_or_else(unparseable)?;
            Some(kind)
        }
        _ => None,
    };

    // from/to/promotion identify at most one legal move; matching against the
    // generated set fills in the castle and en-passant flags.
    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promotion == promotion)
        .ok_or_else(|| NotationError::Illegal(text.to_string()))
}

const PROMOTION_LETTERS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Decode short algebraic notation (`Nf3`, `exd5`, `O-O`, `e8=Q`).
pub fn parse_san(pos: &Position, text: &str) -> Result<Move, NotationError> {
    let raw = text;
    let unparseable = || NotationError::Unparseable(raw.to_string());

    // Check, mate, and annotation glyphs carry no information for decoding.
    let text = text.trim_end_matches(['+', '#', '!', '?']);
    if text.is_empty() || !text.is_ascii() {
        return Err(unparseable());
    }

    // Castling, with the common 0/o spellings.
    let normalized: String = text
        .chars()
        .map(|c| if c == '0' || c == 'o' { 'O' } else { c })
        .collect();
    if normalized == "O-O" || normalized == "O-O-O" {
        let king_target_file = if normalized == "O-O" { 6 } else { 2 };
        return legal_moves(pos)
            .into_iter()
            .find(|m| m.is_castle && m.to.file() == king_target_file)
            .ok_or_else(|| NotationError::Illegal(raw.to_string()));
    }

    // Promotion suffix: `e8=Q`, tolerating the bare `e8Q` form.
    let mut body = text;
    let mut promotion = None;
    if body.len() > 2
        && let Some(last) = body.chars().last()
        && last.is_ascii_uppercase()
        && let Some(kind) = PieceKind::from_letter(last).filter(|k| PROMOTION_LETTERS.contains(k))
    {
        promotion = Some(kind);
        body = &body[..body.len() - 1];
        body = body.strip_suffix('=').unwrap_or(body);
    }

    // Destination square is always the tail of what remains.
    if body.len() < 2 {
        return Err(unparseable());
    }
    let dest = Square::parse(&body[body.len() - 2..]).ok_or_else(unparseable)?;
    let mut head = &body[..body.len() - 2];

    let capture = head.ends_with('x');
    if capture {
        head = &head[..head.len() - 1];
    }

    let kind = match head.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let kind = PieceKind::from_letter(c)
                .filter(|k| *k != PieceKind::Pawn)
                .ok_or_else(unparseable)?;
            head = &head[1..];
            kind
        }
        _ => PieceKind::Pawn,
    };

    // Disambiguators: optional origin file, then optional origin rank.
    let mut from_file: Option<i8> = None;
    let mut from_rank: Option<i8> = None;
    for c in head.chars() {
        match c {
            'a'..='h' if from_file.is_none() && from_rank.is_none() => {
                from_file = Some((c as u8 - b'a') as i8);
            }
            '1'..='8' if from_rank.is_none() => {
                from_rank = Some((c as u8 - b'1') as i8);
            }
            _ => return Err(unparseable()),
        }
    }

    let candidates: Vec<Move> = legal_moves(pos)
        .into_iter()
        .filter(|m| {
            if m.to != dest || m.promotion != promotion {
                return false;
            }
            let Some(piece) = pos.piece_at(m.from) else {
                return false;
            };
            if piece.kind != kind {
                return false;
            }
            if let Some(rank) = from_rank
                && m.from.rank() != rank
            {
                return false;
            }
            // A bare pawn destination is a push; captures must name the
            // origin file, which also keeps `d5` from matching `cxd5`.
            if kind == PieceKind::Pawn {
                if m.from.file() != from_file.unwrap_or(dest.file()) {
                    return false;
                }
            } else if let Some(file) = from_file
                && m.from.file() != file
            {
                return false;
            }
            if capture && pos.piece_at(m.to).is_none() && !m.is_en_passant {
                return false;
            }
            true
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(NotationError::Illegal(raw.to_string())),
        [only] => Ok(*only),
        _ => Err(NotationError::Ambiguous(raw.to_string())),
    }
}

/// Canonical short algebraic encoding of a legal move, including the `+`/`#`
/// suffix and minimal disambiguation.
pub fn san(pos: &Position, mv: Move) -> String {
    let mut out = if mv.is_castle {
        if mv.to.file() > mv.from.file() {
            String::from("O-O")
        } else {
            String::from("O-O-O")
        }
    } else {
        let piece = pos
            .piece_at(mv.from)
            .expect("san: no piece on the from-square");
        let capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant;

        let mut s = String::new();
        if piece.kind == PieceKind::Pawn {
            if capture {
                s.push(mv.from.file_char());
            }
        } else {
            s.push(piece.kind.letter());
            s.push_str(&disambiguation(pos, mv, piece));
        }
        if capture {
            s.push('x');
        }
        s.push_str(&mv.to.to_string());
        if let Some(kind) = mv.promotion {
            s.push('=');
            s.push(kind.letter());
        }
        s
    };

    let mut after = pos.clone();
    after.make_move(mv);
    if after.in_check(after.side_to_move) {
        out.push(if legal_moves(&after).is_empty() {
            '#'
        } else {
            '+'
        });
    }
    out
}

/// Smallest origin qualifier that separates `mv` from other legal moves of
/// the same piece kind to the same destination: file if it does, else rank,
/// else both.
fn disambiguation(pos: &Position, mv: Move, piece: Piece) -> String {
    let rivals: Vec<Square> = legal_moves(pos)
        .into_iter()
        .filter(|m| {
            m.to == mv.to && m.from != mv.from && pos.piece_at(m.from) == Some(piece)
        })
        .map(|m| m.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}

/// Coordinate encoding: origin, destination, optional promotion letter.
/// Needs no position context.
pub fn coordinate(mv: Move) -> String {
    let mut out = format!("{}{}", mv.from, mv.to);
    if let Some(kind) = mv.promotion {
        out.push(kind.lower_letter());
    }
    out
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
