//! Codec between [`Position`] and the notation string
//! `<placement> <turn> <castling> <en passant> <halfmove> <fullmove>`.
//!
//! Decoding never fails: missing or unreadable fields fall back to their
//! defaults. A malformed placement is decoded square by square rather than
//! discarded: unknown characters are skipped, pieces past the h-file and rank
//! descriptors after the eighth are dropped, and missing ranks stay empty.
//! Encoding always writes `0 1` as the move counters.

use std::{
    fmt::{self, Display, Formatter},
    iter::Peekable,
};

use crate::{
    castling_right::CastlingRights,
    color::Color,
    coord::Coord,
    layout::Layout,
    piece::Piece,
    position::Position,
};

pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const EMPTY_POSITION: &str = "8/8/8/8/8/8/8/8 w - - 0 1";

pub fn decode(notation: &str) -> Position {
    let mut fields = notation.split_whitespace();
    let pieces = fields.next().map(decode_placement).unwrap_or_default();
    let turn = match fields.next() {
        Some("b") => Color::Black,
        _ => Color::White,
    };
    let castling_rights = fields
        .next()
        .map(CastlingRights::from_fen_field)
        .unwrap_or_default();
    let en_passant = fields.next().and_then(|field| field.parse().ok());
    Position {
        pieces,
        turn,
        castling_rights,
        en_passant,
    }
}
fn decode_placement(placement: &str) -> Layout {
    let mut layout = Layout::new();
    for (y, rank) in placement.split('/').take(8).enumerate() {
        let mut x: u32 = 0;
        for c in rank.chars() {
            if let Some(run) = c.to_digit(10) {
                x += run;
            } else if let Ok(piece) = Piece::from_fen(c) {
                // pieces past the h-file have nowhere to go
                if let Some(square) = u8::try_from(x)
                    .ok()
                    .and_then(|x| Coord::new_checked(x, y as u8))
                {
                    layout.place(square, piece);
                }
                x += 1;
            }
        }
    }
    layout
}
pub fn encode(position: &Position) -> String {
    Fen(position).to_string()
}

/// Display adapter writing a position as a notation string.
#[derive(Debug, Clone, Copy)]
pub struct Fen<'a>(pub &'a Position);

impl Display for Fen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let position = self.0;
        for y in 0..8 {
            if y != 0 {
                write!(f, "/")?;
            }
            let row = (0..8).map(|x| position.pieces.get(Coord::new(x, y)));
            for cell in CellIter(row.peekable()) {
                write!(f, "{cell}")?;
            }
        }
        write!(f, " {}", position.turn.lowercase())?;
        write!(f, " {}", position.castling_rights)?;
        if let Some(square) = position.en_passant {
            write!(f, " {square}")?;
        } else {
            write!(f, " -")?;
        }
        write!(f, " 0 1")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Cell {
    Piece(Piece),
    Space(u8),
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Piece(piece) => write!(f, "{}", piece.fen())?,
            Cell::Space(space) => write!(f, "{space}")?,
        }
        Ok(())
    }
}
struct CellIter<T>(Peekable<T>)
where
    T: Iterator;

impl<T> Iterator for CellIter<T>
where
    T: Iterator<Item = Option<Piece>>,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|piece| match piece {
            Some(piece) => Cell::Piece(piece),
            None => {
                let mut count = 1;
                while self.0.peek().is_some_and(Option::is_none) {
                    self.0.next();
                    count += 1;
                }
                Cell::Space(count)
            }
        })
    }
}
