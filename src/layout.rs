use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    color::Color,
    coord::{Coord, ParseCoordError},
    piece::{ParsePieceError, Piece, PieceKind},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid square `{square}`: {source}")]
    Square {
        square: Box<str>,
        source: ParseCoordError,
    },
    #[error("invalid piece code `{code}`: {source}")]
    Piece {
        code: Box<str>,
        source: ParsePieceError,
    },
    #[error("square {0} was given more than once")]
    DuplicateSquare(Coord),
}

/// Placement of pieces on the board. A square missing from the layout is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout(FxHashMap<Coord, Piece>);

impl Layout {
    pub fn new() -> Self {
        Layout::default()
    }
    pub fn starting_position() -> Self {
        Layout::from_configuration(PieceKind::STARTING_CONFIGURATION)
    }
    /// Mirrored back ranks from `configuration` with a full row of pawns in
    /// front of each.
    pub fn from_configuration(configuration: [PieceKind; 8]) -> Self {
        let mut layout = Layout::new();
        for color in Color::BOTH {
            let home = color.home_rank();
            let pawns = match color {
                Color::White => 2,
                Color::Black => 7,
            };
            for (square, kind) in Coord::rank_squares(home).zip(configuration) {
                layout.place(square, Piece::new(color, kind));
            }
            for square in Coord::rank_squares(pawns) {
                layout.place(square, Piece::new(color, PieceKind::Pawn));
            }
        }
        layout
    }
    /// Builds a layout from editor entries such as `("e1", "wK")`, rejecting
    /// unknown squares, unknown piece codes and repeated squares.
    pub fn from_codes<I, S, P>(entries: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = (S, P)>,
        S: AsRef<str>,
        P: AsRef<str>,
    {
        let mut layout = Layout::new();
        for (square, code) in entries {
            let (square, code) = (square.as_ref(), code.as_ref());
            let coord = square.parse().map_err(|source| LayoutError::Square {
                square: square.into(),
                source,
            })?;
            let piece = code.parse().map_err(|source| LayoutError::Piece {
                code: code.into(),
                source,
            })?;
            if layout.place(coord, piece).is_some() {
                return Err(LayoutError::DuplicateSquare(coord));
            }
        }
        Ok(layout)
    }
    pub fn get(&self, square: Coord) -> Option<Piece> {
        self.0.get(&square).copied()
    }
    pub fn contains(&self, square: Coord, piece: Piece) -> bool {
        self.get(square) == Some(piece)
    }
    pub fn place(&mut self, square: Coord, piece: Piece) -> Option<Piece> {
        self.0.insert(square, piece)
    }
    pub fn remove(&mut self, square: Coord) -> Option<Piece> {
        self.0.remove(&square)
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.0.iter().map(|(square, piece)| (*square, *piece))
    }
    pub fn count(&self, piece: Piece) -> usize {
        self.0.values().filter(|other| **other == piece).count()
    }
    /// Squares holding `piece`, in notation order.
    pub fn squares_of(&self, piece: Piece) -> Vec<Coord> {
        let mut squares: Vec<_> = self
            .iter()
            .filter(|(_, other)| *other == piece)
            .map(|(square, _)| square)
            .collect();
        squares.sort_unstable();
        squares
    }
    pub fn to_codes(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(square, _)| *square);
        entries
            .into_iter()
            .map(|(square, piece)| (square.to_string(), piece.code()))
            .collect()
    }
}
impl FromIterator<(Coord, Piece)> for Layout {
    fn from_iter<T: IntoIterator<Item = (Coord, Piece)>>(iter: T) -> Self {
        Layout(iter.into_iter().collect())
    }
}
