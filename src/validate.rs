use thiserror::Error;

use crate::{
    color::Color,
    coord::Coord,
    layout::Layout,
    piece::{Piece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
    #[error("{color} pawn on {square} cannot stand on the first or last rank")]
    PawnOnBackRank { color: Color, square: Coord },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<ValidationError>,
}
impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Structural checks over a layout: one king per side, and no pawn on the
/// first or last rank.
pub fn validate(pieces: &Layout) -> Validation {
    let mut errors = Vec::new();
    for color in Color::BOTH {
        let count = pieces.count(Piece::new(color, PieceKind::King));
        if count != 1 {
            errors.push(ValidationError::KingCount { color, count });
        }
    }
    let mut pawns: Vec<_> = pieces
        .iter()
        .filter(|(square, piece)| {
            piece.kind == PieceKind::Pawn && matches!(square.rank(), 1 | 8)
        })
        .map(|(square, piece)| (square, piece.color))
        .collect();
    pawns.sort_unstable_by_key(|(square, _)| *square);
    errors.extend(
        pawns
            .into_iter()
            .map(|(square, color)| ValidationError::PawnOnBackRank { color, square }),
    );
    Validation { errors }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        coord,
        fen::{EMPTY_POSITION, STARTING_POSITION, decode},
        layout::Layout,
        validate::{ValidationError, validate},
    };

    #[test]
    fn starting_position_is_valid() {
        assert!(validate(&decode(STARTING_POSITION).pieces).is_valid());
    }
    #[test]
    fn empty_board_misses_both_kings() {
        let validation = validate(&decode(EMPTY_POSITION).pieces);
        assert_eq!(
            validation.errors,
            [
                ValidationError::KingCount {
                    color: Color::White,
                    count: 0
                },
                ValidationError::KingCount {
                    color: Color::Black,
                    count: 0
                },
            ]
        );
        assert_eq!(
            validation.messages(),
            [
                "expected exactly one white king, found 0",
                "expected exactly one black king, found 0",
            ]
        );
    }
    #[test]
    fn extra_king_names_the_count() {
        let layout = Layout::from_codes([("e1", "wK"), ("e8", "bK"), ("a8", "bK")]).unwrap();
        assert_eq!(
            validate(&layout).errors,
            [ValidationError::KingCount {
                color: Color::Black,
                count: 2
            }]
        );
    }
    #[test]
    fn pawn_on_first_rank() {
        let mut layout = Layout::from_codes([("e1", "wK"), ("e8", "bK"), ("a1", "wP")]).unwrap();
        let validation = validate(&layout);
        assert_eq!(
            validation.errors,
            [ValidationError::PawnOnBackRank {
                color: Color::White,
                square: coord!("a1")
            }]
        );
        assert!(validation.messages()[0].contains("a1"));

        layout.remove(coord!("a1"));
        assert!(validate(&layout).is_valid());
    }
    #[test]
    fn back_rank_pawns_in_notation_order() {
        let layout = Layout::from_codes([
            ("e1", "wK"),
            ("e8", "bK"),
            ("h1", "bP"),
            ("b8", "wP"),
            ("a1", "wP"),
        ])
        .unwrap();
        let squares: Vec<_> = validate(&layout)
            .errors
            .into_iter()
            .map(|error| match error {
                ValidationError::PawnOnBackRank { square, .. } => square,
                ValidationError::KingCount { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(squares, [coord!("b8"), coord!("a1"), coord!("h1")]);
    }
}
