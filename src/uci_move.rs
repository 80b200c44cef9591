use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    coord::{Coord, ParseCoordError},
    piece::PieceKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseMoveError {
    #[error("move tokens have 4 or 5 characters, found {0}")]
    InvalidLength(usize),
    #[error(transparent)]
    Coord(#[from] ParseCoordError),
    #[error("found `{0}`, expected one of `q`, `r`, `b`, or `n` as promotion")]
    InvalidPromotion(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub origin: Coord,
    pub destination: Coord,
    pub promotion: Option<PieceKind>,
}
impl Display for UciMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}
impl FromStr for UciMove {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<_> = s.chars().collect();
        let (squares, promotion) = match chars.as_slice() {
            [squares @ .., promotion] if chars.len() == 5 => (squares, Some(*promotion)),
            squares if chars.len() == 4 => (squares, None),
            _ => return Err(ParseMoveError::InvalidLength(chars.len())),
        };
        let origin = Coord::from_chars(squares[0], squares[1])?;
        let destination = Coord::from_chars(squares[2], squares[3])?;
        let promotion = promotion
            .map(|c| PieceKind::from_promotion(c).ok_or(ParseMoveError::InvalidPromotion(c)))
            .transpose()?;
        Ok(UciMove {
            origin,
            destination,
            promotion,
        })
    }
}

/// Whether `token` reads as `<file><rank><file><rank>` with an optional
/// lowercase promotion letter.
pub fn is_well_formed_move(token: &str) -> bool {
    token.parse::<UciMove>().is_ok()
}
pub fn parse_move(token: &str) -> Option<UciMove> {
    token.parse().ok()
}
