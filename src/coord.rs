use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    num::NonZero,
    str::FromStr,
};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseCoordError {
    #[error("found `{0}`, characters from `a` to `h` were expected instead")]
    InvalidFile(char),
    #[error("found `{0}`, characters from `1` to `8` were expected instead")]
    InvalidRank(char),
    #[error("provided string have length of {0} characters, 2 were expected")]
    InvalidLength(usize),
}

/// Builds a [`Coord`] from a square literal, checked at compile time.
#[macro_export]
macro_rules! coord {
    ($square:literal) => {
        const { $crate::coord::Coord::from_literal($square) }
    };
}

// Bit structure: 10XXXYYY
// first two bits is always `10` for `NonZero` size optimizations
// X is the file (a = 0), Y is the row counted from the top (rank 8 = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord(NonZero<u8>);

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < 8);
        debug_assert!(y < 8);
        let byte = 0b1000_0000 | (x << 3) | y;
        match NonZero::new(byte) {
            Some(byte) => Coord(byte),
            None => unreachable!(),
        }
    }
    pub fn new_checked(x: u8, y: u8) -> Option<Self> {
        if x >= 8 || y >= 8 {
            None
        } else {
            Some(Self::new(x, y))
        }
    }
    /// Square from a file index (a = 0) and a rank number (1 to 8).
    pub fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if (1..=8).contains(&rank) {
            Self::new_checked(file, 8 - rank)
        } else {
            None
        }
    }
    pub const fn from_literal(square: &str) -> Self {
        let bytes = square.as_bytes();
        assert!(bytes.len() == 2, "square literal must have 2 characters");
        assert!(
            bytes[0] >= b'a' && bytes[0] <= b'h',
            "file must be from `a` to `h`"
        );
        assert!(
            bytes[1] >= b'1' && bytes[1] <= b'8',
            "rank must be from `1` to `8`"
        );
        Coord::new(bytes[0] - b'a', b'8' - bytes[1])
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseCoordError> {
        let x = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidFile(file)),
        };
        let y = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => return Err(ParseCoordError::InvalidRank(rank)),
        };
        Ok(Coord::new(x, y))
    }
    pub fn x(self) -> u8 {
        (self.0.get() >> 3) & 0b_111
    }
    pub fn y(self) -> u8 {
        self.0.get() & 0b_111
    }
    pub fn rank(self) -> u8 {
        8 - self.y()
    }
    pub fn file(self) -> char {
        (self.x() + b'a') as char
    }
    /// Moves by whole files and ranks; positive `ranks` points towards rank 8.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        Self::new_checked(
            self.x().checked_add_signed(files)?,
            self.y().checked_add_signed(ranks.checked_neg()?)?,
        )
    }
    /// All 64 squares in notation order: rank 8 to 1, file a to h.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|y| (0..8).map(move |x| Coord::new(x, y)))
    }
    pub fn rank_squares(rank: u8) -> impl Iterator<Item = Self> {
        (0..8).filter_map(move |x| Coord::from_file_rank(x, rank))
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())?;
        Ok(())
    }
}
// notation order: rank 8 to 1, then file a to h
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&(self.y(), self.x()), &(other.y(), other.x()))
    }
}
impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Coord::from_chars(file, rank),
            _ => Err(ParseCoordError::InvalidLength(s.chars().count())),
        }
    }
}
#[cfg(test)]
mod test {
    use crate::coord::{Coord, ParseCoordError};

    #[test]
    fn literal_matches_parse() {
        assert_eq!(coord!("e4"), "e4".parse().unwrap());
        assert_eq!(coord!("a8"), Coord::new(0, 0));
        assert_eq!(coord!("h1"), Coord::new(7, 7));
    }
    #[test]
    fn display_round_trips_every_square() {
        assert_eq!(Coord::all().count(), 64);
        for square in Coord::all() {
            assert_eq!(square.to_string().parse(), Ok(square));
        }
    }
    #[test]
    fn rejects_out_of_board_text() {
        assert_eq!("i4".parse::<Coord>(), Err(ParseCoordError::InvalidFile('i')));
        assert_eq!("e9".parse::<Coord>(), Err(ParseCoordError::InvalidRank('9')));
        assert_eq!("e".parse::<Coord>(), Err(ParseCoordError::InvalidLength(1)));
        assert_eq!("e44".parse::<Coord>(), Err(ParseCoordError::InvalidLength(3)));
    }
    #[test]
    fn ordering_follows_notation() {
        let mut squares: Vec<_> = Coord::all().collect();
        squares.reverse();
        squares.sort();
        assert!(squares.into_iter().eq(Coord::all()));
        assert!(coord!("h8") < coord!("a7"));
    }
    #[test]
    fn offset_stays_on_board() {
        assert_eq!(coord!("e5").offset(0, 1), Some(coord!("e6")));
        assert_eq!(coord!("a4").offset(-1, 0), None);
        assert_eq!(coord!("h8").offset(0, 1), None);
    }
}
