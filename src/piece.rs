use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParsePieceError {
    #[error(
        "found `{0}`, expected one of `p`, `n`, `b`, `r`, `k`, `q`, or uppercase forms of these letters"
    )]
    InvalidLetter(char),
    #[error("found `{0}`, expected `w` or `b` as the color of the piece")]
    InvalidColor(char),
    #[error("piece codes have 2 characters, found {0}")]
    InvalidLength(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const ALL: [Self; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    /// Back rank of the Chess960 starting position with the given Scharnagl
    /// number. Returns `None` for numbers outside `0..960`.
    pub fn chess960(id: u16) -> Option<[Self; 8]> {
        // `None` marks a square that is still free
        fn nth_free(configuration: &[Option<PieceKind>; 8], mut index: u16) -> usize {
            for (i, cell) in configuration.iter().enumerate() {
                if cell.is_none() {
                    if index == 0 {
                        return i;
                    }
                    index -= 1;
                }
            }
            unreachable!()
        }
        if id >= 960 {
            return None;
        }
        let mut state = id;
        let bishop_1 = state % 4;
        state /= 4;

        let bishop_2 = state % 4;
        state /= 4;

        let queen = state % 6;
        state /= 6;

        let knights = state;

        let mut configuration = [None; 8];
        configuration[bishop_1 as usize * 2 + 1] = Some(PieceKind::Bishop);
        configuration[bishop_2 as usize * 2] = Some(PieceKind::Bishop);
        configuration[nth_free(&configuration, queen)] = Some(PieceKind::Queen);

        let (a, b) = match knights {
            n @ 0..4 => (0, n + 1),
            n @ 4..7 => (1, n - 2),
            n @ 7..9 => (2, n - 4),
            9 => (3, 4),
            _ => unreachable!(),
        };
        // both knights index into the same list of free squares
        let a = nth_free(&configuration, a);
        let b = nth_free(&configuration, b);
        configuration[a] = Some(PieceKind::Knight);
        configuration[b] = Some(PieceKind::Knight);

        let mut piece = PieceKind::Rook;
        let mut back_rank = [PieceKind::Pawn; 8];
        for (cell, slot) in configuration.into_iter().zip(&mut back_rank) {
            *slot = match cell {
                Some(kind) => kind,
                None => {
                    let current = piece;
                    piece = match piece {
                        PieceKind::Rook => PieceKind::King,
                        _ => PieceKind::Rook,
                    };
                    current
                }
            };
        }
        Some(back_rank)
    }
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn from_letter(c: char) -> Result<Self, ParsePieceError> {
        let piece = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(ParsePieceError::InvalidLetter(c)),
        };
        Ok(piece)
    }
    /// Promotion letter of a move token. Only the lowercase `q`, `r`, `b`,
    /// `n` are accepted.
    pub fn from_promotion(c: char) -> Option<Self> {
        match c {
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            _ => None,
        }
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}
impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }
    pub fn all() -> impl Iterator<Item = Self> {
        Color::BOTH
            .into_iter()
            .flat_map(|color| PieceKind::ALL.map(|kind| Piece::new(color, kind)))
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, ParsePieceError> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(color, kind))
    }
    /// Editor code such as `wP` or `bK`.
    pub fn code(self) -> String {
        [self.color.lowercase(), self.kind.uppercase()]
            .into_iter()
            .collect()
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(color), Some(kind), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParsePieceError::InvalidLength(s.chars().count()));
        };
        let color = match color {
            'w' => Color::White,
            'b' => Color::Black,
            c => return Err(ParsePieceError::InvalidColor(c)),
        };
        if !kind.is_ascii_uppercase() {
            return Err(ParsePieceError::InvalidLetter(kind));
        }
        Ok(Piece::new(color, PieceKind::from_letter(kind)?))
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        piece::{ParsePieceError, Piece, PieceKind},
    };

    #[test]
    fn twelve_distinct_codes() {
        let codes: Vec<_> = Piece::all().map(Piece::code).collect();
        assert_eq!(codes.len(), 12);
        for code in &codes {
            assert_eq!(code.parse::<Piece>().unwrap().code(), *code);
        }
    }
    #[test]
    fn code_parsing_is_strict() {
        assert_eq!(
            "wP".parse(),
            Ok(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!("xP".parse::<Piece>(), Err(ParsePieceError::InvalidColor('x')));
        assert_eq!("wp".parse::<Piece>(), Err(ParsePieceError::InvalidLetter('p')));
        assert_eq!("wPP".parse::<Piece>(), Err(ParsePieceError::InvalidLength(3)));
    }
    #[test]
    fn fen_letter_case_is_color() {
        assert_eq!(Piece::from_fen('k'), Ok(Piece::new(Color::Black, PieceKind::King)));
        assert_eq!(Piece::new(Color::White, PieceKind::Knight).fen(), 'N');
        assert_eq!(Piece::from_fen('x'), Err(ParsePieceError::InvalidLetter('x')));
    }
    #[test]
    fn chess960_518_is_standard() {
        assert_eq!(
            PieceKind::chess960(518),
            Some(PieceKind::STARTING_CONFIGURATION)
        );
        assert_eq!(PieceKind::chess960(960), None);
    }
    #[test]
    fn chess960_zero() {
        use crate::piece::PieceKind::{Bishop as B, King as K, Knight as N, Queen as Q, Rook as R};
        assert_eq!(PieceKind::chess960(0), Some([B, B, Q, N, N, R, K, R]));
    }
}
