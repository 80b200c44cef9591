use std::fmt::{self, Display, Formatter};

use crate::{color::Color, coord::Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const BOTH: [Self; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    pub fn rook_square(self, color: Color) -> Coord {
        match (color, self) {
            (Color::White, CastlingSide::Kingside) => crate::coord!("h1"),
            (Color::White, CastlingSide::Queenside) => crate::coord!("a1"),
            (Color::Black, CastlingSide::Kingside) => crate::coord!("h8"),
            (Color::Black, CastlingSide::Queenside) => crate::coord!("a8"),
        }
    }
    pub fn letter(self, color: Color) -> char {
        match (color, self) {
            (Color::White, CastlingSide::Kingside) => 'K',
            (Color::White, CastlingSide::Queenside) => 'Q',
            (Color::Black, CastlingSide::Kingside) => 'k',
            (Color::Black, CastlingSide::Queenside) => 'q',
        }
    }
}
pub fn king_square(color: Color) -> Coord {
    match color {
        Color::White => crate::coord!("e1"),
        Color::Black => crate::coord!("e8"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}
impl CastlingRights {
    pub fn none() -> Self {
        CastlingRights::default()
    }
    pub fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }
    fn flag_mut(&mut self, color: Color, side: CastlingSide) -> &mut bool {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastlingSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastlingSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastlingSide::Queenside) => &mut self.black_queenside,
        }
    }
    pub fn get(self, color: Color, side: CastlingSide) -> bool {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => self.white_kingside,
            (Color::White, CastlingSide::Queenside) => self.white_queenside,
            (Color::Black, CastlingSide::Kingside) => self.black_kingside,
            (Color::Black, CastlingSide::Queenside) => self.black_queenside,
        }
    }
    pub fn set(&mut self, color: Color, side: CastlingSide, value: bool) {
        *self.flag_mut(color, side) = value;
    }
    pub fn is_none(self) -> bool {
        self == CastlingRights::none()
    }
    /// Flags in notation order: `K`, `Q`, `k`, `q`.
    pub fn flags(self) -> impl Iterator<Item = (Color, CastlingSide, bool)> {
        Color::BOTH.into_iter().flat_map(move |color| {
            CastlingSide::BOTH.map(move |side| (color, side, self.get(color, side)))
        })
    }
    /// Reads a castling field permissively: every canonical letter found sets
    /// its flag, anything else is ignored.
    pub fn from_fen_field(field: &str) -> Self {
        let mut castling_rights = CastlingRights::none();
        for c in field.chars() {
            match c {
                'K' => castling_rights.white_kingside = true,
                'Q' => castling_rights.white_queenside = true,
                'k' => castling_rights.black_kingside = true,
                'q' => castling_rights.black_queenside = true,
                _ => (),
            }
        }
        castling_rights
    }
}
impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for (color, side, _) in self.flags().filter(|(_, _, value)| *value) {
            written = true;
            write!(f, "{}", side.letter(color))?;
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling_right::{CastlingRights, CastlingSide},
        color::Color,
    };

    #[test]
    fn display_uses_fixed_order() {
        let mut rights = CastlingRights::none();
        assert_eq!(rights.to_string(), "-");
        rights.set(Color::Black, CastlingSide::Queenside, true);
        rights.set(Color::White, CastlingSide::Kingside, true);
        assert_eq!(rights.to_string(), "Kq");
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
    }
    #[test]
    fn field_parsing_ignores_unknown_letters() {
        assert_eq!(CastlingRights::from_fen_field("qxK"), {
            let mut rights = CastlingRights::none();
            rights.white_kingside = true;
            rights.black_queenside = true;
            rights
        });
        assert!(CastlingRights::from_fen_field("-").is_none());
        assert!(CastlingRights::from_fen_field("AHah").is_none());
    }
}
