use crate::{
    castling_right::CastlingRights,
    color::Color,
    coord::Coord,
    fen::{self, Fen},
    layout::Layout,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    pub pieces: Layout,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Coord>,
}
impl Position {
    pub fn starting_position() -> Self {
        Position {
            pieces: Layout::starting_position(),
            turn: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant: None,
        }
    }
    pub fn from_fen(notation: &str) -> Self {
        fen::decode(notation)
    }
    pub fn fen(&self) -> Fen<'_> {
        Fen(self)
    }
}
