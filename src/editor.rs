use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use tracing::debug;

use crate::{
    castling_right::CastlingRights,
    color::Color,
    coord::Coord,
    fen::Fen,
    layout::Layout,
    piece::{ParsePieceError, Piece, PieceKind},
    position::Position,
    preset::Preset,
    rights::{infer_castling_availability, infer_en_passant_candidates},
    validate::{Validation, validate},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Pointer,
    Eraser,
    Place(Piece),
}
impl Display for Tool {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Pointer => write!(f, "pointer")?,
            Tool::Eraser => write!(f, "eraser")?,
            Tool::Place(piece) => write!(f, "{}", piece.code())?,
        }
        Ok(())
    }
}
impl FromStr for Tool {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" => Ok(Tool::Pointer),
            "eraser" => Ok(Tool::Eraser),
            s => s.parse().map(Tool::Place),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub position: Position,
    pub orientation: Color,
    pub tool: Tool,
}
impl EditorState {
    pub fn starting() -> Self {
        EditorState::from_position(Position::starting_position())
    }
    pub fn empty() -> Self {
        EditorState::default()
    }
    pub fn from_preset(preset: Preset) -> Self {
        let pieces = match preset {
            Preset::Standard => Layout::starting_position(),
            Preset::Empty => Layout::new(),
            Preset::Chess960(id) => match PieceKind::chess960(id) {
                Some(configuration) => Layout::from_configuration(configuration),
                None => Layout::starting_position(),
            },
        };
        debug!(%preset, "loading preset");
        let castling_rights = infer_castling_availability(&pieces);
        EditorState::from_position(Position {
            pieces,
            turn: Color::White,
            castling_rights,
            en_passant: None,
        })
    }
    pub fn from_fen(notation: &str) -> Self {
        debug!(notation, "importing position");
        EditorState::from_position(Position::from_fen(notation))
    }
    pub fn from_position(position: Position) -> Self {
        EditorState {
            position,
            ..EditorState::default()
        }
    }
    pub fn fen(&self) -> Fen<'_> {
        self.position.fen()
    }
    /// Uses the selected tool on `square`, returning the piece that was
    /// replaced or erased.
    pub fn apply_tool(&mut self, square: Coord) -> Option<Piece> {
        match self.tool {
            Tool::Pointer => None,
            Tool::Eraser => self.position.pieces.remove(square),
            Tool::Place(piece) => self.position.pieces.place(square, piece),
        }
    }
    pub fn set_turn(&mut self, turn: Color) {
        self.position.turn = turn;
    }
    pub fn set_castling(&mut self, castling_rights: CastlingRights) {
        self.position.castling_rights = castling_rights;
    }
    pub fn set_en_passant(&mut self, en_passant: Option<Coord>) {
        self.position.en_passant = en_passant;
    }
    pub fn flip(&mut self) {
        self.orientation = !self.orientation;
    }
    pub fn castling_availability(&self) -> CastlingRights {
        infer_castling_availability(&self.position.pieces)
    }
    pub fn en_passant_candidates(&self) -> Vec<Coord> {
        infer_en_passant_candidates(&self.position.pieces, self.position.turn)
    }
    /// Replaces the castling rights with what the layout allows and drops an
    /// en passant target that is no longer a candidate.
    pub fn refresh_rights(&mut self) {
        self.position.castling_rights = self.castling_availability();
        if let Some(target) = self.position.en_passant {
            if !self.en_passant_candidates().contains(&target) {
                debug!(%target, "dropping stale en passant target");
                self.position.en_passant = None;
            }
        }
    }
    pub fn validate(&self) -> Validation {
        validate(&self.position.pieces)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling_right::CastlingRights,
        color::Color,
        coord,
        editor::{EditorState, Tool},
        fen::{EMPTY_POSITION, STARTING_POSITION},
        piece::{Piece, PieceKind},
        preset::Preset,
    };

    #[test]
    fn lifecycle_constructors_agree() {
        assert_eq!(EditorState::starting(), EditorState::from_fen(STARTING_POSITION));
        assert_eq!(
            EditorState::starting(),
            EditorState::from_preset(Preset::Standard)
        );
        assert_eq!(
            EditorState::from_preset(Preset::Chess960(518)),
            EditorState::starting()
        );
        assert_eq!(EditorState::empty(), EditorState::from_fen(EMPTY_POSITION));
        assert_eq!(EditorState::from_preset(Preset::Empty), EditorState::empty());
    }
    #[test]
    fn chess960_preset_infers_rights_from_placement() {
        let editor = EditorState::from_preset(Preset::Chess960(0));
        assert_eq!(editor.position.pieces.len(), 32);
        assert!(editor.position.castling_rights.is_none());
        assert!(editor.validate().is_valid());
    }
    #[test]
    fn tools() {
        let mut editor = EditorState::empty();
        editor.tool = Tool::Place(Piece::new(Color::White, PieceKind::King));
        assert_eq!(editor.apply_tool(coord!("e1")), None);
        editor.tool = "bK".parse().unwrap();
        editor.apply_tool(coord!("e8"));
        assert!(editor.validate().is_valid());
        assert_eq!(editor.fen().to_string(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");

        editor.tool = Tool::Pointer;
        assert_eq!(editor.apply_tool(coord!("e8")), None);
        editor.tool = Tool::Eraser;
        assert_eq!(
            editor.apply_tool(coord!("e8")),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(editor.validate().errors.len(), 1);
    }
    #[test]
    fn orientation_does_not_reach_the_notation() {
        let mut editor = EditorState::starting();
        editor.flip();
        assert_eq!(editor.orientation, Color::Black);
        assert_eq!(editor.fen().to_string(), STARTING_POSITION);
    }
    #[test]
    fn refresh_rights_follows_placement() {
        let mut editor = EditorState::from_fen("4k3/8/8/3Pp3/8/8/8/4K2R w KQkq e6 0 1");
        editor.refresh_rights();
        assert_eq!(
            editor.position.castling_rights,
            CastlingRights {
                white_kingside: true,
                ..CastlingRights::none()
            }
        );
        assert_eq!(editor.position.en_passant, Some(coord!("e6")));

        editor.tool = Tool::Eraser;
        editor.apply_tool(coord!("d5"));
        editor.refresh_rights();
        assert_eq!(editor.position.en_passant, None);
    }
}
