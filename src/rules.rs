//! Boundary to a full rules engine.
//!
//! Legal move generation, move application and game termination are not
//! implemented here. They come from an implementation of [`RulesEngine`]
//! handed to the board surface; [`ChessRules`] is the one backed by the
//! `chess` crate.

use std::fmt::{self, Display, Formatter};

use chess::{BoardStatus, ChessMove, File, MoveGen, Rank, Square};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{coord::Coord, piece::PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("`{0}` does not describe a position the rules engine accepts")]
    InvalidNotation(Box<str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}
impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing")?,
            GameStatus::Check => write!(f, "check")?,
            GameStatus::Checkmate => write!(f, "checkmate")?,
            GameStatus::Stalemate => write!(f, "stalemate")?,
        }
        Ok(())
    }
}

pub trait RulesEngine {
    /// Loaded position. It is a plain value; the engine keeps nothing alive
    /// between calls.
    type Handle;

    fn load_position(&self, notation: &str) -> Result<Self::Handle, RulesError>;
    /// Destinations of every legal move starting on `square`, deduplicated and
    /// in notation order.
    fn legal_destinations(&self, handle: &Self::Handle, square: Coord) -> Vec<Coord>;
    /// Notation of the position after the move, or `None` if it is illegal.
    /// A pawn reaching the last rank needs an explicit `promotion`.
    fn apply_move(
        &self,
        handle: &Self::Handle,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> Option<String>;
    fn is_check(&self, handle: &Self::Handle) -> bool;
    fn is_checkmate(&self, handle: &Self::Handle) -> bool;
    fn is_stalemate(&self, handle: &Self::Handle) -> bool;

    fn is_game_over(&self, handle: &Self::Handle) -> bool {
        self.is_checkmate(handle) || self.is_stalemate(handle)
    }
    fn status(&self, handle: &Self::Handle) -> GameStatus {
        if self.is_checkmate(handle) {
            GameStatus::Checkmate
        } else if self.is_stalemate(handle) {
            GameStatus::Stalemate
        } else if self.is_check(handle) {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }
}

impl From<Square> for Coord {
    fn from(value: Square) -> Self {
        // both indices are below 8
        Coord::new(
            value.get_file().to_index() as u8,
            7 - value.get_rank().to_index() as u8,
        )
    }
}
impl From<Coord> for Square {
    fn from(value: Coord) -> Self {
        Square::make_square(
            Rank::from_index(usize::from(value.rank() - 1)),
            File::from_index(usize::from(value.x())),
        )
    }
}
impl From<chess::Piece> for PieceKind {
    fn from(value: chess::Piece) -> Self {
        match value {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}
impl From<PieceKind> for chess::Piece {
    fn from(value: PieceKind) -> Self {
        match value {
            PieceKind::Pawn => chess::Piece::Pawn,
            PieceKind::Knight => chess::Piece::Knight,
            PieceKind::Bishop => chess::Piece::Bishop,
            PieceKind::Rook => chess::Piece::Rook,
            PieceKind::Queen => chess::Piece::Queen,
            PieceKind::King => chess::Piece::King,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl RulesEngine for ChessRules {
    type Handle = chess::Board;

    fn load_position(&self, notation: &str) -> Result<Self::Handle, RulesError> {
        notation.parse().map_err(|err| {
            warn!(notation, ?err, "rules engine rejected position");
            RulesError::InvalidNotation(notation.into())
        })
    }
    fn legal_destinations(&self, handle: &Self::Handle, square: Coord) -> Vec<Coord> {
        let origin = Square::from(square);
        let mut destinations: Vec<Coord> = MoveGen::new_legal(handle)
            .filter(|movement| movement.get_source() == origin)
            .map(|movement| movement.get_dest().into())
            .collect();
        destinations.sort_unstable();
        destinations.dedup();
        destinations
    }
    fn apply_move(
        &self,
        handle: &Self::Handle,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> Option<String> {
        let movement = ChessMove::new(from.into(), to.into(), promotion.map(Into::into));
        if handle.legal(movement) {
            Some(handle.make_move_new(movement).to_string())
        } else {
            debug!(%movement, "illegal move");
            None
        }
    }
    fn is_check(&self, handle: &Self::Handle) -> bool {
        handle.checkers().popcnt() > 0
    }
    fn is_checkmate(&self, handle: &Self::Handle) -> bool {
        handle.status() == BoardStatus::Checkmate
    }
    fn is_stalemate(&self, handle: &Self::Handle) -> bool {
        handle.status() == BoardStatus::Stalemate
    }
}
#[cfg(test)]
mod test {
    use chess::{MoveGen, Square};
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use crate::{
        color::Color,
        coord,
        coord::Coord,
        fen::{self, STARTING_POSITION},
        piece::{Piece, PieceKind},
        rules::{ChessRules, GameStatus, RulesEngine, RulesError},
    };

    #[test]
    fn square_conversion_round_trips() {
        for square in Coord::all() {
            assert_eq!(Coord::from(Square::from(square)), square);
        }
        assert_eq!(Square::from(coord!("e4")), Square::E4);
    }
    #[test]
    fn opening_destinations() {
        let board = ChessRules.load_position(STARTING_POSITION).unwrap();
        assert_eq!(
            ChessRules.legal_destinations(&board, coord!("e2")),
            [coord!("e4"), coord!("e3")]
        );
        assert_eq!(
            ChessRules.legal_destinations(&board, coord!("g1")),
            [coord!("f3"), coord!("h3")]
        );
        assert!(ChessRules.legal_destinations(&board, coord!("e4")).is_empty());
        assert_eq!(ChessRules.status(&board), GameStatus::Ongoing);
    }
    #[test]
    fn apply_returns_the_next_position() {
        let board = ChessRules.load_position(STARTING_POSITION).unwrap();
        let next = ChessRules
            .apply_move(&board, coord!("e2"), coord!("e4"), None)
            .unwrap();
        let position = fen::decode(&next);
        assert_eq!(position.turn, Color::Black);
        assert_eq!(
            position.pieces.get(coord!("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(position.pieces.get(coord!("e2")), None);
    }
    #[test]
    fn illegal_moves_give_none() {
        let board = ChessRules.load_position(STARTING_POSITION).unwrap();
        assert_eq!(
            ChessRules.apply_move(&board, coord!("e2"), coord!("e5"), None),
            None
        );
        assert_eq!(
            ChessRules.apply_move(&board, coord!("e7"), coord!("e5"), None),
            None
        );
    }
    #[test]
    fn promotion_must_be_named() {
        let board = ChessRules
            .load_position("8/4P3/8/8/8/8/k7/4K3 w - - 0 1")
            .unwrap();
        assert_eq!(ChessRules.legal_destinations(&board, coord!("e7")), [coord!("e8")]);
        assert_eq!(
            ChessRules.apply_move(&board, coord!("e7"), coord!("e8"), None),
            None
        );
        let next = ChessRules
            .apply_move(&board, coord!("e7"), coord!("e8"), Some(PieceKind::Knight))
            .unwrap();
        assert_eq!(
            fen::decode(&next).pieces.get(coord!("e8")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
    }
    #[test]
    fn checkmate_and_stalemate() {
        let mate = ChessRules
            .load_position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        assert!(ChessRules.is_check(&mate));
        assert!(ChessRules.is_checkmate(&mate));
        assert!(ChessRules.is_game_over(&mate));
        assert_eq!(ChessRules.status(&mate), GameStatus::Checkmate);

        let stalemate = ChessRules
            .load_position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .unwrap();
        assert!(!ChessRules.is_check(&stalemate));
        assert!(ChessRules.is_stalemate(&stalemate));
        assert!(ChessRules.is_game_over(&stalemate));
    }
    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            ChessRules.load_position("hello"),
            Err(RulesError::InvalidNotation(_))
        ));
    }
    #[test]
    fn codec_agrees_with_engine_over_random_games() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = ChessRules.load_position(STARTING_POSITION).unwrap();
        for _ in 0..500 {
            let moves: Vec<_> = MoveGen::new_legal(&board).collect();
            if moves.is_empty() {
                board = ChessRules.load_position(STARTING_POSITION).unwrap();
                continue;
            }
            board = board.make_move_new(moves[rng.random_range(0..moves.len())]);

            let engine = board.to_string();
            let position = fen::decode(&engine);
            let ours = fen::encode(&position);
            assert_eq!(
                ours.split_whitespace().next(),
                engine.split_whitespace().next()
            );
            let turn = match board.side_to_move() {
                chess::Color::White => Color::White,
                chess::Color::Black => Color::Black,
            };
            assert_eq!(position.turn, turn, "{engine}");
            let white = board.castle_rights(chess::Color::White);
            let black = board.castle_rights(chess::Color::Black);
            let rights = position.castling_rights;
            assert_eq!(rights.white_kingside, white.has_kingside(), "{engine}");
            assert_eq!(rights.white_queenside, white.has_queenside(), "{engine}");
            assert_eq!(rights.black_kingside, black.has_kingside(), "{engine}");
            assert_eq!(rights.black_queenside, black.has_queenside(), "{engine}");
            assert!(ChessRules.load_position(&ours).is_ok(), "{ours}");
        }
    }
}
