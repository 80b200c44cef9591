//! Castling and en passant rights guessed from piece placement alone.
//!
//! The layout carries no move history, so both inferences are heuristics
//! meant to pre-fill editor controls rather than to prove a right exists.

use crate::{
    castling_right::{CastlingRights, CastlingSide, king_square},
    color::Color,
    coord::Coord,
    layout::Layout,
    piece::{Piece, PieceKind},
};

/// A flag is available when the king and the matching rook both stand on
/// their start squares. Whether they moved and came back, or whether the
/// squares between them are free or attacked, is not considered.
pub fn infer_castling_availability(pieces: &Layout) -> CastlingRights {
    let mut rights = CastlingRights::none();
    for color in Color::BOTH {
        if !pieces.contains(king_square(color), Piece::new(color, PieceKind::King)) {
            continue;
        }
        for side in CastlingSide::BOTH {
            let rook = Piece::new(color, PieceKind::Rook);
            rights.set(color, side, pieces.contains(side.rook_square(color), rook));
        }
    }
    rights
}

/// Squares `turn` could capture en passant onto if the opposing pawn next to
/// one of its pawns had just advanced two squares. Every such square is
/// returned, in file order.
pub fn infer_en_passant_candidates(pieces: &Layout, turn: Color) -> Vec<Coord> {
    let opponent = !turn;
    let rank = opponent.double_step_rank();
    let own_pawn = Piece::new(turn, PieceKind::Pawn);
    let opposing_pawn = Piece::new(opponent, PieceKind::Pawn);
    Coord::rank_squares(rank)
        .filter(|square| pieces.contains(*square, opposing_pawn))
        .filter(|square| {
            [-1, 1].into_iter().any(|files| {
                square
                    .offset(files, 0)
                    .is_some_and(|beside| pieces.contains(beside, own_pawn))
            })
        })
        .filter_map(|square| Coord::from_file_rank(square.x(), opponent.passed_rank()))
        .collect()
}
