use crate::{position::Position, uci_move::UciMove};

/// Grades a candidate move against a stored puzzle solution.
///
/// `from` and `to` are joined and compared with the whole solution and with
/// its first four characters, so a solution carrying a promotion letter
/// accepts any promotion (or none) onto the right square.
pub fn is_solution_move(from: &str, to: &str, solution: &str) -> bool {
    let candidate = format!("{from}{to}");
    if candidate == solution {
        return true;
    }
    let prefix: String = solution.chars().take(4).collect();
    candidate == prefix
}

/// An exercise: a position to play from and the expected move token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub fen: String,
    pub solution: String,
}
impl Puzzle {
    pub fn new(fen: impl Into<String>, solution: impl Into<String>) -> Self {
        Puzzle {
            fen: fen.into(),
            solution: solution.into(),
        }
    }
    pub fn position(&self) -> Position {
        Position::from_fen(&self.fen)
    }
    pub fn is_solved_by(&self, movement: &UciMove) -> bool {
        is_solution_move(
            &movement.origin.to_string(),
            &movement.destination.to_string(),
            &self.solution,
        )
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        coord,
        piece::{Piece, PieceKind},
        solution::{Puzzle, is_solution_move},
        uci_move::parse_move,
    };

    #[test]
    fn exact_match() {
        assert!(is_solution_move("e2", "e4", "e2e4"));
        assert!(!is_solution_move("e2", "e3", "e2e4"));
    }
    #[test]
    fn promotion_is_not_checked() {
        assert!(is_solution_move("e7", "e8", "e7e8q"));
        let underpromotion = parse_move("e7e8n").unwrap();
        assert!(is_solution_move(
            &underpromotion.origin.to_string(),
            &underpromotion.destination.to_string(),
            "e7e8q"
        ));
    }
    #[test]
    fn short_or_garbage_solutions() {
        assert!(!is_solution_move("e2", "e4", ""));
        assert!(!is_solution_move("e2", "e4", "e2"));
        assert!(!is_solution_move("", "", "e2e4"));
        assert!(is_solution_move("", "", ""));
    }
    #[test]
    fn puzzle_grades_parsed_moves() {
        let puzzle = Puzzle::new("6k1/4P3/8/8/8/8/8/6K1 w - - 0 1", "e7e8q");
        assert!(puzzle.is_solved_by(&parse_move("e7e8q").unwrap()));
        assert!(puzzle.is_solved_by(&parse_move("e7e8r").unwrap()));
        assert!(!puzzle.is_solved_by(&parse_move("g1g2").unwrap()));
    }
    #[test]
    fn puzzle_restores_its_position() {
        let puzzle = Puzzle::new("6k1/4P3/8/8/8/8/8/6K1 w - - 0 1", "e7e8q");
        let position = puzzle.position();
        assert_eq!(position.pieces.len(), 3);
        assert_eq!(
            position.pieces.get(coord!("e7")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(position.fen().to_string(), puzzle.fen);
    }
}
