use std::fmt::{self, Display, Formatter};

use boardwright::{color::Color, coord::Coord, feedback::Marker, layout::Layout};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HINT: &str = "\x1b[30;103m";
const CORRECT: &str = "\x1b[30;102m";
const INCORRECT: &str = "\x1b[30;101m";
const RESET: &str = "\x1b[0m";

pub struct BoardDisplay<'a, 'b, 'c> {
    pub pieces: &'a Layout,
    pub view: Color,
    pub markers: &'b [(Coord, Marker)],
    pub info: &'c str,
}
impl Display for BoardDisplay<'_, '_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for y in 0..8 {
            let y = match self.view {
                Color::White => y,
                Color::Black => 7 - y,
            };
            for x in 0..8 {
                let x = match self.view {
                    Color::White => x,
                    Color::Black => 7 - x,
                };
                let square = Coord::new(x, y);
                let marker = self
                    .markers
                    .iter()
                    .find(|(marked, _)| *marked == square)
                    .map(|(_, marker)| *marker);
                let color = match marker {
                    Some(Marker::Hint) => HINT,
                    Some(Marker::Correct) => CORRECT,
                    Some(Marker::Incorrect) => INCORRECT,
                    None if (x + y) % 2 == 0 => WHITE,
                    None => BLACK,
                };
                let figurine = self.pieces.get(square).map_or(' ', |piece| piece.figurine());
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", 8 - y)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
