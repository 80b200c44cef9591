use std::{
    fmt::{self, Display, Formatter, Write as _},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
    sync::PoisonError,
    time::Duration,
};

use boardwright::{
    castling_right::CastlingRights,
    color::{Color, ParseColorError},
    coord::{Coord, ParseCoordError},
    editor::{EditorState, Tool},
    feedback::{AnimationOutcome, Marker, Overlay, SharedOverlay, celebrate, flash_squares},
    misc::strip_prefix_token,
    piece::ParsePieceError,
    position::Position,
    preset::{Preset, PresetError},
    rules::{ChessRules, RulesEngine},
    solution::Puzzle,
    uci_move::{ParseMoveError, UciMove},
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::board_display::BoardDisplay;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Help,
    Flip,
    Reset,
    Clear,
    Quit,
    Preset(Preset),
    Import(Box<str>),
    ExportFen,
    Tool(Tool),
    Turn(Color),
    Castle(CastlingRights),
    EnPassant(Option<Coord>),
    Infer,
    Validate,
    Moves(Coord),
    Puzzle(UciMove),
    Coord(Coord),
    Play(UciMove),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Reset => write!(f, "reset")?,
            Input::Clear => write!(f, "clear")?,
            Input::Quit => write!(f, "quit")?,
            Input::Preset(preset) => write!(f, "preset {preset}")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Tool(tool) => write!(f, "tool {tool}")?,
            Input::Turn(color) => write!(f, "turn {}", color.lowercase())?,
            Input::Castle(rights) => write!(f, "castle {rights}")?,
            Input::EnPassant(Some(square)) => write!(f, "ep {square}")?,
            Input::EnPassant(None) => write!(f, "ep -")?,
            Input::Infer => write!(f, "infer")?,
            Input::Validate => write!(f, "validate")?,
            Input::Moves(square) => write!(f, "moves {square}")?,
            Input::Puzzle(solution) => write!(f, "puzzle {solution}")?,
            Input::Coord(square) => write!(f, "{square}")?,
            Input::Play(movement) => write!(f, "play {movement}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "reset" => Ok(Input::Reset),
            "clear" => Ok(Input::Clear),
            "quit" | "exit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            "infer" => Ok(Input::Infer),
            "validate" => Ok(Input::Validate),
            s => {
                if let Some(s) = strip_prefix_token(s, "preset") {
                    Ok(Input::Preset(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.into()))
                } else if let Some(s) = strip_prefix_token(s, "tool") {
                    Ok(Input::Tool(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "turn") {
                    Ok(Input::Turn(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "castle") {
                    Ok(Input::Castle(CastlingRights::from_fen_field(s)))
                } else if let Some(s) = strip_prefix_token(s, "ep") {
                    match s {
                        "-" => Ok(Input::EnPassant(None)),
                        s => Ok(Input::EnPassant(Some(s.parse()?))),
                    }
                } else if let Some(s) = strip_prefix_token(s, "moves") {
                    Ok(Input::Moves(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "puzzle") {
                    Ok(Input::Puzzle(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "play") {
                    Ok(Input::Play(s.parse()?))
                } else if let Ok(square) = s.parse() {
                    Ok(Input::Coord(square))
                } else {
                    Ok(Input::Play(s.parse()?))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ParseInputError {
    #[error(transparent)]
    Coord(#[from] ParseCoordError),
    #[error(transparent)]
    Color(#[from] ParseColorError),
    #[error("{0}, expected `pointer`, `eraser`, or a piece code such as `wQ`")]
    Tool(#[from] ParsePieceError),
    #[error(transparent)]
    Move(#[from] ParseMoveError),
    #[error(transparent)]
    Preset(#[from] PresetError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub flash: Duration,
}

fn write_info(info: &mut String, editor: &EditorState, puzzle: Option<&Puzzle>) -> fmt::Result {
    let position = &editor.position;
    writeln!(info, "{} to move", position.turn)?;
    writeln!(info, "castling: {}", position.castling_rights)?;
    match position.en_passant {
        Some(square) => writeln!(info, "en passant: {square}")?,
        None => writeln!(info, "en passant: -")?,
    }
    writeln!(info, "tool: {}", editor.tool)?;
    let validation = editor.validate();
    if validation.is_valid() {
        match ChessRules.load_position(&editor.fen().to_string()) {
            Ok(handle) => writeln!(info, "{}", ChessRules.status(&handle))?,
            Err(err) => writeln!(info, "{err}")?,
        }
    } else {
        for message in validation.messages() {
            writeln!(info, "{message}")?;
        }
    }
    if puzzle.is_some() {
        writeln!(info, "puzzle: find the best move")?;
    }
    Ok(())
}
fn show(
    output: &mut impl Write,
    editor: &EditorState,
    overlay: &SharedOverlay,
    puzzle: Option<&Puzzle>,
    first_time: bool,
) -> io::Result<()> {
    let mut info = String::new();
    write_info(&mut info, editor, puzzle).map_err(io::Error::other)?;
    if first_time {
        info.push_str("type `help` for instructions\n");
    }
    let markers = overlay
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .marked();
    writeln!(
        output,
        "{}",
        BoardDisplay {
            pieces: &editor.position.pieces,
            view: editor.orientation,
            markers: &markers,
            info: &info,
        },
    )
}
/// Shows the marked board, then waits for the markers to clear.
async fn animate(
    output: &mut impl Write,
    editor: &EditorState,
    overlay: &SharedOverlay,
    puzzle: Option<&Puzzle>,
    animation: JoinHandle<AnimationOutcome>,
) -> io::Result<()> {
    show(output, editor, overlay, puzzle, false)?;
    match animation.await {
        Ok(outcome) => debug!(?outcome, "animation finished"),
        Err(err) => debug!(%err, "animation task failed"),
    }
    Ok(())
}
fn print_help(output: &mut impl Write) -> io::Result<()> {
    writeln!(output, "flip                    - flip the board")?;
    writeln!(output, "reset                   - back to the puzzle or starting position")?;
    writeln!(output, "clear                   - remove every piece")?;
    writeln!(output, "preset <name>           - standard, empty, chess960 [id]")?;
    writeln!(output, "import <fen>            - import a position")?;
    writeln!(output, "fen                     - export the position as fen")?;
    writeln!(output, "tool <wQ|eraser|pointer> - select what a square click does")?;
    writeln!(output, "e4                      - use the tool on a square")?;
    writeln!(output, "turn <w|b>              - set the side to move")?;
    writeln!(output, "castle <KQkq|->         - set castling rights")?;
    writeln!(output, "ep <e3|->               - set the en passant target")?;
    writeln!(output, "infer                   - derive rights from the placement")?;
    writeln!(output, "validate                - list problems with the placement")?;
    writeln!(output, "moves <e2>              - show legal destinations")?;
    writeln!(output, "play <e2e4>             - play a move (or just `e2e4`)")?;
    writeln!(output, "puzzle <e2e4>           - set the expected move")?;
    writeln!(output, "quit                    - quit the editor")?;
    Ok(())
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub async fn repl(mut editor: EditorState, settings: Settings) -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let overlay = Overlay::shared();
    let mut puzzle: Option<Puzzle> = None;
    let mut update = true;
    let mut first_time = true;
    loop {
        if update {
            show(&mut output, &editor, &overlay, puzzle.as_ref(), first_time)?;
            first_time = false;
        }
        update = true;
        write!(output, "> ")?;
        output.flush()?;
        let Some(text) = lines.next() else {
            return Ok(());
        };
        let text = text?;
        let input = match text.trim().parse() {
            Ok(input) => input,
            Err(err) => {
                writeln!(error, "Error: {err}")?;
                writeln!(error, "for available command, enter `help`")?;
                update = false;
                continue;
            }
        };
        match input {
            Input::Help => {
                print_help(&mut output)?;
                update = false;
            }
            Input::Flip => editor.flip(),
            Input::Reset => match &puzzle {
                Some(active) => editor.position = active.position(),
                None => editor.position = Position::starting_position(),
            },
            Input::Clear => {
                editor.position.pieces.clear();
                editor.refresh_rights();
            }
            Input::Quit => return Ok(()),
            Input::Preset(preset) => {
                let orientation = editor.orientation;
                editor = EditorState::from_preset(preset);
                editor.orientation = orientation;
                puzzle = None;
                writeln!(output, "loaded {preset}")?;
            }
            Input::Import(fen) => {
                editor.position = Position::from_fen(&fen);
                puzzle = None;
            }
            Input::ExportFen => {
                writeln!(output, "{}", editor.fen())?;
                update = false;
            }
            Input::Tool(tool) => editor.tool = tool,
            Input::Coord(square) => {
                if editor.tool == Tool::Pointer {
                    match editor.position.pieces.get(square) {
                        Some(piece) => writeln!(output, "{square}: {piece}")?,
                        None => writeln!(output, "{square}: empty")?,
                    }
                    update = false;
                } else {
                    editor.apply_tool(square);
                }
            }
            Input::Turn(color) => {
                editor.set_turn(color);
                editor.set_en_passant(None);
            }
            Input::Castle(rights) => editor.set_castling(rights),
            Input::EnPassant(target) => {
                if let Some(square) = target {
                    if !editor.en_passant_candidates().contains(&square) {
                        writeln!(error, "Error: {square} is not an en passant candidate")?;
                        update = false;
                        continue;
                    }
                }
                editor.set_en_passant(target);
            }
            Input::Infer => {
                editor.refresh_rights();
                let candidates = editor.en_passant_candidates();
                if !candidates.is_empty() {
                    let candidates: Vec<_> = candidates.iter().map(Coord::to_string).collect();
                    writeln!(output, "en passant candidates: {}", candidates.join(" "))?;
                }
            }
            Input::Validate => {
                let validation = editor.validate();
                if validation.is_valid() {
                    writeln!(output, "position is valid")?;
                }
                for message in validation.messages() {
                    writeln!(output, "{message}")?;
                }
                update = false;
            }
            Input::Moves(square) => {
                let handle = match ChessRules.load_position(&editor.fen().to_string()) {
                    Ok(handle) => handle,
                    Err(err) => {
                        writeln!(error, "Error: {err}")?;
                        update = false;
                        continue;
                    }
                };
                let destinations = ChessRules.legal_destinations(&handle, square);
                if destinations.is_empty() {
                    writeln!(error, "Error: no legal move from {square}")?;
                    update = false;
                    continue;
                }
                let animation =
                    flash_squares(&overlay, destinations, Marker::Hint, settings.flash);
                animate(&mut output, &editor, &overlay, puzzle.as_ref(), animation).await?;
            }
            Input::Puzzle(solution) => {
                info!(%solution, "puzzle started");
                puzzle = Some(Puzzle::new(editor.fen().to_string(), solution.to_string()));
            }
            Input::Play(movement) => {
                if let Some(active) = &puzzle {
                    if !active.is_solved_by(&movement) {
                        writeln!(output, "{movement} is not the move")?;
                        let animation = flash_squares(
                            &overlay,
                            [movement.origin, movement.destination],
                            Marker::Incorrect,
                            settings.flash,
                        );
                        animate(&mut output, &editor, &overlay, puzzle.as_ref(), animation)
                            .await?;
                        continue;
                    }
                }
                let handle = match ChessRules.load_position(&editor.fen().to_string()) {
                    Ok(handle) => handle,
                    Err(err) => {
                        writeln!(error, "Error: {err}")?;
                        update = false;
                        continue;
                    }
                };
                let Some(next) = ChessRules.apply_move(
                    &handle,
                    movement.origin,
                    movement.destination,
                    movement.promotion,
                ) else {
                    writeln!(error, "Error: {movement} is an invalid move")?;
                    update = false;
                    continue;
                };
                editor.position = Position::from_fen(&next);
                if puzzle.take().is_some() {
                    writeln!(output, "{movement} solves the puzzle")?;
                    let animation = celebrate(&overlay, movement, settings.flash);
                    animate(&mut output, &editor, &overlay, None, animation).await?;
                }
            }
        }
    }
}
