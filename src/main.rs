#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{io, time::Duration};

use boardwright::{color::Color, editor::EditorState, preset::Preset};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::repl::{Settings, repl};

mod board_display;
mod repl;

/// Terminal chess board editor.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Position to start from.
    #[arg(long, conflicts_with = "preset")]
    fen: Option<String>,
    /// Starting layout: `standard`, `empty`, `chess960`, or `chess960 <id>`.
    #[arg(long, default_value = "standard")]
    preset: Preset,
    /// View the board from black's side.
    #[arg(long)]
    black: bool,
    /// How long feedback markers stay on the board, in milliseconds.
    #[arg(long, default_value_t = 600)]
    flash_ms: u64,
    /// Tracing filter, overrides `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    match directives {
        Some(directives) => EnvFilter::try_new(directives).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.log.as_deref()))
        .with_writer(io::stderr)
        .init();

    let mut editor = match &args.fen {
        Some(fen) => EditorState::from_fen(fen),
        None => EditorState::from_preset(args.preset),
    };
    if args.black {
        editor.orientation = Color::Black;
    }
    let settings = Settings {
        flash: Duration::from_millis(args.flash_ms),
    };
    repl(editor, settings).await
}
#[cfg(test)]
mod test {
    use crate::log_filter;

    #[test]
    fn log_flag_sets_the_filter() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(Some("boardwright=trace")).to_string(),
            "boardwright=trace"
        );
    }
    #[test]
    fn unreadable_log_flag_falls_back_to_warn() {
        assert_eq!(log_filter(Some("boardwright=loud")).to_string(), "warn");
    }
}
