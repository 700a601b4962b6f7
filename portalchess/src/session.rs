//! The interactive turn loop.
//!
//! Generic over the input and output streams so the whole loop can be driven
//! from in-memory buffers.

use std::io::{BufRead, Write};

use portalchess_core::notation::{self, format_move};
use portalchess_core::{Game, GameError, GameStatus, PieceColor};

use crate::render;
use crate::CliError;

const HELP: &str = "\
Commands:
  <from><to>   play a move, e.g. e2e4
  undo         take back the last move
  help         show this list
  quit, exit   leave the game";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    Checkmate { winner: PieceColor },
    KingCaptured { winner: PieceColor },
    TurnLimitReached,
    EndOfInput,
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Undo,
    Help,
    Move(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => None,
            "quit" | "exit" => Some(Self::Quit),
            "undo" => Some(Self::Undo),
            "help" => Some(Self::Help),
            _ => Some(Self::Move(line)),
        }
    }
}

/// Play until checkmate, the turn limit, `quit`, or end of input.
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    mut input: R,
    out: &mut W,
    colour: bool,
) -> Result<Outcome, CliError> {
    tracing::info!(name = %game.name(), "Session started");
    let mut line = String::new();

    loop {
        render::draw_board(out, game.board(), colour)?;
        let side = game.side_to_move();
        let checkers = game.checking_squares();
        if !checkers.is_empty() {
            let squares: Vec<String> = checkers.into_iter().map(notation::format_square).collect();
            writeln!(out, "{} is in check from {}!", side.title(), squares.join(", "))?;
        }
        write!(out, "{} to move: ", side.title())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(Outcome::EndOfInput);
        }

        match Command::parse(&line) {
            None => {}
            Some(Command::Quit) => {
                writeln!(out, "Game ended.")?;
                return Ok(Outcome::Quit);
            }
            Some(Command::Help) => writeln!(out, "{}", HELP)?,
            Some(Command::Undo) => match game.undo() {
                Ok(record) => writeln!(out, "Took back {}", format_move(record.from, record.to))?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Some(Command::Move(text)) => {
                if let Some(outcome) = play(game, text, out, colour)? {
                    return Ok(outcome);
                }
            }
        }
    }
}

/// Apply one typed move and report it. Returns an outcome once the game ends.
fn play<W: Write>(
    game: &mut Game,
    text: &str,
    out: &mut W,
    colour: bool,
) -> Result<Option<Outcome>, CliError> {
    let result = notation::parse_move(text, game.board().size())
        .map_err(GameError::from)
        .and_then(|(from, to)| game.process_move(from, to));

    let record = match result {
        Ok(played) => played,
        Err(e) => {
            tracing::debug!(input = text, error = %e, "Move rejected");
            writeln!(out, "Invalid move: {}", e)?;
            return Ok(None);
        }
    };

    if record.is_castle() {
        writeln!(out, "Castled: {}", format_move(record.from, record.to))?;
    } else if record.via_portal {
        writeln!(
            out,
            "Portal! {} landed on {}",
            record.piece.kind,
            notation::format_square(record.to)
        )?;
    }
    if let Some(captured) = &record.captured {
        writeln!(out, "Captured {} {}", captured.color.as_str(), captured.kind)?;
    }

    match game.status() {
        GameStatus::Ongoing => Ok(None),
        GameStatus::Checkmate { winner } => {
            render::draw_board(out, game.board(), colour)?;
            writeln!(out, "Checkmate! {} wins.", winner.title())?;
            Ok(Some(Outcome::Checkmate { winner }))
        }
        GameStatus::KingCaptured { winner } => {
            render::draw_board(out, game.board(), colour)?;
            writeln!(
                out,
                "{} wins! {}'s King is gone.",
                winner.title(),
                winner.opponent().title()
            )?;
            Ok(Some(Outcome::KingCaptured { winner }))
        }
        GameStatus::TurnLimitReached => {
            render::draw_board(out, game.board(), colour)?;
            writeln!(
                out,
                "Turn limit of {} reached. The game is a draw.",
                game.turn_limit()
            )?;
            Ok(Some(Outcome::TurnLimitReached))
        }
    }
}
