//! Terminal rendering of the board.
//!
//! Same grid as the core `Display` impl, with crossterm colours when the
//! output is a terminal.

use std::io::{self, Write};

use crossterm::style::{style, Color, Stylize};
use portalchess_core::board_display::PORTAL_MARK;
use portalchess_core::notation::file_char;
use portalchess_core::{Board, PieceColor, Position};

const COORD_COLOR: Color = Color::Yellow;
const PORTAL_COLOR: Color = Color::Magenta;

fn piece_color(color: PieceColor) -> Color {
    match color {
        PieceColor::White => Color::White,
        PieceColor::Black => Color::Blue,
    }
}

fn paint<W: Write>(out: &mut W, text: impl std::fmt::Display, color: Color, colour: bool) -> io::Result<()> {
    if colour {
        write!(out, "{}", style(text).with(color))
    } else {
        write!(out, "{}", text)
    }
}

fn draw_files<W: Write>(out: &mut W, size: i32, colour: bool) -> io::Result<()> {
    write!(out, "    ")?;
    for x in 0..size {
        paint(out, format!("{} ", file_char(x)), COORD_COLOR, colour)?;
    }
    writeln!(out)
}

/// Write the board, highest rank on top.
pub fn draw_board<W: Write>(out: &mut W, board: &Board, colour: bool) -> io::Result<()> {
    let size = board.size();
    draw_files(out, size, colour)?;
    for y in (0..size).rev() {
        let rank = y + 1;
        paint(out, format!("{:>2}", rank), COORD_COLOR, colour)?;
        write!(out, "  ")?;
        for x in 0..size {
            let pos = Position::new(x, y);
            let symbol = board.square_char(pos);
            match board.get_piece(pos) {
                Some(piece) => paint(out, symbol, piece_color(piece.color), colour)?,
                None if symbol == PORTAL_MARK => paint(out, symbol, PORTAL_COLOR, colour)?,
                None => write!(out, "{}", symbol)?,
            }
            write!(out, " ")?;
        }
        write!(out, " ")?;
        paint(out, rank, COORD_COLOR, colour)?;
        writeln!(out)?;
    }
    draw_files(out, size, colour)
}
