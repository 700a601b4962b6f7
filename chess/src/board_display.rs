//! Plain-text board rendering for diagnostics.

use std::fmt;

use crate::board::Board;
use crate::notation::file_char;
use crate::position::Position;

/// Marker for an empty square that hosts a portal entry.
pub const PORTAL_MARK: char = '*';
pub const EMPTY_MARK: char = '.';

impl Board {
    /// Character shown for one square: piece symbol (upper case white, lower
    /// case black), portal marker, or empty marker.
    pub fn square_char(&self, pos: Position) -> char {
        match self.get_piece(pos) {
            Some(piece) => piece.display_char(),
            None if self.portals().portal_at(pos).is_some() => PORTAL_MARK,
            None => EMPTY_MARK,
        }
    }

    fn write_files(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for x in 0..self.size() {
            write!(f, "{} ", file_char(x))?;
        }
        writeln!(f)
    }
}

/// Highest rank on top, files left to right.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_files(f)?;
        for y in (0..self.size()).rev() {
            let rank = y + 1;
            write!(f, "{:>2}  ", rank)?;
            for x in 0..self.size() {
                write!(f, "{} ", self.square_char(Position::new(x, y)))?;
            }
            writeln!(f, " {}", rank)?;
        }
        self.write_files(f)
    }
}
