//! Coordinate move notation ("e2e4").
//!
//! A square is a file letter followed by a decimal rank. Files map to `x`
//! from `a = 0`, ranks map to `y = rank - 1`. Ranks may have more than one
//! digit on boards larger than nine, so "a10b9" is a valid move on a 10×10
//! board.

use crate::position::Position;

/// File letter for a zero-based column.
pub fn file_char(x: i32) -> char {
    u8::try_from(x)
        .ok()
        .filter(|x| *x < 26)
        .map(|x| (b'a' + x) as char)
        .unwrap_or('?')
}

/// Format a square, e.g. `(4, 1)` → "e2".
pub fn format_square(pos: Position) -> String {
    format!("{}{}", file_char(pos.x), pos.y + 1)
}

/// Format a move, e.g. "e2e4".
pub fn format_move(from: Position, to: Position) -> String {
    format!("{}{}", format_square(from), format_square(to))
}

/// Parse a single square on a board of the given size.
pub fn parse_square(input: &str, board_size: i32) -> Result<Position, NotationError> {
    let (pos, rest) = parse_square_prefix(input, board_size)?;
    if !rest.is_empty() {
        return Err(NotationError::InvalidFormat(input.to_string()));
    }
    Ok(pos)
}

/// Parse a move made of two concatenated squares.
pub fn parse_move(input: &str, board_size: i32) -> Result<(Position, Position), NotationError> {
    let input = input.trim();
    if input.len() < 4 {
        return Err(NotationError::InvalidLength(input.to_string()));
    }
    let (from, rest) = parse_square_prefix(input, board_size)?;
    let (to, rest) = parse_square_prefix(rest, board_size)?;
    if !rest.is_empty() {
        return Err(NotationError::InvalidFormat(input.to_string()));
    }
    Ok((from, to))
}

fn parse_square_prefix(input: &str, board_size: i32) -> Result<(Position, &str), NotationError> {
    let mut chars = input.chars();
    let file = chars
        .next()
        .ok_or_else(|| NotationError::InvalidFormat(input.to_string()))?;
    if !file.is_ascii_lowercase() {
        return Err(NotationError::InvalidFile(file));
    }
    let x = (file as u8 - b'a') as i32;

    let rest = chars.as_str();
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return Err(NotationError::InvalidRank(rest.to_string()));
    }
    let (rank_str, rest) = rest.split_at(digits);
    let rank: i32 = rank_str
        .parse()
        .map_err(|_| NotationError::InvalidRank(rank_str.to_string()))?;

    if x >= board_size || rank < 1 || rank > board_size {
        return Err(NotationError::OutOfBounds(format!("{}{}", file, rank_str)));
    }
    Ok((Position::new(x, rank - 1), rest))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("Move too short: {0:?} (use a form like e2e4)")]
    InvalidLength(String),
    #[error("Invalid notation: {0:?}")]
    InvalidFormat(String),
    #[error("Invalid file: {0}")]
    InvalidFile(char),
    #[error("Invalid rank: {0:?}")]
    InvalidRank(String),
    #[error("Square off the board: {0}")]
    OutOfBounds(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_move("e2e4", 8),
            Ok((Position::new(4, 1), Position::new(4, 3)))
        );
        assert_eq!(
            parse_move("a1h8", 8),
            Ok((Position::new(0, 0), Position::new(7, 7)))
        );
    }

    #[test]
    fn test_parse_move_multi_digit_rank() {
        assert_eq!(
            parse_move("a10b9", 10),
            Ok((Position::new(0, 9), Position::new(1, 8)))
        );
    }

    #[test]
    fn test_parse_move_errors() {
        assert!(matches!(parse_move("e2", 8), Err(NotationError::InvalidLength(_))));
        assert_eq!(parse_move("E2e4", 8), Err(NotationError::InvalidFile('E')));
        assert!(matches!(parse_move("eee4", 8), Err(NotationError::InvalidRank(_))));
        assert!(matches!(parse_move("e2e9", 8), Err(NotationError::OutOfBounds(_))));
        assert!(matches!(parse_move("i2e4", 8), Err(NotationError::OutOfBounds(_))));
        assert!(matches!(parse_move("e0e4", 8), Err(NotationError::OutOfBounds(_))));
        assert!(matches!(parse_move("e2e4x", 8), Err(NotationError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("c3", 8), Ok(Position::new(2, 2)));
        assert!(matches!(parse_square("c3d", 8), Err(NotationError::InvalidFormat(_))));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_square(Position::new(4, 1)), "e2");
        assert_eq!(format_move(Position::new(0, 0), Position::new(7, 7)), "a1h8");
    }
}
