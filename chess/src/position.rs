//! Board coordinates. A `Position` is hashed directly as the board map key.

use serde::{Deserialize, Serialize};

/// A zero-based board coordinate. Validity depends on the board size and is
/// checked by [`crate::Board::is_position_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The eight king-step neighbours, in-bounds or not.
    pub fn neighbours(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Chebyshev distance.
    pub fn distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours() {
        let around: Vec<Position> = Position::new(0, 0).neighbours().collect();
        assert_eq!(around.len(), 8);
        assert!(!around.contains(&Position::new(0, 0)));
        assert!(around.iter().all(|p| p.distance(Position::new(0, 0)) == 1));
    }
}
