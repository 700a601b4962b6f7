//! Path reachability over the squares that are currently free.
//!
//! The validator snapshots board occupancy into an adjacency list once and
//! answers reachability queries with a breadth-first search of king steps.
//! It knows nothing about piece movement shapes; it only answers whether the
//! destination can be reached through empty squares.

use smallvec::SmallVec;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::board::Board;
use crate::position::Position;

type Neighbours = SmallVec<[Position; 8]>;

pub struct MoveValidator {
    adjacency: HashMap<Position, Neighbours>,
}

impl MoveValidator {
    /// Build the graph for the board as it is now. Build a new validator for
    /// every move attempt; the graph does not follow later board changes.
    pub fn new(board: &Board) -> Self {
        let adjacency = board
            .squares()
            .map(|square| {
                let neighbours: Neighbours = square
                    .neighbours()
                    .filter(|n| board.is_position_valid(*n) && !board.has_piece_at(*n))
                    .collect();
                (square, neighbours)
            })
            .collect();
        Self { adjacency }
    }

    /// True iff `to` can be reached from `from` through empty squares. The
    /// destination itself may be occupied: the last step lands on it.
    pub fn is_path_valid(&self, from: Position, to: Position) -> bool {
        if !self.adjacency.contains_key(&from) || !self.adjacency.contains_key(&to) {
            return false;
        }
        self.bfs(from, to)
    }

    fn bfs(&self, start: Position, target: Position) -> bool {
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == target || current.distance(target) == 1 {
                return true;
            }
            let Some(neighbours) = self.adjacency.get(&current) else {
                continue;
            };
            for &next in neighbours {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        false
    }
}
