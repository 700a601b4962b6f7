//! Move legality, check and checkmate.
//!
//! Every function here is pure: it reads a board snapshot and never mutates
//! it. Hypothetical moves are played on clones with
//! [`Board::move_piece_for_clone_board`], so portals and cooldowns of the
//! real game are never touched.

use crate::board::Board;
use crate::position::Position;
use crate::types::{PieceColor, PieceKind};
use crate::validator::MoveValidator;

/// Whether the piece on `from` may move to `to` under its movement rules.
///
/// Capabilities are tried in a fixed order and the first shape that matches
/// the displacement decides: L-shape, diagonal, vertical (non-pawns),
/// horizontal, then the pawn rules. A sliding capability reaches at most as
/// many squares as its configured count.
pub fn is_valid_move(board: &Board, from: Position, to: Position) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = board.get_piece(from) else {
        return false;
    };

    let target = board.get_piece(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return false;
    }

    let rules = &piece.movement;
    let is_pawn = piece.kind == PieceKind::Pawn;
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();

    if rules.l_shape && ((dx == 2 && dy == 1) || (dx == 1 && dy == 2)) {
        return true;
    }

    if dx == dy && within(rules.diagonal, dx) {
        return is_line_clear(board, from, to);
    }

    if !is_pawn && dx == 0 && within(rules.forward, dy) {
        return is_line_clear(board, from, to);
    }

    if dy == 0 && within(rules.sideways, dx) {
        return is_line_clear(board, from, to);
    }

    if is_pawn && rules.allows_forward() {
        let white = piece.color == PieceColor::White;
        let direction = if white { 1 } else { -1 };
        let moving_forward = (to.y - from.y).signum() == direction;

        if moving_forward && dx == 0 && dy == 1 && target.is_none() {
            return true;
        }

        // A pawn counts as unmoved while it stands on its side's second rank.
        if rules.allows_first_move_double() && moving_forward && dx == 0 && dy == 2 {
            let home_rank = if white { 1 } else { board.size() - 2 };
            if from.y == home_rank
                && !board.has_piece_at(from.offset(0, direction))
                && target.is_none()
            {
                return true;
            }
        }

        if rules.allows_diagonal_capture() && dx == 1 && dy == 1 && target.is_some() {
            return true;
        }
    }

    false
}

/// A capability with range `count` covers a slide of `distance` squares.
fn within(count: u32, distance: i32) -> bool {
    count > 0 && u32::try_from(distance).is_ok_and(|d| d <= count)
}

/// Every square strictly between `from` and `to` on a straight or diagonal
/// line is empty.
fn is_line_clear(board: &Board, from: Position, to: Position) -> bool {
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();
    let mut current = from.offset(step_x, step_y);
    while current != to {
        if board.has_piece_at(current) {
            return false;
        }
        current = current.offset(step_x, step_y);
    }
    true
}

/// First King of `color` in row-major order.
pub fn find_king(board: &Board, color: PieceColor) -> Option<Position> {
    board
        .pieces_of(color)
        .find(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(pos, _)| pos)
}

/// Every opposing square whose piece could legally move onto `target`.
pub fn attackers_of(board: &Board, target: Position, color: PieceColor) -> Vec<Position> {
    board
        .pieces_of(color.opponent())
        .filter(|(pos, _)| is_valid_move(board, *pos, target))
        .map(|(pos, _)| pos)
        .collect()
}

/// Whether the King of `color` is attacked. A side without a King is never
/// in check.
pub fn is_check(board: &Board, color: PieceColor) -> bool {
    let Some(king) = find_king(board, color) else {
        return false;
    };
    board
        .pieces_of(color.opponent())
        .any(|(pos, _)| is_valid_move(board, pos, king))
}

/// Whether `color` is in check with no escape.
///
/// Brute force: every piece of `color` is tried against every square of the
/// board. Each candidate that is a legal move with a reachable path is played
/// on a clone, and any clone that leaves `color` out of check is an escape.
pub fn is_checkmate(board: &Board, color: PieceColor) -> bool {
    if !is_check(board, color) {
        return false;
    }

    let validator = MoveValidator::new(board);
    let defenders: Vec<Position> = board.pieces_of(color).map(|(pos, _)| pos).collect();
    for from in defenders {
        for to in board.squares() {
            if !is_valid_move(board, from, to) || !validator.is_path_valid(from, to) {
                continue;
            }
            let mut test_board = board.clone();
            if test_board.move_piece_for_clone_board(from, to).is_ok()
                && !is_check(&test_board, color)
            {
                tracing::debug!(%color, from = %from, to = %to, "Check can be escaped");
                return false;
            }
        }
    }

    true
}

/// Whether the King on `king` may castle with the Rook on the board edge
/// (`is_left` picks file `a`, otherwise the last file).
///
/// Requires a same-colour Rook on the king's rank, empty squares between
/// them, the king not in check, and no square the king crosses between them
/// attacked.
pub fn can_castle(board: &Board, king: Position, is_left: bool) -> bool {
    let rook_pos = Position::new(if is_left { 0 } else { board.size() - 1 }, king.y);

    let (Some(king_piece), Some(rook_piece)) = (board.get_piece(king), board.get_piece(rook_pos))
    else {
        return false;
    };
    if king_piece.kind != PieceKind::King
        || rook_piece.kind != PieceKind::Rook
        || rook_piece.color != king_piece.color
        || king == rook_pos
    {
        return false;
    }
    let color = king_piece.color;

    let start = king.x.min(rook_pos.x) + 1;
    let end = king.x.max(rook_pos.x);
    let rank = king.y;
    let between = move || (start..end).map(move |x| Position::new(x, rank));

    if between().any(|pos| board.has_piece_at(pos)) {
        return false;
    }
    if is_check(board, color) {
        return false;
    }

    between().all(|pos| {
        let mut test_board = board.clone();
        test_board.move_piece_for_clone_board(king, pos).is_ok() && !is_check(&test_board, color)
    })
}
