//! Turn state around a board: move processing, history, undo and the end
//! of the game.

use std::collections::VecDeque;

use crate::board::{Board, BoardError};
use crate::config::GameConfig;
use crate::notation::{self, NotationError};
use crate::piece::Piece;
use crate::portal::CooldownEntry;
use crate::position::Position;
use crate::rules;
use crate::types::{PieceColor, PieceKind};
use crate::validator::MoveValidator;

/// Turn state wrapped around a [`Board`]
#[derive(Debug, Clone)]
pub struct Game {
    name: String,
    board: Board,
    side_to_move: PieceColor,
    turn_count: i32,
    turn_limit: i32,
    history: Vec<MoveRecord>,
    status: GameStatus,
}

/// Everything needed to take a move back
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub from: Position,
    /// Square the piece landed on, after any portal redirection
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Rook relocation (from, to) when the move was a castle
    pub castle_rook: Option<(Position, Position)>,
    /// The piece left through a portal on `from`
    pub via_portal: bool,
    pub cooldowns_before: VecDeque<CooldownEntry>,
}

impl MoveRecord {
    pub fn is_castle(&self) -> bool {
        self.castle_rook.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: PieceColor },
    /// The loser's King was taken off the board
    KingCaptured { winner: PieceColor },
    TurnLimitReached,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

impl Game {
    /// Create a game from a loaded configuration. White moves first.
    pub fn new(config: &GameConfig) -> Self {
        Self::from_board(
            config.game_settings.name.clone(),
            Board::from_config(config),
            config.game_settings.turn_limit,
        )
    }

    /// Create a game around an already populated board
    pub fn from_board(name: impl Into<String>, board: Board, turn_limit: i32) -> Self {
        Self {
            name: name.into(),
            board,
            side_to_move: PieceColor::White,
            turn_count: 0,
            turn_limit,
            history: Vec::new(),
            status: GameStatus::Ongoing,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    pub fn turn_count(&self) -> i32 {
        self.turn_count
    }

    pub fn turn_limit(&self) -> i32 {
        self.turn_limit
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the side to move is in check
    pub fn is_in_check(&self) -> bool {
        rules::is_check(&self.board, self.side_to_move)
    }

    /// Squares of the opposing pieces attacking the King of the side to move
    pub fn checking_squares(&self) -> Vec<Position> {
        rules::find_king(&self.board, self.side_to_move)
            .map(|king| rules::attackers_of(&self.board, king, self.side_to_move))
            .unwrap_or_default()
    }

    /// Decode a move like "e2e4" and play it
    pub fn process_input(&mut self, input: &str) -> Result<MoveRecord, GameError> {
        let (from, to) = notation::parse_move(input, self.board.size())?;
        self.process_move(from, to)
    }

    /// Validate and apply one move for the side to move
    pub fn process_move(&mut self, from: Position, to: Position) -> Result<MoveRecord, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }

        let piece = self
            .board
            .get_piece(from)
            .cloned()
            .ok_or(GameError::EmptySquare(from))?;
        if piece.color != self.side_to_move {
            return Err(GameError::NotYourTurn(self.side_to_move));
        }

        let record = match self.castle_rook(&piece, from, to) {
            Some(rook) => self.apply_castle(piece, from, to, rook)?,
            None => self.apply_regular(piece, from, to)?,
        };

        tracing::info!(
            turn = self.turn_count + 1,
            color = %self.side_to_move,
            mv = %notation::format_move(record.from, record.to),
            captured = record.captured.as_ref().map(|p| p.kind.name()),
            "Move applied"
        );

        self.history.push(record.clone());
        // A turn is complete once Black has replied.
        if self.side_to_move == PieceColor::Black {
            self.board.end_turn(record.cooldowns_before.len());
        }
        self.side_to_move = self.side_to_move.opponent();
        self.turn_count += 1;
        self.status = self.evaluate_status(&record);

        Ok(record)
    }

    /// Take back the last move, restoring the board, cooldowns and turn
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        let record = self.history.pop().ok_or(GameError::NothingToUndo)?;

        self.board.remove(record.to);
        self.board.place(record.from, record.piece.clone())?;
        if let Some(captured) = record.captured.clone() {
            self.board.place(record.to, captured)?;
        }
        if let Some((rook_from, rook_to)) = record.castle_rook {
            self.board.move_piece_for_clone_board(rook_to, rook_from)?;
        }
        self.board
            .portals_mut()
            .restore_cooldowns(record.cooldowns_before.clone());

        self.side_to_move = self.side_to_move.opponent();
        self.turn_count -= 1;
        self.status = GameStatus::Ongoing;

        tracing::info!(
            mv = %notation::format_move(record.from, record.to),
            "Move undone"
        );
        Ok(record)
    }

    /// Rook squares for a castling request: a castling-capable King moving
    /// exactly two files along its rank, with castling allowed on that side.
    fn castle_rook(&self, piece: &Piece, from: Position, to: Position) -> Option<(Position, Position)> {
        if piece.kind != PieceKind::King
            || !piece.abilities.castling
            || from.y != to.y
            || (to.x - from.x).abs() != 2
        {
            return None;
        }
        let is_left = to.x < from.x;
        let rook_from = Position::new(if is_left { 0 } else { self.board.size() - 1 }, from.y);
        // The king must land strictly between its square and the rook's.
        if (rook_from.x - from.x).abs() <= 2 || !rules::can_castle(&self.board, from, is_left) {
            return None;
        }
        let rook_to = Position::new((from.x + to.x) / 2, from.y);
        Some((rook_from, rook_to))
    }

    fn apply_castle(
        &mut self,
        piece: Piece,
        from: Position,
        to: Position,
        (rook_from, rook_to): (Position, Position),
    ) -> Result<MoveRecord, GameError> {
        let cooldowns_before = self.board.portals().cooldowns().clone();
        self.board.move_piece_for_clone_board(from, to)?;
        self.board.move_piece_for_clone_board(rook_from, rook_to)?;
        tracing::debug!(king = %to, rook = %rook_to, "Castled");

        Ok(MoveRecord {
            from,
            to,
            piece,
            captured: None,
            castle_rook: Some((rook_from, rook_to)),
            via_portal: false,
            cooldowns_before,
        })
    }

    fn apply_regular(&mut self, piece: Piece, from: Position, to: Position) -> Result<MoveRecord, GameError> {
        if !self.board.is_position_valid(to) {
            return Err(BoardError::InvalidPosition(to).into());
        }
        if !rules::is_valid_move(&self.board, from, to) {
            tracing::debug!(from = %from, to = %to, piece = %piece.kind, "Rejected by movement rules");
            return Err(GameError::IllegalMove);
        }

        let validator = MoveValidator::new(&self.board);
        if !validator.is_path_valid(from, to) {
            tracing::debug!(from = %from, to = %to, "Rejected, no free path");
            return Err(GameError::PathBlocked);
        }

        let exit = self.board.portal_exit(from);
        let destination = exit.unwrap_or(to);
        if self
            .board
            .get_piece(destination)
            .is_some_and(|p| p.color == piece.color)
        {
            return Err(GameError::OwnPieceAtExit(destination));
        }

        let captured = self.board.get_piece(destination).cloned();
        let cooldowns_before = self.board.portals().cooldowns().clone();
        let landed = self.board.move_piece(from, to)?;

        Ok(MoveRecord {
            from,
            to: landed,
            piece,
            captured,
            castle_rook: None,
            via_portal: exit.is_some(),
            cooldowns_before,
        })
    }

    /// Taking the last King of the side now to move ends the game, as does
    /// checkmating it; otherwise reaching the turn limit draws it.
    fn evaluate_status(&self, last: &MoveRecord) -> GameStatus {
        let mover = self.side_to_move.opponent();
        let took_king = last
            .captured
            .as_ref()
            .is_some_and(|p| p.kind == PieceKind::King);
        if took_king && rules::find_king(&self.board, self.side_to_move).is_none() {
            return GameStatus::KingCaptured { winner: mover };
        }
        if rules::is_checkmate(&self.board, self.side_to_move) {
            return GameStatus::Checkmate { winner: mover };
        }
        if self.turn_count >= self.turn_limit {
            return GameStatus::TurnLimitReached;
        }
        GameStatus::Ongoing
    }
}

fn square(pos: &Position) -> String {
    notation::format_square(*pos)
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{0}")]
    Notation(#[from] NotationError),
    #[error("No piece at {}", square(.0))]
    EmptySquare(Position),
    #[error("It is {}'s turn", .0.title())]
    NotYourTurn(PieceColor),
    #[error("Illegal move for this piece")]
    IllegalMove,
    #[error("Path is blocked")]
    PathBlocked,
    #[error("Portal exit {} is occupied by your own piece", square(.0))]
    OwnPieceAtExit(Position),
    #[error("Board error: {0}")]
    Board(#[from] BoardError),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("The game is over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{MovementRules, SpecialAbilities};

    fn king() -> Piece {
        Piece::new(
            PieceKind::King,
            PieceColor::White,
            MovementRules {
                forward: 1,
                sideways: 1,
                diagonal: 1,
                ..Default::default()
            },
            SpecialAbilities {
                castling: true,
                royal: true,
                ..Default::default()
            },
        )
    }

    fn rook(color: PieceColor) -> Piece {
        Piece::new(
            PieceKind::Rook,
            color,
            MovementRules {
                forward: 8,
                sideways: 8,
                ..Default::default()
            },
            SpecialAbilities::default(),
        )
    }

    fn castling_game() -> Game {
        let mut board = Board::new(8);
        board.place(Position::new(4, 0), king()).unwrap();
        board.place(Position::new(0, 0), rook(PieceColor::White)).unwrap();
        board.place(Position::new(7, 0), rook(PieceColor::White)).unwrap();
        board.place(Position::new(0, 7), rook(PieceColor::Black)).unwrap();
        Game::from_board("castling", board, 100)
    }

    #[test]
    fn test_castle_king_side() {
        let mut game = castling_game();
        let record = game.process_move(Position::new(4, 0), Position::new(6, 0)).unwrap();

        assert!(record.is_castle());
        let board = game.board();
        assert_eq!(board.get_piece(Position::new(6, 0)).map(|p| p.kind.clone()), Some(PieceKind::King));
        assert_eq!(board.get_piece(Position::new(5, 0)).map(|p| p.kind.clone()), Some(PieceKind::Rook));
        assert!(!board.has_piece_at(Position::new(7, 0)));
        assert_eq!(game.side_to_move(), PieceColor::Black);
    }

    #[test]
    fn test_undo_castle() {
        let mut game = castling_game();
        game.process_move(Position::new(4, 0), Position::new(2, 0)).unwrap();
        assert!(game.board().has_piece_at(Position::new(3, 0)));

        game.undo().unwrap();
        let board = game.board();
        assert!(board.has_piece_at(Position::new(4, 0)));
        assert!(board.has_piece_at(Position::new(0, 0)));
        assert!(!board.has_piece_at(Position::new(2, 0)));
        assert!(!board.has_piece_at(Position::new(3, 0)));
        assert_eq!(game.side_to_move(), PieceColor::White);
        assert_eq!(game.turn_count(), 0);
    }

    #[test]
    fn test_two_file_king_move_without_castle_is_illegal() {
        let mut board = Board::new(8);
        board.place(Position::new(4, 0), king()).unwrap();
        let mut game = Game::from_board("lonely", board, 10);
        assert!(matches!(
            game.process_move(Position::new(4, 0), Position::new(6, 0)),
            Err(GameError::IllegalMove)
        ));
    }

    #[test]
    fn test_wrong_side_and_empty_square() {
        let mut game = castling_game();
        assert!(matches!(
            game.process_move(Position::new(0, 7), Position::new(0, 6)),
            Err(GameError::NotYourTurn(PieceColor::White))
        ));
        assert!(matches!(
            game.process_move(Position::new(3, 3), Position::new(3, 4)),
            Err(GameError::EmptySquare(_))
        ));
        assert_eq!(game.turn_count(), 0);
    }

    #[test]
    fn test_undo_on_fresh_game() {
        let mut game = castling_game();
        assert!(matches!(game.undo(), Err(GameError::NothingToUndo)));
    }

    #[test]
    fn test_turn_limit_draws() {
        let mut game = castling_game();
        game.turn_limit = 2;
        game.process_input("a1a2").unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
        game.process_input("a8a7").unwrap();
        assert_eq!(game.status(), GameStatus::TurnLimitReached);
        assert!(matches!(game.process_input("a2a3"), Err(GameError::GameOver)));
    }

    #[test]
    fn test_off_board_destination_is_reported_as_such() {
        let mut board = Board::new(8);
        board
            .place(
                Position::new(0, 0),
                Piece::new(
                    PieceKind::Knight,
                    PieceColor::White,
                    MovementRules {
                        l_shape: true,
                        ..Default::default()
                    },
                    SpecialAbilities::default(),
                ),
            )
            .unwrap();
        let mut game = Game::from_board("edge", board, 10);

        assert!(matches!(
            game.process_move(Position::new(0, 0), Position::new(-1, 2)),
            Err(GameError::Board(BoardError::InvalidPosition(pos))) if pos == Position::new(-1, 2)
        ));
        assert_eq!(game.turn_count(), 0);
    }

    #[test]
    fn test_error_messages_use_notation() {
        let err = GameError::EmptySquare(Position::new(4, 1));
        assert_eq!(err.to_string(), "No piece at e2");
        let err = GameError::NotYourTurn(PieceColor::Black);
        assert_eq!(err.to_string(), "It is Black's turn");
    }
}
