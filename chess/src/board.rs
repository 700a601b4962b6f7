//! Board state: piece occupancy, portals and raw piece relocation.
//!
//! The board never judges whether a move is legal; that is [`crate::rules`].
//! It only guarantees that occupancy stays consistent (one piece per square,
//! nothing outside the board) and that a failed relocation leaves it
//! untouched.

use std::collections::HashMap;

use crate::config::{GameConfig, PieceConfig, PortalConfig};
use crate::piece::Piece;
use crate::portal::PortalSystem;
use crate::position::Position;
use crate::types::PieceColor;

/// A square board of fixed size. Cloning deep-copies every piece.
#[derive(Debug, Clone)]
pub struct Board {
    size: i32,
    squares: HashMap<Position, Piece>,
    portals: PortalSystem,
}

impl Board {
    pub fn new(size: i32) -> Self {
        Self {
            size,
            squares: HashMap::new(),
            portals: PortalSystem::new(),
        }
    }

    /// Build and populate a board from a loaded configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        let mut board = Self::new(config.game_settings.board_size);
        board.initialize(config.all_pieces(), &config.portals);
        board
    }

    /// Place a colour-tagged copy of every configured piece on each of its
    /// starting squares and replace the portal network. Out-of-bounds
    /// starting squares are logged and skipped.
    pub fn initialize<'a>(
        &mut self,
        pieces: impl IntoIterator<Item = &'a PieceConfig>,
        portals: &[PortalConfig],
    ) {
        self.portals = PortalSystem::from_configs(portals);

        for config in pieces {
            for color in [PieceColor::White, PieceColor::Black] {
                for &pos in config.positions_for(color) {
                    if !self.is_position_valid(pos) {
                        tracing::warn!(
                            piece = %config.kind,
                            %color,
                            x = pos.x,
                            y = pos.y,
                            "Invalid starting position, placement skipped"
                        );
                        continue;
                    }
                    let piece = Piece::new(
                        config.kind.clone(),
                        color,
                        config.movement.clone(),
                        config.special_abilities.clone(),
                    );
                    self.squares.insert(pos, piece);
                }
            }
        }

        for portal in self.portals.portals() {
            if !self.is_position_valid(portal.entry) || !self.is_position_valid(portal.exit) {
                tracing::warn!(id = %portal.id, entry = %portal.entry, exit = %portal.exit, "Portal leaves the board");
            }
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn is_position_valid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.size && pos.y >= 0 && pos.y < self.size
    }

    /// Canonical map key for a coordinate pair.
    pub fn get_key(&self, x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        self.squares.get(&pos)
    }

    pub fn has_piece_at(&self, pos: Position) -> bool {
        self.squares.contains_key(&pos)
    }

    /// Put a piece on a square, returning whatever stood there.
    pub fn place(&mut self, pos: Position, piece: Piece) -> Result<Option<Piece>, BoardError> {
        if !self.is_position_valid(pos) {
            return Err(BoardError::InvalidPosition(pos));
        }
        Ok(self.squares.insert(pos, piece))
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.squares.remove(&pos)
    }

    /// Every occupied square in row-major order (`y`, then `x`).
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| {
                let pos = Position::new(x, y);
                self.get_piece(pos).map(|piece| (pos, piece))
            })
        })
    }

    pub fn pieces_of(&self, color: PieceColor) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.squares.len()
    }

    /// Every square on the board in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    pub fn portals(&self) -> &PortalSystem {
        &self.portals
    }

    pub fn portals_mut(&mut self) -> &mut PortalSystem {
        &mut self.portals
    }

    /// Effective destination of a move leaving `from`.
    ///
    /// When `from` hosts a portal entry that admits the moving piece's colour
    /// and is not cooling down, the destination becomes the portal exit.
    /// Otherwise `to` is returned unchanged.
    pub fn handle_portal(&self, from: Position, to: Position) -> Position {
        self.portal_exit(from).unwrap_or(to)
    }

    /// The exit a piece leaving `from` would be sent to, if the portal on
    /// `from` admits it right now.
    pub fn portal_exit(&self, from: Position) -> Option<Position> {
        let piece = self.get_piece(from)?;
        let portal = self.portals.portal_at(from)?;

        if !portal.allows(piece.color) {
            tracing::warn!(
                id = %portal.id,
                x = from.x,
                y = from.y,
                color = %piece.color,
                "Portal not allowed for this colour"
            );
            return None;
        }
        if self.portals.is_on_cooldown(from) {
            tracing::info!(id = %portal.id, x = from.x, y = from.y, "Portal is cooling down");
            return None;
        }

        let exit = self.portals.exit_for(from);
        tracing::info!(id = %portal.id, from = %from, to = %exit, "Moved through portal");
        Some(exit)
    }

    /// Relocate the piece on `from`, redirecting through a portal on `from`
    /// when one applies. Any occupant of the destination is overwritten.
    /// Returns the square the piece actually landed on.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Position, BoardError> {
        let exit = self.portal_exit(from);
        let dest = exit.unwrap_or(to);
        self.relocate(from, dest)?;
        if exit.is_some() {
            self.portals.apply_cooldown(from);
        }
        Ok(dest)
    }

    /// Relocation without portal or cooldown side effects, for speculative
    /// moves on cloned boards.
    pub fn move_piece_for_clone_board(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<(), BoardError> {
        self.relocate(from, to)
    }

    /// Close a turn: advance by one every cooldown that was already queued
    /// when the turn began. `settled` is the queue length at that point;
    /// cooldowns applied during the turn keep their full length.
    pub fn end_turn(&mut self, settled: usize) {
        self.portals.decrement_oldest(settled);
    }

    fn relocate(&mut self, from: Position, to: Position) -> Result<(), BoardError> {
        if !self.has_piece_at(from) {
            return Err(BoardError::EmptySquare(from));
        }
        if !self.is_position_valid(to) {
            return Err(BoardError::InvalidPosition(to));
        }
        if let Some(piece) = self.squares.remove(&from) {
            self.squares.insert(to, piece);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Position {0} is outside the board")]
    InvalidPosition(Position),
    #[error("No piece at {0}")]
    EmptySquare(Position),
}
