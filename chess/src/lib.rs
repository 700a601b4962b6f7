//! Rules engine for configurable chess variants with portals.
//!
//! Piece movement is data-driven (see [`config`]), legality and
//! check/checkmate live in [`rules`], path reachability in [`validator`], and
//! [`Game`] ties them together into a turn loop with undo.

pub mod board;
pub mod board_display;
pub mod config;
pub mod game;
pub mod notation;
pub mod piece;
pub mod portal;
pub mod position;
pub mod rules;
pub mod types;
pub mod validator;

pub use board::{Board, BoardError};
pub use config::{
    ConfigError, GameConfig, GameSettings, PieceConfig, PortalConfig, PortalPositions,
    PortalProperties,
};
pub use game::{Game, GameError, GameStatus, MoveRecord};
pub use notation::{format_move, format_square, parse_move, NotationError};
pub use piece::{MovementRules, Piece, SpecialAbilities};
pub use portal::{CooldownEntry, Portal, PortalSystem, DEFAULT_COOLDOWN_TURNS};
pub use position::Position;
pub use types::{PieceColor, PieceKind};
pub use validator::MoveValidator;
