//! Typed game configuration.
//!
//! Games are described declaratively in JSON: board settings, the piece set
//! with per-colour starting squares and movement capabilities, and the portal
//! network. This module only describes and validates the data; placing it on
//! a board is [`crate::Board::initialize`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::piece::{MovementRules, SpecialAbilities};
use crate::position::Position;
use crate::types::{PieceColor, PieceKind};

/// Largest supported board: files are single letters `a..=z`.
pub const MAX_BOARD_SIZE: i32 = 26;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub game_settings: GameSettings,
    #[serde(default)]
    pub pieces: Vec<PieceConfig>,
    #[serde(default)]
    pub custom_pieces: Vec<PieceConfig>,
    #[serde(default)]
    pub portals: Vec<PortalConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub name: String,
    pub board_size: i32,
    pub turn_limit: i32,
}

/// A piece definition together with every square it starts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceConfig {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    #[serde(default)]
    pub positions: BTreeMap<PieceColor, Vec<Position>>,
    #[serde(default)]
    pub movement: MovementRules,
    #[serde(default)]
    pub special_abilities: SpecialAbilities,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub id: String,
    pub positions: PortalPositions,
    #[serde(default)]
    pub properties: PortalProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalPositions {
    pub entry: Position,
    pub exit: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalProperties {
    pub two_way: bool,
    pub preserve_direction: bool,
    pub allowed_colors: Vec<PieceColor>,
    pub cooldown: u32,
}

impl Default for PortalProperties {
    fn default() -> Self {
        Self {
            two_way: false,
            preserve_direction: false,
            allowed_colors: vec![PieceColor::White, PieceColor::Black],
            cooldown: 0,
        }
    }
}

impl PieceConfig {
    /// Starting squares for one colour (empty if none are configured).
    pub fn positions_for(&self, color: PieceColor) -> &[Position] {
        self.positions.get(&color).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl GameConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            name = %config.game_settings.name,
            pieces = config.pieces.len() + config.custom_pieces.len(),
            portals = config.portals.len(),
            "Loaded game configuration"
        );
        Ok(config)
    }

    /// Reject settings the engine cannot run with. Starting squares are not
    /// checked here; out-of-bounds placements are skipped at initialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.game_settings.board_size;
        if !(1..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ConfigError::InvalidBoardSize(size));
        }
        if self.game_settings.turn_limit < 1 {
            return Err(ConfigError::InvalidTurnLimit(self.game_settings.turn_limit));
        }
        Ok(())
    }

    /// Standard and custom piece definitions, in that order.
    pub fn all_pieces(&self) -> impl Iterator<Item = &PieceConfig> {
        self.pieces.iter().chain(self.custom_pieces.iter())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Board size must be between 1 and {MAX_BOARD_SIZE}, got {0}")]
    InvalidBoardSize(i32),
    #[error("Turn limit must be at least 1, got {0}")]
    InvalidTurnLimit(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "game_settings": { "name": "Sample", "board_size": 8, "turn_limit": 50 },
        "pieces": [
            {
                "type": "Rook",
                "positions": { "white": [{"x": 0, "y": 0}], "black": [{"x": 0, "y": 7}] },
                "movement": { "forward": 8, "sideways": 8 },
                "special_abilities": { "castling": true },
                "count": 2
            }
        ],
        "custom_pieces": [
            {
                "type": "Wizard",
                "positions": { "white": [{"x": 3, "y": 3}] },
                "movement": { "diagonal": 1 },
                "special_abilities": { "custom_abilities": { "teleport": true } }
            }
        ],
        "portals": [
            {
                "id": "p1",
                "positions": { "entry": {"x": 2, "y": 2}, "exit": {"x": 5, "y": 5} },
                "properties": { "allowed_colors": ["white"], "cooldown": 3, "two_way": true }
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = GameConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.game_settings.board_size, 8);
        assert_eq!(config.all_pieces().count(), 2);

        let rook = &config.pieces[0];
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.positions_for(PieceColor::Black), &[Position::new(0, 7)]);
        assert!(rook.special_abilities.castling);

        let wizard = &config.custom_pieces[0];
        assert_eq!(wizard.kind, PieceKind::Custom("Wizard".into()));
        assert!(wizard.positions_for(PieceColor::Black).is_empty());
        assert_eq!(wizard.count, 0);

        let portal = &config.portals[0];
        assert_eq!(portal.properties.allowed_colors, vec![PieceColor::White]);
        assert!(portal.properties.two_way);
        assert!(!portal.properties.preserve_direction);
    }

    #[test]
    fn test_portal_properties_default_to_all_colors() {
        let portal: PortalConfig = serde_json::from_str(
            r#"{"id": "x", "positions": {"entry": {"x": 0, "y": 0}, "exit": {"x": 1, "y": 1}}}"#,
        )
        .unwrap();
        assert_eq!(portal.properties.allowed_colors.len(), 2);
    }

    #[test]
    fn test_rejects_bad_board_size() {
        let json = r#"{"game_settings": {"name": "x", "board_size": 0, "turn_limit": 5}}"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::InvalidBoardSize(0))
        ));
    }

    #[test]
    fn test_rejects_bad_turn_limit() {
        let json = r#"{"game_settings": {"name": "x", "board_size": 8, "turn_limit": 0}}"#;
        assert!(matches!(
            GameConfig::from_json(json),
            Err(ConfigError::InvalidTurnLimit(0))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.game_settings.name, "Sample");

        let missing = GameConfig::load(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_bundled_default_config_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/chess_pieces.json");
        let config = GameConfig::load(path).unwrap();
        assert_eq!(config.game_settings.board_size, 8);
        assert!(config.pieces.iter().any(|p| p.kind == PieceKind::King));
    }
}
