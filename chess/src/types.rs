//! Canonical piece and color types for the project.
//! Piece kinds are data-driven: anything outside the standard set is a
//! `Custom` kind carrying its configured name.

use serde::{Deserialize, Serialize};

/// Project-owned piece type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Custom(String),
}

/// Project-owned color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceKind {
    /// The configured type name ("King", "Rook", or a custom name).
    pub fn name(&self) -> &str {
        match self {
            Self::Pawn => "Pawn",
            Self::Knight => "Knight",
            Self::Bishop => "Bishop",
            Self::Rook => "Rook",
            Self::Queen => "Queen",
            Self::King => "King",
            Self::Custom(name) => name,
        }
    }

    /// Single-letter board symbol. Knight is `N` so it does not clash with King.
    pub fn symbol(&self) -> char {
        match self {
            Self::Knight => 'N',
            other => other
                .name()
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('?'),
        }
    }

    pub fn to_char_upper(&self) -> char {
        self.symbol()
    }

    pub fn to_char_lower(&self) -> char {
        self.symbol().to_ascii_lowercase()
    }
}

impl From<String> for PieceKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Pawn" => Self::Pawn,
            "Knight" => Self::Knight,
            "Bishop" => Self::Bishop,
            "Rook" => Self::Rook,
            "Queen" => Self::Queen,
            "King" => Self::King,
            _ => Self::Custom(name),
        }
    }
}

impl From<&str> for PieceKind {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<PieceKind> for String {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Custom(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Display name for prompts ("White", "Black").
    pub fn title(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
