//! Placed pieces and their data-driven capabilities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{PieceColor, PieceKind};

/// Movement capabilities loaded from configuration.
///
/// Each count is the furthest a piece may slide in that direction; zero
/// disables it. `first_move_forward` and `diagonal_capture` only act as
/// switches for the pawn rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementRules {
    pub forward: u32,
    pub sideways: u32,
    pub diagonal: u32,
    pub l_shape: bool,
    pub diagonal_capture: u32,
    pub first_move_forward: u32,
}

impl MovementRules {
    pub fn allows_forward(&self) -> bool {
        self.forward > 0
    }

    pub fn allows_sideways(&self) -> bool {
        self.sideways > 0
    }

    pub fn allows_diagonal(&self) -> bool {
        self.diagonal > 0
    }

    pub fn allows_diagonal_capture(&self) -> bool {
        self.diagonal_capture > 0
    }

    pub fn allows_first_move_double(&self) -> bool {
        self.first_move_forward > 0
    }
}

/// Special ability flags. Only `castling` changes how moves are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialAbilities {
    pub castling: bool,
    pub royal: bool,
    pub jump_over: bool,
    pub promotion: bool,
    pub en_passant: bool,
    pub custom_abilities: BTreeMap<String, bool>,
}

impl SpecialAbilities {
    /// Names of every enabled ability, built-in ones first.
    pub fn enabled(&self) -> Vec<&str> {
        let builtin = [
            (self.castling, "Castling"),
            (self.royal, "Royal"),
            (self.jump_over, "Jump-over"),
            (self.promotion, "Promotion"),
            (self.en_passant, "En-passant"),
        ];
        builtin
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .chain(
                self.custom_abilities
                    .iter()
                    .filter_map(|(name, on)| on.then_some(name.as_str())),
            )
            .collect()
    }
}

/// One piece standing on a board. Owned by value; boards never share pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub movement: MovementRules,
    pub abilities: SpecialAbilities,
}

impl Piece {
    pub fn new(
        kind: PieceKind,
        color: PieceColor,
        movement: MovementRules,
        abilities: SpecialAbilities,
    ) -> Self {
        Self {
            kind,
            color,
            movement,
            abilities,
        }
    }

    pub fn is_white(&self) -> bool {
        self.color == PieceColor::White
    }

    /// Symbol as rendered on the board: upper case for white, lower case for black.
    pub fn display_char(&self) -> char {
        match self.color {
            PieceColor::White => self.kind.to_char_upper(),
            PieceColor::Black => self.kind.to_char_lower(),
        }
    }
}
