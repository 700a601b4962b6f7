//! Portals and their cooldown lifecycle.
//!
//! Every registered entry square maps to one exit square. A two-way portal is
//! registered as two independent one-way portals. Each entry is either
//! available or on cooldown; a traversal puts it on cooldown and the cooldown
//! queue is decremented once per completed turn.

use std::collections::{HashMap, VecDeque};

use crate::config::PortalConfig;
use crate::position::Position;
use crate::types::PieceColor;

/// Cooldown applied when a portal does not configure its own.
pub const DEFAULT_COOLDOWN_TURNS: u32 = 2;

/// A one-way portal from `entry` to `exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portal {
    pub id: String,
    pub entry: Position,
    pub exit: Position,
    pub two_way: bool,
    pub allowed_colors: Vec<PieceColor>,
    pub cooldown: u32,
}

impl Portal {
    pub fn allows(&self, color: PieceColor) -> bool {
        self.allowed_colors.contains(&color)
    }

    /// Turns this portal stays locked after a traversal.
    pub fn cooldown_turns(&self) -> u32 {
        if self.cooldown > 0 {
            self.cooldown
        } else {
            DEFAULT_COOLDOWN_TURNS
        }
    }

    fn reversed(&self) -> Self {
        Self {
            entry: self.exit,
            exit: self.entry,
            ..self.clone()
        }
    }
}

impl From<&PortalConfig> for Portal {
    fn from(config: &PortalConfig) -> Self {
        Self {
            id: config.id.clone(),
            entry: config.positions.entry,
            exit: config.positions.exit,
            two_way: config.properties.two_way,
            allowed_colors: config.properties.allowed_colors.clone(),
            cooldown: config.properties.cooldown,
        }
    }
}

/// A pending cooldown on one portal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownEntry {
    pub entry: Position,
    pub remaining_turns: u32,
}

/// Portal registry plus the FIFO cooldown queue.
#[derive(Debug, Clone, Default)]
pub struct PortalSystem {
    portals: HashMap<Position, Portal>,
    cooldowns: VecDeque<CooldownEntry>,
}

impl PortalSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configs(configs: &[PortalConfig]) -> Self {
        let mut system = Self::new();
        for config in configs {
            system.add_portal(Portal::from(config));
        }
        system
    }

    /// Register a portal; a two-way portal also registers its reverse.
    /// A later portal on the same entry replaces the earlier one.
    pub fn add_portal(&mut self, portal: Portal) {
        if portal.two_way {
            let reverse = portal.reversed();
            self.portals.insert(reverse.entry, reverse);
        }
        self.portals.insert(portal.entry, portal);
    }

    pub fn portal_at(&self, entry: Position) -> Option<&Portal> {
        self.portals.get(&entry)
    }

    /// Exit for a registered entry, or the entry itself when none is registered.
    pub fn exit_for(&self, entry: Position) -> Position {
        self.portal_at(entry).map(|p| p.exit).unwrap_or(entry)
    }

    pub fn can_use_portal(&self, pos: Position) -> bool {
        self.portals.contains_key(&pos) && !self.is_on_cooldown(pos)
    }

    /// Put an entry on cooldown for its portal's configured length.
    pub fn apply_cooldown(&mut self, entry: Position) {
        let turns = self
            .portal_at(entry)
            .map(Portal::cooldown_turns)
            .unwrap_or(DEFAULT_COOLDOWN_TURNS);
        tracing::debug!(x = entry.x, y = entry.y, turns, "Portal cooldown applied");
        self.cooldowns.push_back(CooldownEntry {
            entry,
            remaining_turns: turns,
        });
    }

    /// Advance every cooldown by one turn, dropping the expired ones while
    /// keeping arrival order.
    pub fn decrement_cooldowns(&mut self) {
        self.decrement_oldest(self.cooldowns.len());
    }

    /// Like [`Self::decrement_cooldowns`], but only the `count` oldest
    /// entries advance. Newer entries are left untouched.
    pub fn decrement_oldest(&mut self, count: usize) {
        let mut index = 0;
        self.cooldowns.retain_mut(|cooldown| {
            index += 1;
            if index > count {
                return true;
            }
            cooldown.remaining_turns = cooldown.remaining_turns.saturating_sub(1);
            if cooldown.remaining_turns == 0 {
                tracing::debug!(
                    x = cooldown.entry.x,
                    y = cooldown.entry.y,
                    "Portal cooldown expired"
                );
            }
            cooldown.remaining_turns > 0
        });
    }

    pub fn is_on_cooldown(&self, pos: Position) -> bool {
        self.cooldowns.iter().any(|c| c.entry == pos)
    }

    pub fn cooldowns(&self) -> &VecDeque<CooldownEntry> {
        &self.cooldowns
    }

    pub(crate) fn restore_cooldowns(&mut self, cooldowns: VecDeque<CooldownEntry>) {
        self.cooldowns = cooldowns;
    }

    /// Registered portals ordered by entry square.
    pub fn portals(&self) -> Vec<&Portal> {
        let mut portals: Vec<&Portal> = self.portals.values().collect();
        portals.sort_by_key(|p| (p.entry.y, p.entry.x));
        portals
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }
}
