//! Human-readable description of a loaded game definition.

use std::io::{self, Write};

use portalchess_core::notation::format_square;
use portalchess_core::{GameConfig, MovementRules, PieceColor, PortalConfig};

fn describe_movement(rules: &MovementRules) -> String {
    let mut parts = Vec::new();
    if rules.allows_forward() {
        parts.push(format!("forward {}", rules.forward));
    }
    if rules.allows_sideways() {
        parts.push(format!("sideways {}", rules.sideways));
    }
    if rules.allows_diagonal() {
        parts.push(format!("diagonal {}", rules.diagonal));
    }
    if rules.l_shape {
        parts.push("L-shape".to_string());
    }
    if rules.allows_diagonal_capture() {
        parts.push("diagonal capture".to_string());
    }
    if rules.allows_first_move_double() {
        parts.push(format!("first move {}", rules.first_move_forward));
    }
    if parts.is_empty() {
        return "none".to_string();
    }
    parts.join(", ")
}

fn describe_portal(portal: &PortalConfig) -> String {
    let props = &portal.properties;
    let arrow = if props.two_way { "<->" } else { "->" };
    let colors = props
        .allowed_colors
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/");
    let mut text = format!(
        "{}: {} {} {} ({}, cooldown {})",
        portal.id,
        format_square(portal.positions.entry),
        arrow,
        format_square(portal.positions.exit),
        colors,
        portal.properties.cooldown,
    );
    if props.preserve_direction {
        text.push_str(", preserves direction");
    }
    text
}

/// Write the game name, settings, piece set and portals.
pub fn write_summary<W: Write>(out: &mut W, config: &GameConfig) -> io::Result<()> {
    let settings = &config.game_settings;
    writeln!(out, "{}", settings.name)?;
    writeln!(
        out,
        "Board {0}x{0}, turn limit {1}",
        settings.board_size, settings.turn_limit
    )?;

    writeln!(out, "Pieces:")?;
    for piece in config.all_pieces() {
        let placed: usize = [PieceColor::White, PieceColor::Black]
            .into_iter()
            .map(|color| piece.positions_for(color).len())
            .sum();
        writeln!(
            out,
            "  {} ({}) x{}: {}",
            piece.kind,
            piece.kind.symbol(),
            placed,
            describe_movement(&piece.movement)
        )?;
        let abilities = piece.special_abilities.enabled();
        if !abilities.is_empty() {
            writeln!(out, "    abilities: {}", abilities.join(", "))?;
        }
    }

    if !config.portals.is_empty() {
        writeln!(out, "Portals:")?;
        for portal in &config.portals {
            writeln!(out, "  {}", describe_portal(portal))?;
        }
    }
    writeln!(out)
}
