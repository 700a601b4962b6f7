//! Portal Chess terminal driver.
//!
//! Loads a game definition (see [`config`] for where it is looked up), prints
//! a summary of its pieces and portals, then runs the interactive turn loop on
//! stdin/stdout. Logs go to a daily rolling file so the terminal stays
//! reserved for the game.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use portalchess_core::{Game, GameConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod render;
mod session;
mod summary;

/// Command-line arguments for portalchess.
#[derive(Parser)]
#[command(name = "portalchess", about = "Configurable chess with portals", version)]
struct Cli {
    /// Game definition (JSON). Defaults to `PORTALCHESS_CONFIG_PATH` or the
    /// bundled `data/chess_pieces.json`.
    config: Option<PathBuf>,
}

/// Error type for driver failures outside the game itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The log directory could not be created.
    #[error("failed to create log directory {}: {source}", .path.display())]
    LogDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Install a file-backed subscriber. The returned guard flushes on drop.
fn init_tracing(log_dir: &Path) -> Result<WorkerGuard, CliError> {
    std::fs::create_dir_all(log_dir).map_err(|source| CliError::LogDir {
        path: log_dir.to_path_buf(),
        source,
    })?;
    let file_appender = tracing_appender::rolling::daily(log_dir, config::LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = init_tracing(&config::get_log_dir())?;
    tracing::info!("Portal Chess starting up");

    let path = cli.config.unwrap_or_else(config::get_config_path);
    let game_config = GameConfig::load(&path)
        .with_context(|| format!("failed to load game configuration from {}", path.display()))?;

    let stdout = io::stdout();
    let colour = stdout.is_terminal();
    let mut out = stdout.lock();
    summary::write_summary(&mut out, &game_config)?;

    let mut game = Game::new(&game_config);
    let outcome = session::run(&mut game, io::stdin().lock(), &mut out, colour)?;

    tracing::info!(?outcome, turns = game.turn_count(), "Portal Chess shutting down");
    Ok(())
}
