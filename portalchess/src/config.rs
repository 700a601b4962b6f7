//! Runtime tunables for the portalchess binary.
//!
//! Every value has a compile-time default and can be overridden through a
//! dedicated environment variable. A config path given on the command line
//! wins over both.

use std::path::PathBuf;

/// Game definition loaded when no path is given.
const DEFAULT_CONFIG_PATH: &str = "data/chess_pieces.json";

/// Directory receiving the daily rolling log file.
const DEFAULT_LOG_DIR: &str = "logs";

/// Prefix of the rolling log file inside the log directory.
pub const LOG_FILE_PREFIX: &str = "portalchess";

/// Get the game definition path.
///
/// Priority:
/// 1. `PORTALCHESS_CONFIG_PATH` env variable if set
/// 2. `data/chess_pieces.json` as fallback
pub fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PORTALCHESS_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_CONFIG_PATH)
}

/// Get the log directory.
///
/// Priority:
/// 1. `PORTALCHESS_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PORTALCHESS_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_path() {
        let path = get_config_path();
        match std::env::var("PORTALCHESS_CONFIG_PATH") {
            Ok(val) => assert_eq!(path, PathBuf::from(val)),
            Err(_) => assert_eq!(path, PathBuf::from(DEFAULT_CONFIG_PATH)),
        }
    }

    #[test]
    fn test_get_log_dir() {
        let dir = get_log_dir();
        match std::env::var("PORTALCHESS_LOG_DIR") {
            Ok(val) => assert_eq!(dir, PathBuf::from(val)),
            Err(_) => assert_eq!(dir, PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }

    #[test]
    fn test_default_config_path_points_at_bundled_file() {
        let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join(DEFAULT_CONFIG_PATH);
        assert!(bundled.exists());
    }
}
