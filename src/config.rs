//! Configuration loading and management
//!
//! Handles parsing of `.nexusflow.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".nexusflow.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Board configuration
    #[serde(default)]
    pub board: BoardConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Data directory override
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Board-related configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfig {
    /// Show the blocked column on the board and allow moves into it
    #[serde(default)]
    pub show_blocked: bool,
}

impl Config {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path());
        assert!(cfg.storage.dir.is_none());
        assert!(!cfg.board.show_blocked);
    }

    #[test]
    fn load_from_dir_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[storage]\ndir = \"/tmp/nexusflow\"\n\n[board]\nshow_blocked = true\n",
        )
        .expect("write config");

        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.storage.dir.as_deref(), Some(Path::new("/tmp/nexusflow")));
        assert!(cfg.board.show_blocked);
    }

    #[test]
    fn load_from_dir_defaults_on_parse_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "[storage\nbroken").expect("write config");

        let cfg = Config::load_from_dir(dir.path());
        assert!(cfg.storage.dir.is_none());
    }

    #[test]
    fn empty_sections_are_fine() {
        let cfg: Config = toml::from_str("").expect("parse empty");
        assert!(!cfg.board.show_blocked);
    }
}
