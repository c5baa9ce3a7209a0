//! Engine configuration.
//!
//! Settings come from an optional TOML file (`castle.toml` in the working directory, or
//! whatever `CASTLE_CONFIG` points at). Every key is optional; a missing file means defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "castle.toml";
pub const CONFIG_ENV_VAR: &str = "CASTLE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory that holds save slots.
    pub save_dir: PathBuf,
    /// Slot used by bare `save` / `load`.
    pub default_slot: String,
    /// Show the instruction block after every command.
    pub repeat_instructions: bool,
    /// Keep line-editor history between sessions.
    pub history: bool,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saved_games"),
            default_slot: "savegame".to_string(),
            repeat_instructions: false,
            history: true,
        }
    }
}

impl GameConfig {
    /// Load configuration from the file named by `CASTLE_CONFIG`, else `castle.toml`.
    ///
    /// # Errors
    /// - if the file exists but can't be read or parsed
    pub fn load() -> Result<GameConfig> {
        let path = env::var_os(CONFIG_ENV_VAR).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    ///
    /// # Errors
    /// - on file IO error (other than not found) or TOML parsing error
    pub fn load_from(path: &Path) -> Result<GameConfig> {
        if !path.exists() {
            info!("no config at '{}', using defaults", path.display());
            return Ok(GameConfig::default());
        }
        let raw = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
        let config: GameConfig =
            toml::from_str(&raw).with_context(|| format!("parsing config from '{}'", path.display()))?;
        info!("config loaded from '{}': {config:?}", path.display());
        Ok(config)
    }
}
