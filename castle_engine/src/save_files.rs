//! Save-game discovery and serialization helpers.
//!
//! A save is one RON file holding a [`SaveGame`]: a schema number plus a full
//! [`CastleWorld`] snapshot. Files are named `<slot>-castle-<engine version>.ron`
//! and live in the configured save directory.

use crate::{CASTLE_VERSION, CastleWorld};
use anyhow::{Context, Result};
use log::{info, warn};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Bumped whenever a persisted field is added, removed, or changes meaning.
pub const SAVE_SCHEMA_VERSION: u32 = 1;
const FILE_TAG: &str = "-castle-";

/// Everything written to disk for one save slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub schema: u32,
    pub world: CastleWorld,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub file_name: String,
    pub modified: Option<SystemTime>,
}

/// Ways saving or loading can fail. None of them touch the live game.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved game found for slot '{0}'")]
    NotFound(String),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("could not serialize game state: {0}")]
    Serialize(String),
    #[error("save uses schema v{found}, this engine reads v{expected}")]
    Schema { found: u32, expected: u32 },
}

/// Normalize a user-provided slot name into a filesystem-safe token.
pub fn sanitize_slot(raw: &str) -> String {
    let mut slot = String::new();
    let mut pending_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slot.is_empty() {
                slot.push('-');
            }
            slot.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else if ch == '_' {
            if !slot.is_empty() {
                slot.push(ch);
            }
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    let trimmed = slot.trim_matches(&['-', '_'][..]).to_string();
    if trimmed.is_empty() { "savegame".to_string() } else { trimmed }
}

/// Path the current engine writes `slot` to.
pub fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{}{FILE_TAG}{CASTLE_VERSION}.ron", sanitize_slot(slot)))
}

/// Write a snapshot of `world` into `slot`, replacing any save from this engine version.
///
/// # Errors
/// Returns an error if the directory or file can't be written or serialization fails.
pub fn write_save(dir: &Path, slot: &str, world: &CastleWorld) -> Result<PathBuf, SaveError> {
    fs::create_dir_all(dir).map_err(|source| SaveError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let save = SaveGame {
        schema: SAVE_SCHEMA_VERSION,
        world: world.clone(),
    };
    let ron = ron::ser::to_string_pretty(&save, PrettyConfig::default())
        .map_err(|err| SaveError::Serialize(err.to_string()))?;
    let path = save_path(dir, slot);
    fs::write(&path, ron).map_err(|source| SaveError::Io {
        path: path.clone(),
        source,
    })?;
    info!("game saved to '{}'", path.display());
    Ok(path)
}

/// Read the save for `slot`, preferring one written by this engine version and
/// otherwise taking the most recently modified.
///
/// # Errors
/// - `NotFound` if there is no file for the slot
/// - `Io` / `Parse` / `Schema` if the file exists but can't be used
pub fn read_save(dir: &Path, slot: &str) -> Result<(CastleWorld, PathBuf), SaveError> {
    let wanted = sanitize_slot(slot);
    let slots = collect_save_slots(dir).map_err(|err| SaveError::Io {
        path: dir.to_path_buf(),
        source: io::Error::other(err.to_string()),
    })?;
    let mut candidates: Vec<SaveSlot> = slots.into_iter().filter(|s| s.slot == wanted).collect();
    candidates.sort_by(|a, b| {
        (a.version == CASTLE_VERSION)
            .cmp(&(b.version == CASTLE_VERSION))
            .then(a.modified.cmp(&b.modified))
    });
    let Some(chosen) = candidates.pop() else {
        return Err(SaveError::NotFound(wanted));
    };
    let world = load_save_file(&chosen.path)?;
    Ok((world, chosen.path))
}

/// Load a save file from disk and return its world state.
///
/// # Errors
/// Returns an error if the file cannot be read or deserialized, or has an unknown schema.
pub fn load_save_file(path: &Path) -> Result<CastleWorld, SaveError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            SaveError::NotFound(path.display().to_string())
        } else {
            SaveError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let save = ron::from_str::<SaveGame>(&raw).map_err(|err| SaveError::Parse {
        path: path.to_path_buf(),
        message: trim_error(&err),
    })?;
    if save.schema != SAVE_SCHEMA_VERSION {
        return Err(SaveError::Schema {
            found: save.schema,
            expected: SAVE_SCHEMA_VERSION,
        });
    }
    if save.world.version != CASTLE_VERSION {
        warn!(
            "save '{}' written by v{}, current version is v{CASTLE_VERSION}",
            path.display(),
            save.world.version
        );
    }
    Ok(save.world)
}

/// Discover save slot files stored in `dir`.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        if let Some(slot) = slot_from_entry(&entry) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot).then(a.version.cmp(&b.version)));
    Ok(slots)
}

fn slot_from_entry(entry: &fs::DirEntry) -> Option<SaveSlot> {
    let path = entry.path();
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
        return None;
    }
    let file_name = path.file_name().and_then(|name| name.to_str())?.to_string();
    let stem = path.file_stem().and_then(|stem| stem.to_str())?;
    let (slot, version) = stem.rsplit_once(FILE_TAG)?;
    if slot.is_empty() {
        return None;
    }
    let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
    Some(SaveSlot {
        slot: slot.to_string(),
        version: version.to_string(),
        path,
        file_name,
        modified,
    })
}

/// Clamp verbose error messages to a readable length.
fn trim_error(err: &impl ToString) -> String {
    let message = err.to_string();
    if message.chars().count() <= 120 {
        return message;
    }
    let mut trimmed: String = message.chars().take(117).collect();
    trimmed.push_str("...");
    trimmed
}
