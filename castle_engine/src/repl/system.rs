//! `repl::system` module
//!
//! Handlers for looking around, help, save/load, quitting and restarting.

use crate::config::GameConfig;
use crate::load_world;
use crate::repl::ReplControl;
use crate::save_files::{SaveError, collect_save_slots, read_save, sanitize_slot, write_save};
use crate::world::CastleWorld;
use crate::{View, ViewItem};

use anyhow::{Context, Result};
use log::{info, warn};

/// Describe the current room again.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn look_handler(world: &CastleWorld, view: &mut View) -> Result<()> {
    world.player_room_ref()?.show(view);
    Ok(())
}

/// Search the current room, revealing any hidden exits.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn search_handler(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    let room = world.player_room_mut()?;
    if room.search() {
        view.push(ViewItem::ActionSuccess(
            "You search the area and discover something!".to_string(),
        ));
        info!("hidden exits revealed in ({})", room.id);
    } else {
        view.push(ViewItem::ActionFailure(
            "You search the area but find nothing new.".to_string(),
        ));
    }
    room.show(view);
    Ok(())
}

pub fn help_handler(view: &mut View) {
    view.push(ViewItem::Instructions);
}

/// Save the world to `slot` (or the configured default).
///
/// A failed save is reported to the player and leaves the game running.
pub fn save_handler(world: &CastleWorld, view: &mut View, config: &GameConfig, slot: Option<&str>) {
    let slot = sanitize_slot(slot.unwrap_or(&config.default_slot));
    match write_save(&config.save_dir, &slot, world) {
        Ok(path) => {
            view.push(ViewItem::ActionSuccess("Game saved successfully.".to_string()));
            view.push(ViewItem::GameSaved {
                slot,
                file: path.display().to_string(),
            });
        },
        Err(err) => {
            warn!("save to slot '{slot}' failed: {err}");
            view.push(ViewItem::Error(format!("Could not save the game: {err}")));
        },
    }
}

/// Replace the running game with the one saved in `slot` (or the configured default).
///
/// The live game is untouched unless the save loads cleanly.
///
/// # Errors
/// - if the loaded world doesn't contain the player's room
pub fn load_handler(world: &mut CastleWorld, view: &mut View, config: &GameConfig, slot: Option<&str>) -> Result<()> {
    let slot = sanitize_slot(slot.unwrap_or(&config.default_slot));
    match read_save(&config.save_dir, &slot) {
        Ok((loaded, path)) => {
            *world = loaded;
            info!("world replaced from '{}'", path.display());
            view.push(ViewItem::ActionSuccess("Game loaded successfully.".to_string()));
            view.push(ViewItem::GameLoaded {
                slot,
                file: path.display().to_string(),
            });
            world
                .player_room_ref()
                .context("locating player in loaded game")?
                .show(view);
            view.push(ViewItem::Instructions);
        },
        Err(SaveError::NotFound(_)) => {
            view.push(ViewItem::ActionFailure("No saved game found.".to_string()));
        },
        Err(err) => {
            warn!("load of slot '{slot}' failed: {err}");
            view.push(ViewItem::Error(format!("Could not load the game: {err}")));
        },
    }
    Ok(())
}

/// List the save slots in the configured directory.
pub fn list_saves_handler(view: &mut View, config: &GameConfig) {
    match collect_save_slots(&config.save_dir) {
        Ok(slots) => view.push(ViewItem::SavedGamesList {
            directory: config.save_dir.display().to_string(),
            slots,
        }),
        Err(err) => {
            warn!("listing saves failed: {err:#}");
            view.push(ViewItem::Error(format!("Could not list saved games: {err}")));
        },
    }
}

/// Say goodbye and signal the REPL to stop.
pub fn quit_handler(world: &CastleWorld, view: &mut View) -> ReplControl {
    info!(
        "player quit on turn {} with {} health and {} items",
        world.turn_count,
        world.player.health,
        world.player.inventory.len()
    );
    view.push(ViewItem::QuitSummary {
        turns: world.turn_count,
        health: world.player.health,
        items_carried: world.player.inventory.len(),
    });
    ReplControl::Quit
}

/// Answer to "play again?" after an ending: yes rebuilds the castle from scratch,
/// anything else ends the session.
///
/// # Errors
/// - if the embedded world fails to load
pub fn play_again_handler(world: &mut CastleWorld, view: &mut View, answer: &str) -> Result<ReplControl> {
    world.pending = None;
    match answer.trim().to_lowercase().as_str() {
        "yes" | "y" => {
            *world = load_world().context("rebuilding the castle for a new game")?;
            info!("game restarted");
            view.push(ViewItem::EngineMessage("A new adventure begins...".to_string()));
            world.player_room_ref()?.show(view);
            view.push(ViewItem::Instructions);
            Ok(ReplControl::Continue)
        },
        _ => Ok(quit_handler(world, view)),
    }
}
