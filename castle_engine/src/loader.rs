//! Loader utilities for building a `CastleWorld` from the embedded world file.
//!
//! The castle layout lives in `data/castle.toml`, compiled into the binary. Raw
//! records are deserialized first, then checked for dangling references and
//! converted to runtime types.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;

use crate::npc::{Npc, NpcState};
use crate::room::{Exits, Riddle};
use crate::world::{MAIN_QUEST, SIDE_QUEST};
use crate::{CastleWorld, Enemy, Item, Quest, Room};

const CASTLE_TOML: &str = include_str!("../data/castle.toml");

/// Raw world file contents.
#[derive(Debug, Deserialize)]
pub struct RawWorld {
    start: String,
    rooms: Vec<RawRoom>,
    #[serde(default)]
    quests: Vec<Quest>,
}

/// Raw room data loaded from file. Exits keep the order they are written in.
#[derive(Debug, Deserialize)]
pub struct RawRoom {
    id: String,
    name: String,
    description: String,
    #[serde(default)]
    exits: Exits,
    #[serde(default)]
    hidden_exits: Exits,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    enemy: Option<Enemy>,
    #[serde(default)]
    npc: Option<RawNpc>,
    #[serde(default)]
    locked: bool,
    #[serde(default)]
    riddle: Option<Riddle>,
}

#[derive(Debug, Deserialize)]
pub struct RawNpc {
    name: String,
    description: String,
    presence: String,
    quest: String,
    offering: String,
    waiting: String,
    spurned: String,
}

impl RawRoom {
    /// Converts `RawRoom` to a `Room`.
    pub fn to_room(&self) -> Room {
        let npc = self.npc.as_ref().map(|raw| Npc {
            name: raw.name.clone(),
            description: raw.description.clone(),
            presence: raw.presence.clone(),
            quest: raw.quest.clone(),
            dialogue: HashMap::from([
                (NpcState::Offering, raw.offering.clone()),
                (NpcState::Waiting, raw.waiting.clone()),
                (NpcState::Spurned, raw.spurned.clone()),
            ]),
        });
        Room {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            exits: self.exits.clone(),
            hidden_exits: self.hidden_exits.clone(),
            items: self.items.clone(),
            enemy: self.enemy.clone(),
            npc,
            locked: self.locked,
            riddle: self.riddle.clone(),
        }
    }
}

/// Load the castle from the world file compiled into the binary.
///
/// # Errors
/// Errors bubble up from deserialization or dangling references in the data.
pub fn load_world() -> Result<CastleWorld> {
    load_world_from_str(CASTLE_TOML).context("while loading embedded castle.toml")
}

/// Build a world from TOML source text.
///
/// # Errors
/// - on TOML parse errors, bad direction words, or references to missing rooms/quests
pub fn load_world_from_str(source: &str) -> Result<CastleWorld> {
    let raw: RawWorld = toml::from_str(source).context("parsing world data")?;
    validate_raw_world(&raw)?;

    let mut world = CastleWorld::new_empty();
    for raw_room in &raw.rooms {
        let room = raw_room.to_room();
        world.rooms.insert(room.id.clone(), room);
    }
    for quest in raw.quests {
        world.quests.insert(quest.id.clone(), quest);
    }
    world.current_room = raw.start;
    world.turn_count = 1;

    info!("{} rooms added to CastleWorld", world.rooms.len());
    info!(
        "{} items placed in CastleWorld",
        world.rooms.values().map(|room| room.items.len()).sum::<usize>()
    );
    info!(
        "{} enemies placed in CastleWorld",
        world.rooms.values().filter(|room| room.enemy.is_some()).count()
    );
    info!("{} quests added to CastleWorld", world.quests.len());
    info!("player starts in ({})", world.current_room);
    Ok(world)
}

/// Check all cross references and return a single aggregated error.
fn validate_raw_world(raw: &RawWorld) -> Result<()> {
    let mut errors = Vec::new();
    let room_ids: Vec<&str> = raw.rooms.iter().map(|room| room.id.as_str()).collect();
    let quest_ids: Vec<&str> = raw.quests.iter().map(|quest| quest.id.as_str()).collect();

    if !room_ids.contains(&raw.start.as_str()) {
        errors.push(format!("start room ({}) does not exist", raw.start));
    }
    for (idx, id) in room_ids.iter().enumerate() {
        if room_ids[..idx].contains(id) {
            errors.push(format!("room id ({id}) defined more than once"));
        }
    }
    for room in &raw.rooms {
        for to in room.exits.values().chain(room.hidden_exits.values()) {
            if !room_ids.contains(&to.as_str()) {
                errors.push(format!("exit from ({}) leads to missing room ({to})", room.id));
            }
        }
        if room.riddle.is_some() && !room.locked {
            errors.push(format!("room ({}) has a riddle but is not locked", room.id));
        }
        if let Some(npc) = &room.npc
            && !quest_ids.contains(&npc.quest.as_str())
        {
            errors.push(format!("npc ({}) offers missing quest ({})", npc.name, npc.quest));
        }
    }
    for required in [MAIN_QUEST, SIDE_QUEST] {
        if !quest_ids.contains(&required) {
            errors.push(format!("required quest ({required}) is not defined"));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("world validation failed:\n{details}");
}
