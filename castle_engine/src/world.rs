//! Data structures representing the game world.
//!
//! This module defines [`CastleWorld`], the complete mutable state of a running game:
//! the room graph with everything placed in it, the player, both quests, and the
//! few pointers and flags the command handlers steer by. A save file is a snapshot
//! of exactly this struct.

use crate::quest::{PlayerChoice, Quest};
use crate::{CASTLE_VERSION, Id, Player, Room};

use anyhow::{Result, anyhow};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use variantly::Variantly;

/// Quest handed out with `accept quest`.
pub const MAIN_QUEST: &str = "crown";
/// Quest offered by the stranger.
pub const SIDE_QUEST: &str = "lamp";
/// Holding this in the victory room wins the game.
pub const VICTORY_ITEM: &str = "golden apple";
pub const VICTORY_ROOM_NAME: &str = "Tower";
/// Holding this lets the player open any locked room that has no riddle.
pub const KEY_ITEM: &str = "key";
/// Consumed when used.
pub const HEALTH_POTION: &str = "health potion";
/// Dropping this takes back the attack bonus it gave on pickup.
pub const AMULET: &str = "mysterious amulet";
pub const AMULET_BONUS: i32 = 10;

/// The terminal outcomes of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ending {
    Victory,
    Death,
    BadEnding,
    SecretEnding,
}
impl Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ending::Victory => write!(f, "Victory"),
            Ending::Death => write!(f, "Death"),
            Ending::BadEnding => write!(f, "Bad Ending"),
            Ending::SecretEnding => write!(f, "Secret Ending"),
        }
    }
}

/// Whether the game is still accepting commands.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Running,
    Over(Ending),
}

/// A question the game is waiting on. While one is pending, the next input line
/// answers it instead of being parsed as a command.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum PendingPrompt {
    /// Answer the riddle to enter the room with this id.
    Riddle { room: Id },
    /// `attack` or `run`.
    Combat,
    /// Yes or no to the stranger's request.
    StrangerOffer,
    /// Yes or no to starting over after an ending.
    PlayAgain,
}
impl PendingPrompt {
    /// The prompt shown to the player while waiting for an answer.
    pub fn text(&self) -> &'static str {
        match self {
            PendingPrompt::Riddle { .. } => "Your answer: ",
            PendingPrompt::Combat => "Do you want to 'attack' or 'run'? ",
            PendingPrompt::StrangerOffer => "Will you help the stranger? (yes/no) ",
            PendingPrompt::PlayAgain => "Play again? (yes/no) ",
        }
    }
}

/// Complete state of the running game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleWorld {
    pub rooms: HashMap<Id, Room>,
    pub player: Player,
    pub current_room: Id,
    /// Where `run` takes the player during a fight.
    pub previous_room: Option<Id>,
    pub quests: BTreeMap<Id, Quest>,
    pub player_choice: PlayerChoice,
    pub status: GameStatus,
    pub turn_count: usize,
    pub version: String,
    #[serde(skip)]
    pub pending: Option<PendingPrompt>,
}
impl Default for CastleWorld {
    fn default() -> Self {
        Self::new_empty()
    }
}
impl CastleWorld {
    /// Create a new empty world with a default player.
    pub fn new_empty() -> CastleWorld {
        let world = Self {
            rooms: HashMap::new(),
            player: Player::default(),
            current_room: Id::new(),
            previous_room: None,
            quests: BTreeMap::new(),
            player_choice: PlayerChoice::Unset,
            status: GameStatus::Running,
            turn_count: 0,
            version: CASTLE_VERSION.to_string(),
            pending: None,
        };
        info!("new, empty 'CastleWorld' created");
        world
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Obtain a reference to a room by id.
    /// # Errors
    /// - if the id is not in the room graph
    pub fn room_ref(&self, room_id: &str) -> Result<&Room> {
        self.rooms
            .get(room_id)
            .ok_or_else(|| anyhow!("room id ({room_id}) not found in world"))
    }

    /// Obtain a mutable reference to a room by id.
    /// # Errors
    /// - if the id is not in the room graph
    pub fn room_mut(&mut self, room_id: &str) -> Result<&mut Room> {
        self.rooms
            .get_mut(room_id)
            .ok_or_else(|| anyhow!("room id ({room_id}) not found in world"))
    }

    /// Obtain a reference to the room the player occupies.
    /// # Errors
    /// - if the player's room id is not found
    pub fn player_room_ref(&self) -> Result<&Room> {
        self.room_ref(&self.current_room)
    }

    /// Obtain a mutable reference to the room the player occupies.
    /// # Errors
    /// - if the player's room id is not found
    pub fn player_room_mut(&mut self) -> Result<&mut Room> {
        let room_id = self.current_room.clone();
        self.room_mut(&room_id)
    }

    /// Put the player in a new room, remembering where they came from.
    pub fn move_player_to(&mut self, room_id: &str) {
        self.previous_room = Some(std::mem::replace(&mut self.current_room, room_id.to_string()));
    }

    /// Look up a quest by id.
    /// # Errors
    /// - if the quest isn't defined in this world
    pub fn quest(&self, quest_id: &str) -> Result<&Quest> {
        self.quests
            .get(quest_id)
            .ok_or_else(|| anyhow!("quest ({quest_id}) not found in world"))
    }

    /// Look up a quest by id for modification.
    /// # Errors
    /// - if the quest isn't defined in this world
    pub fn quest_mut(&mut self, quest_id: &str) -> Result<&mut Quest> {
        self.quests
            .get_mut(quest_id)
            .ok_or_else(|| anyhow!("quest ({quest_id}) not found in world"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_room_world() -> CastleWorld {
        let mut world = CastleWorld::new_empty();
        world.rooms.insert("a".into(), Room::new("a", "A", "Room A"));
        world.rooms.insert("b".into(), Room::new("b", "B", "Room B"));
        world.current_room = "a".into();
        world
    }

    #[test]
    fn move_records_previous_room() {
        let mut world = two_room_world();
        world.move_player_to("b");
        assert_eq!(world.current_room, "b");
        assert_eq!(world.previous_room.as_deref(), Some("a"));
        assert_eq!(world.player_room_ref().unwrap().name, "B");
    }

    #[test]
    fn missing_room_is_an_error() {
        let mut world = two_room_world();
        world.current_room = "nowhere".into();
        assert!(world.player_room_ref().is_err());
        assert!(world.quest(MAIN_QUEST).is_err());
    }

    #[test]
    fn prompts_have_text() {
        assert!(PendingPrompt::Combat.text().contains("attack"));
        assert!(PendingPrompt::Riddle { room: "x".into() }.text().contains("answer"));
    }
}
