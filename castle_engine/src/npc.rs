//! NPC Module

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

use crate::Id;

/// Where an NPC stands with the player, which selects what they say when spoken to.
#[derive(Copy, Clone, Debug, variantly::Variantly, PartialEq, Hash, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NpcState {
    /// Has a favor to ask and hasn't had an answer yet.
    Offering,
    /// The player agreed to help.
    Waiting,
    /// The player turned them down.
    Spurned,
}
impl Display for NpcState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NpcState::Offering => write!(f, "Offering"),
            NpcState::Waiting => write!(f, "Waiting"),
            NpcState::Spurned => write!(f, "Spurned"),
        }
    }
}

/// A non-playable character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub description: String,
    /// Line shown in the room listing while the NPC is present.
    pub presence: String,
    /// The quest this NPC hands out when spoken to.
    pub quest: Id,
    #[serde(default)]
    pub dialogue: HashMap<NpcState, String>,
}
impl Npc {
    /// Returns the line of dialogue for the given state.
    pub fn dialogue_for(&self, state: NpcState) -> String {
        if let Some(line) = self.dialogue.get(&state) {
            line.clone()
        } else {
            warn!("Npc {}: no dialogue for state {state}", self.name);
            "The figure says nothing.".to_string()
        }
    }
}
