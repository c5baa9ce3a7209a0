//! module: quest
//!
//! Quests are small independent state machines: `Inactive -> Active -> Completed`.
//! The only way forward is one step at a time, and nothing ever moves a quest backward
//! short of restarting the game.

use crate::item::Item;
use crate::{Id, player::Player};

use crate::item::ItemHolder;
use serde::{Deserialize, Serialize};

/// Represents current state of the `Quest`
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestStatus {
    #[default]
    Inactive,
    Active,
    Completed,
}

/// What the player decided when the stranger asked for help.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerChoice {
    #[default]
    Unset,
    Accepted,
    Declined,
}

/// An objective for the player to achieve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: Id,
    pub description: String,
    /// Name of the item that finishes the quest when held.
    pub required_item: String,
    /// Granted on completion, ignoring carry capacity.
    #[serde(default)]
    pub reward: Option<Item>,
    #[serde(default)]
    pub status: QuestStatus,
}
impl Quest {
    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }

    /// Activate the quest. Returns false if it was already active or finished.
    pub fn accept(&mut self) -> bool {
        if self.status == QuestStatus::Inactive {
            self.status = QuestStatus::Active;
            true
        } else {
            false
        }
    }

    /// Returns true if the quest is active and the player holds the required item.
    pub fn ready_to_complete(&self, player: &Player) -> bool {
        self.is_active() && player.contains_item(&self.required_item)
    }

    /// Finish the quest: take the required item and hand over any reward.
    ///
    /// Does nothing and returns `None` unless [`Quest::ready_to_complete`] holds.
    /// On success returns the name of the reward, if there was one.
    pub fn complete(&mut self, player: &mut Player) -> Option<Option<String>> {
        if !self.ready_to_complete(player) {
            return None;
        }
        player.remove_item(&self.required_item);
        self.status = QuestStatus::Completed;
        let reward_name = self.reward.as_ref().map(|reward| reward.name.clone());
        if let Some(reward) = self.reward.clone() {
            player.add_item(reward);
        }
        Some(reward_name)
    }
}
