//! Item types and related helpers.
//!
//! Items are plain data owned by whoever holds them: a room's floor or the player's
//! pack. Moving an item moves the value. What an item *does* is described by an
//! [`ItemEffect`] and carried out by [`apply_effect`], so items never need to know
//! about the rest of the game.

use crate::health::LivingEntity;
use crate::player::Player;

use log::info;
use serde::{Deserialize, Serialize};
use variantly::Variantly;

/// Anything in the castle that can be picked up, dropped, or used.
///
/// `name` is the lookup key: commands match it exactly (after lowercasing input).
/// `effect_text` is the flavor line shown before the effect's own message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
    #[serde(default)]
    pub effect_text: Option<String>,
}
impl Item {
    /// Create an item with no effect.
    pub fn new(name: impl Into<String>, description: impl Into<String>, weight: u32) -> Item {
        Item {
            name: name.into(),
            description: description.into(),
            weight,
            effect: None,
            effect_text: None,
        }
    }

    /// Builder-style helper to attach an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: ItemEffect) -> Item {
        self.effect = Some(effect);
        self
    }

    /// Trigger this item's effect on the player, if it has one.
    ///
    /// Returns the lines to show the player (empty if the item is inert).
    pub fn use_on(&self, player: &mut Player) -> Vec<String> {
        let Some(effect) = self.effect else {
            return Vec::new();
        };
        let mut lines = Vec::new();
        if let Some(text) = &self.effect_text {
            lines.push(text.clone());
        }
        lines.push(apply_effect(effect, player));
        info!("effect of '{}' applied ({effect:?})", self.name);
        lines
    }
}

/// The things an item can do to the player when used.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Variantly)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemEffect {
    Heal { amount: i32 },
    AttackBoost { amount: i32 },
}

/// Apply an effect to the player and describe the result.
pub fn apply_effect(effect: ItemEffect, player: &mut Player) -> String {
    match effect {
        ItemEffect::Heal { amount } => {
            player.heal(amount);
            format!(
                "You recover {amount} health points. Your health is now {}.",
                player.health()
            )
        },
        ItemEffect::AttackBoost { amount } => {
            player.attack += amount;
            format!("Your attack increases by {amount}!")
        },
    }
}

/// Anything that holds an ordered collection of items, looked up by exact name.
///
/// Insertion order is display order.
pub trait ItemHolder {
    fn items(&self) -> &[Item];
    fn items_mut(&mut self) -> &mut Vec<Item>;

    /// Append an item to the holder's contents.
    fn add_item(&mut self, item: Item) {
        self.items_mut().push(item);
    }

    /// Remove and return the first item with a matching name.
    fn remove_item(&mut self, name: &str) -> Option<Item> {
        let idx = self.items().iter().position(|item| item.name == name)?;
        Some(self.items_mut().remove(idx))
    }

    /// Find the first item with a matching name.
    fn find_item(&self, name: &str) -> Option<&Item> {
        self.items().iter().find(|item| item.name == name)
    }

    /// Return `true` when the holder has an item with this name.
    fn contains_item(&self, name: &str) -> bool {
        self.find_item(name).is_some()
    }
}
