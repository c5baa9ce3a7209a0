//! Player -- module for the player character
use crate::health::LivingEntity;
use crate::item::{Item, ItemHolder};

use serde::{Deserialize, Serialize};

pub const START_HEALTH: i32 = 100;
pub const START_ATTACK: i32 = 15;
pub const MAX_CARRY_WEIGHT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub health: i32,
    pub attack: i32,
    pub inventory: Vec<Item>,
    pub max_weight: u32,
}
impl Default for Player {
    fn default() -> Player {
        Self {
            health: START_HEALTH,
            attack: START_ATTACK,
            inventory: Vec::new(),
            max_weight: MAX_CARRY_WEIGHT,
        }
    }
}
impl Player {
    /// Total weight of everything in the pack.
    pub fn carry_weight(&self) -> u32 {
        self.inventory.iter().map(|item| item.weight).sum()
    }

    /// Returns true if `item` fits without exceeding `max_weight`.
    pub fn can_carry(&self, item: &Item) -> bool {
        self.carry_weight() + item.weight <= self.max_weight
    }
}
impl LivingEntity for Player {
    fn name(&self) -> &str {
        "you"
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    fn heal(&mut self, amount: i32) {
        self.health += amount;
    }
}
impl ItemHolder for Player {
    fn items(&self) -> &[Item] {
        &self.inventory
    }

    fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.inventory
    }
}
