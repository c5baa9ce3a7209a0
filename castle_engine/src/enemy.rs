//! Enemy module
//!
//! Scripted foes. Each room holds at most one; a defeated enemy is removed from its room.
use crate::health::LivingEntity;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub health: i32,
    /// Damage dealt to the player on each round the enemy survives.
    pub attack: i32,
    pub description: String,
}
impl Enemy {
    pub fn new(name: impl Into<String>, health: i32, attack: i32, description: impl Into<String>) -> Enemy {
        Enemy {
            name: name.into(),
            health,
            attack,
            description: description.into(),
        }
    }
}
impl LivingEntity for Enemy {
    fn name(&self) -> &str {
        &self.name
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
