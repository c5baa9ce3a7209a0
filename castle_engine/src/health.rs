//! Health Module
//!
//! Liveness for anything that can take damage in a fight.
use serde::{Deserialize, Serialize};

/// Common behavior for the player and enemies.
///
/// Health is signed: the player can be pushed below zero by a final blow, and potions
/// can raise it above its starting value.
pub trait LivingEntity {
    fn name(&self) -> &str;
    fn health(&self) -> i32;
    fn damage(&mut self, amount: i32);
    fn heal(&mut self, amount: i32);

    /// Return whether this entity is alive or dead.
    fn life_state(&self) -> LifeState {
        if self.health() > 0 { LifeState::Alive } else { LifeState::Dead }
    }

    fn is_alive(&self) -> bool {
        self.life_state() == LifeState::Alive
    }
}

/// Possible life states for living entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(i32);
    impl LivingEntity for Dummy {
        fn name(&self) -> &str {
            "dummy"
        }
        fn health(&self) -> i32 {
            self.0
        }
        fn damage(&mut self, amount: i32) {
            self.0 -= amount;
        }
        fn heal(&mut self, amount: i32) {
            self.0 += amount;
        }
    }

    #[test]
    fn zero_health_is_dead() {
        let mut d = Dummy(10);
        assert!(d.is_alive());
        d.damage(10);
        assert_eq!(d.life_state(), LifeState::Dead);
        d.damage(5);
        assert_eq!(d.health(), -5);
        assert!(!d.is_alive());
    }
}
