#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const CASTLE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifier used for rooms and quests in world data.
pub type Id = String;

// Core modules
pub mod command;
pub mod config;
pub mod enemy;
pub mod health;
pub mod item;
pub mod loader;
pub mod npc;
pub mod player;
pub mod quest;
pub mod repl;
pub mod room;
pub mod save_files;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use config::GameConfig;
pub use enemy::Enemy;
pub use item::{Item, ItemEffect, ItemHolder};
pub use loader::load_world;
pub use player::Player;
pub use quest::Quest;
pub use repl::{ReplControl, handle_input, run_repl};
pub use room::{Direction, Exits, Room};
pub use view::{View, ViewItem};
pub use world::{CastleWorld, Ending, GameStatus, PendingPrompt};
