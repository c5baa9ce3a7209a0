//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each handler, handlers push [`ViewItem`]s
//! and the REPL renders them once the input line has been fully processed.
//! Items are rendered in the order they were pushed.
use colored::Colorize;
use textwrap::{fill, termwidth};
use variantly::Variantly;

use crate::room::Direction;
use crate::save_files::SaveSlot;
use crate::style::{GameStyle, indented_block, normal_block};
use crate::world::Ending;

const ICON_SUCCESS: &str = "\u{2611}"; // ✔
const ICON_FAILURE: &str = "\u{274C}"; // ✖
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_COMBAT: &str = "⚔";
const ICON_HARMED: &str = "\u{2623}"; // biohazard sign
const ICON_HEALED: &str = "\u{2624}"; // caduceus
const ICON_QUEST: &str = "✧";
const ICON_ENGINE: &str = "⚙";
const ICON_DEATH: &str = "☠";
const ICON_CELEBRATE: &str = "🎉"; // U+1F389

/// The command summary shown at start, on `help` / `instructions`, and optionally every turn.
pub const INSTRUCTIONS: &str = "You can:\n\
- Move: 'north', 'south', 'east', 'west', 'up', 'down'\n\
- Interact: 'get [item]', 'drop [item]', 'use [item]', 'talk'\n\
- Other actions: 'search', 'look', 'inventory', 'save', 'load', 'saves', 'accept quest', 'complete quest'\n\
- Quit: type 'quit' or 'exit'";

/// View aggregates information to be displayed for one processed input line.
#[derive(Debug, Clone)]
pub struct View {
    pub width: usize,
    pub items: Vec<ViewEntry>,
    pub sequence: usize,
}
impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    /// Create a new empty view.
    pub fn new() -> Self {
        Self {
            width: termwidth(),
            items: Vec::new(),
            sequence: 0,
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(ViewEntry {
            section: item.section(),
            view_item: item,
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    /// Returns true if any pending entry matches the predicate. Mostly useful in tests.
    pub fn contains(&self, pred: impl Fn(&ViewItem) -> bool) -> bool {
        self.items.iter().any(|entry| pred(&entry.view_item))
    }

    /// All plain-text lines pending in this frame, in push order.
    pub fn lines(&self) -> Vec<String> {
        self.items.iter().flat_map(|entry| entry.view_item.plain_lines()).collect()
    }

    /// Compose and display everything pushed since the last flush.
    pub fn flush(&mut self) {
        // re-check terminal width in case it's been resized
        self.width = termwidth();

        let mut last_section: Option<Section> = None;
        for entry in &self.items {
            if last_section != Some(entry.section) {
                if last_section.is_some() {
                    println!();
                }
                println!("{:.>width$}", entry.section.label().section_style(), width = self.width);
                last_section = Some(entry.section);
            }
            render(&entry.view_item);
        }

        // clear the buffer for the next turn
        self.items.clear();
        println!();
    }
}

/// Display a single item.
fn render(item: &ViewItem) {
    match item {
        ViewItem::RoomDescription { name, description } => {
            println!("{}", format!("You are in the {name}.").room_titlebar_style());
            println!("{}", fill(description, normal_block()).description_style());
        },
        ViewItem::RoomItems(lines) => {
            println!("You see the following items:");
            for line in lines {
                println!("- {}: {}", line.name.item_style(), line.description);
            }
        },
        ViewItem::RoomExits(dirs) => {
            let dirs: Vec<&str> = dirs.iter().map(|dir| dir.as_str()).collect();
            println!("Exits: {}", dirs.join(", ").exit_style());
        },
        ViewItem::RoomEnemy { name, description } => {
            println!("A {} is here! {description}", name.enemy_style());
        },
        ViewItem::RoomNpc(presence) => {
            println!("{}", fill(presence, normal_block()).npc_style());
        },
        ViewItem::ActionSuccess(msg) => {
            println!("{:<4}{}", ICON_SUCCESS.green(), fill(msg, normal_block()));
        },
        ViewItem::ActionFailure(msg) => {
            println!("{:<4}{}", ICON_FAILURE.red(), fill(msg, normal_block()).denied_style());
        },
        ViewItem::Error(msg) => {
            println!("{:<4}{}", ICON_ERROR.yellow(), msg.error_style());
        },
        ViewItem::ItemEffect(msg) => {
            println!("{:<4}{}", ICON_HEALED.bright_green(), fill(msg, normal_block()).triggered_style());
        },
        ViewItem::Inventory {
            health,
            attack,
            items,
            total_weight,
            max_weight,
        } => {
            println!("Your health: {health}");
            println!("Your attack: {attack}");
            if items.is_empty() {
                println!("{}", "Your inventory is empty.".italic().dimmed());
            } else {
                println!("{}", "You are carrying:".subheading_style());
                for line in items {
                    println!("- {} (Weight: {})", line.name.item_style(), line.weight);
                }
                println!("Total carry weight: {total_weight}/{max_weight}");
            }
        },
        ViewItem::Riddle(question) => {
            println!("{}", fill(question, normal_block()).triggered_style());
        },
        ViewItem::NpcSpeech { speaker, quote } => {
            println!("{} says:", speaker.npc_style());
            println!("{}", fill(quote, indented_block()).italic());
        },
        ViewItem::EnemyAppears(name) => {
            println!("{:<4}{}", ICON_COMBAT.red(), format!("A wild {name} appears!").enemy_style());
        },
        ViewItem::PlayerAttack { enemy, damage } => {
            println!(
                "{:<4}{}",
                ICON_COMBAT.combat_style(),
                format!("You attack the {enemy} for {damage} damage.").combat_style()
            );
        },
        ViewItem::EnemyAttack { enemy, damage, health } => {
            println!(
                "{:<4}{}",
                ICON_HARMED.red(),
                format!("The {enemy} attacks you for {damage} damage.").combat_style()
            );
            println!("    Your health is now {health}.");
        },
        ViewItem::EnemyDefeated(name) => {
            println!("{:<4}{}", ICON_SUCCESS.green(), format!("You have defeated the {name}!").bold());
        },
        ViewItem::Fled => {
            println!("{}", "You run back to the previous room.".italic());
        },
        ViewItem::QuestUpdate(msg) => {
            println!("{:<4}{}", ICON_QUEST.quest_style(), fill(msg, normal_block()).quest_style());
        },
        ViewItem::EndingNarrative(msg) => {
            println!("{}", fill(msg, normal_block()).triggered_style());
        },
        ViewItem::GameOver { ending, alive } => {
            println!("{}", "Game Over.".bold());
            let (icon, text) = match ending {
                Ending::Death => (ICON_DEATH, "You have perished.".to_string()),
                Ending::Victory => (ICON_CELEBRATE, "Congratulations! You have completed the game.".to_string()),
                other => (ICON_QUEST, format!("{other}. You are {}.", if *alive { "alive" } else { "dead" })),
            };
            println!("{icon:<4}{}", text.bold());
        },
        ViewItem::Instructions => {
            println!("{}", INSTRUCTIONS.dimmed());
        },
        ViewItem::GameSaved { slot, file } => {
            println!("{:<4}Game saved to slot '{}' ({file}).", ICON_ENGINE, slot.item_style());
        },
        ViewItem::GameLoaded { slot, file } => {
            println!("{:<4}Game loaded from slot '{}' ({file}).", ICON_ENGINE, slot.item_style());
        },
        ViewItem::SavedGamesList { directory, slots } => {
            println!("{}", format!("Saved games in {directory}/").subheading_style());
            if slots.is_empty() {
                println!("    {}", "No saved games found. Use `save <slot>` to create one.".italic());
            }
            for slot in slots {
                println!("  • {} {}", slot.slot.item_style(), format!("[v{}]", slot.version).dimmed());
            }
        },
        ViewItem::EngineMessage(msg) => {
            println!("{:<4}{}", ICON_ENGINE, fill(msg, normal_block()));
        },
        ViewItem::QuitSummary {
            turns,
            health,
            items_carried,
        } => {
            println!("{}", "Farewell, adventurer.".subheading_style());
            println!("    Turns taken: {turns} | Health: {health} | Items carried: {items_carried}");
        },
    }
}

/// Subsections of the output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    /// Room description, exits, and occupants.
    Environment,
    /// Direct results of the player's command.
    DirectResult,
    /// Fights, dialogue, riddles and quest progress.
    WorldResponse,
    /// Saves, help, endings and other game-level messages.
    System,
}
impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Environment => "scene",
            Section::DirectResult => "results",
            Section::WorldResponse => "responses",
            Section::System => "game",
        }
    }
}

/// A pushed `ViewItem` plus bookkeeping.
#[derive(Debug, Clone)]
pub struct ViewEntry {
    pub section: Section,
    pub view_item: ViewItem,
    pub sequence: usize,
}

/// Row data for room item listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLine {
    pub name: String,
    pub description: String,
}

/// Row data for the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLine {
    pub name: String,
    pub weight: u32,
}

/// `ViewItems` are each of the various types of information / messages that may be displayed to the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    ActionFailure(String),
    ActionSuccess(String),
    EndingNarrative(String),
    EnemyAppears(String),
    EnemyAttack {
        enemy: String,
        damage: i32,
        health: i32,
    },
    EnemyDefeated(String),
    EngineMessage(String),
    Error(String),
    Fled,
    GameLoaded {
        slot: String,
        file: String,
    },
    GameOver {
        ending: Ending,
        alive: bool,
    },
    GameSaved {
        slot: String,
        file: String,
    },
    Instructions,
    Inventory {
        health: i32,
        attack: i32,
        items: Vec<InventoryLine>,
        total_weight: u32,
        max_weight: u32,
    },
    ItemEffect(String),
    NpcSpeech {
        speaker: String,
        quote: String,
    },
    PlayerAttack {
        enemy: String,
        damage: i32,
    },
    QuestUpdate(String),
    QuitSummary {
        turns: usize,
        health: i32,
        items_carried: usize,
    },
    Riddle(String),
    RoomDescription {
        name: String,
        description: String,
    },
    RoomEnemy {
        name: String,
        description: String,
    },
    RoomExits(Vec<Direction>),
    RoomItems(Vec<ItemLine>),
    RoomNpc(String),
    SavedGamesList {
        directory: String,
        slots: Vec<SaveSlot>,
    },
}
impl ViewItem {
    /// Classify a view item into a top-level output section.
    pub fn section(&self) -> Section {
        match self {
            ViewItem::RoomDescription { .. }
            | ViewItem::RoomItems(_)
            | ViewItem::RoomExits(_)
            | ViewItem::RoomEnemy { .. }
            | ViewItem::RoomNpc(_) => Section::Environment,
            ViewItem::ActionSuccess(_)
            | ViewItem::ActionFailure(_)
            | ViewItem::Error(_)
            | ViewItem::ItemEffect(_)
            | ViewItem::Inventory { .. } => Section::DirectResult,
            ViewItem::Riddle(_)
            | ViewItem::NpcSpeech { .. }
            | ViewItem::EnemyAppears(_)
            | ViewItem::PlayerAttack { .. }
            | ViewItem::EnemyAttack { .. }
            | ViewItem::EnemyDefeated(_)
            | ViewItem::Fled
            | ViewItem::QuestUpdate(_) => Section::WorldResponse,
            ViewItem::EndingNarrative(_)
            | ViewItem::GameOver { .. }
            | ViewItem::Instructions
            | ViewItem::GameSaved { .. }
            | ViewItem::GameLoaded { .. }
            | ViewItem::SavedGamesList { .. }
            | ViewItem::EngineMessage(_)
            | ViewItem::QuitSummary { .. } => Section::System,
        }
    }

    /// Unstyled text for this item, one entry per displayed line.
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            ViewItem::RoomDescription { name, description } => {
                vec![format!("You are in the {name}."), description.clone()]
            },
            ViewItem::RoomItems(lines) => std::iter::once("You see the following items:".to_string())
                .chain(lines.iter().map(|line| format!("- {}: {}", line.name, line.description)))
                .collect(),
            ViewItem::RoomExits(dirs) => {
                let dirs: Vec<&str> = dirs.iter().map(|dir| dir.as_str()).collect();
                vec![format!("Exits: {}", dirs.join(", "))]
            },
            ViewItem::RoomEnemy { name, description } => vec![format!("A {name} is here! {description}")],
            ViewItem::RoomNpc(msg)
            | ViewItem::ActionSuccess(msg)
            | ViewItem::ActionFailure(msg)
            | ViewItem::Error(msg)
            | ViewItem::ItemEffect(msg)
            | ViewItem::Riddle(msg)
            | ViewItem::QuestUpdate(msg)
            | ViewItem::EndingNarrative(msg)
            | ViewItem::EngineMessage(msg) => vec![msg.clone()],
            ViewItem::Inventory {
                health,
                attack,
                items,
                total_weight,
                max_weight,
            } => {
                let mut lines = vec![format!("Your health: {health}"), format!("Your attack: {attack}")];
                if items.is_empty() {
                    lines.push("Your inventory is empty.".to_string());
                } else {
                    lines.push("You are carrying:".to_string());
                    lines.extend(items.iter().map(|line| format!("- {} (Weight: {})", line.name, line.weight)));
                    lines.push(format!("Total carry weight: {total_weight}/{max_weight}"));
                }
                lines
            },
            ViewItem::NpcSpeech { speaker, quote } => vec![format!("{speaker} says: {quote}")],
            ViewItem::EnemyAppears(name) => vec![format!("A wild {name} appears!")],
            ViewItem::PlayerAttack { enemy, damage } => vec![format!("You attack the {enemy} for {damage} damage.")],
            ViewItem::EnemyAttack { enemy, damage, health } => vec![
                format!("The {enemy} attacks you for {damage} damage."),
                format!("Your health is now {health}."),
            ],
            ViewItem::EnemyDefeated(name) => vec![format!("You have defeated the {name}!")],
            ViewItem::Fled => vec!["You run back to the previous room.".to_string()],
            ViewItem::GameOver { ending, .. } => vec!["Game Over.".to_string(), ending.to_string()],
            ViewItem::Instructions => INSTRUCTIONS.lines().map(str::to_string).collect(),
            ViewItem::GameSaved { slot, .. } => vec![format!("Game saved to slot '{slot}'.")],
            ViewItem::GameLoaded { slot, .. } => vec![format!("Game loaded from slot '{slot}'.")],
            ViewItem::SavedGamesList { directory, slots } => std::iter::once(format!("Saved games in {directory}/"))
                .chain(slots.iter().map(|slot| slot.slot.clone()))
                .collect(),
            ViewItem::QuitSummary {
                turns,
                health,
                items_carried,
            } => vec![format!(
                "Turns taken: {turns} | Health: {health} | Items carried: {items_carried}"
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_order_and_sections() {
        let mut view = View::new();
        view.push(ViewItem::ActionSuccess("one".into()));
        view.push(ViewItem::RoomExits(vec![Direction::North, Direction::Up]));
        view.push(ViewItem::Instructions);
        assert_eq!(view.items.len(), 3);
        assert_eq!(view.items[0].section, Section::DirectResult);
        assert_eq!(view.items[1].section, Section::Environment);
        assert_eq!(view.items[2].section, Section::System);
        assert!(view.items.windows(2).all(|w| w[0].sequence < w[1].sequence));
    }

    #[test]
    fn plain_lines_for_inventory() {
        let item = ViewItem::Inventory {
            health: 100,
            attack: 15,
            items: vec![InventoryLine {
                name: "spellbook".into(),
                weight: 5,
            }],
            total_weight: 5,
            max_weight: 20,
        };
        let lines = item.plain_lines();
        assert!(lines.contains(&"- spellbook (Weight: 5)".to_string()));
        assert!(lines.contains(&"Total carry weight: 5/20".to_string()));
    }

    #[test]
    fn exits_render_in_given_order() {
        let item = ViewItem::RoomExits(vec![Direction::South, Direction::East, Direction::North]);
        assert_eq!(item.plain_lines(), vec!["Exits: south, east, north".to_string()]);
    }

    #[test]
    fn flush_empties_the_frame() {
        let mut view = View::new();
        view.push(ViewItem::EngineMessage("hello".into()));
        view.flush();
        assert!(view.items.is_empty());
        assert_eq!(view.sequence, 1);
    }
}
