//! Room definitions and spatial utilities.
//!
//! The castle is a fixed graph of rooms. Exits are directed edges stored by the id
//! of the destination room, so rooms never hold references to each other.
//! The topology never changes after loading; only lock flags flip and hidden exits
//! get revealed.

use crate::enemy::Enemy;
use crate::health::LivingEntity;
use crate::item::{Item, ItemHolder};
use crate::npc::Npc;
use crate::view::{ItemLine, View, ViewItem};
use crate::Id;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};

/// The six ways out of a room, in the order `help` and completion list them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}
impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse a direction word (already lowercased).
    pub fn from_token(token: &str) -> Option<Direction> {
        match token {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}
impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A question guarding entry to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    pub question: String,
    pub answer: String,
}
impl Riddle {
    /// Answers are compared trimmed and lowercased.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.answer
    }
}

/// A room's exits in the order they were declared in the world file.
///
/// Reads and writes as a `direction = room id` map. Later entries for a direction
/// replace earlier ones in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exits(Vec<(Direction, Id)>);
impl Exits {
    pub fn get(&self, direction: &Direction) -> Option<&Id> {
        self.0.iter().find(|(dir, _)| dir == direction).map(|(_, to)| to)
    }

    pub fn contains_key(&self, direction: &Direction) -> bool {
        self.get(direction).is_some()
    }

    pub fn insert(&mut self, direction: Direction, to: impl Into<Id>) {
        let to = to.into();
        match self.0.iter_mut().find(|(dir, _)| *dir == direction) {
            Some(entry) => entry.1 = to,
            None => self.0.push((direction, to)),
        }
    }

    /// Move every exit from `other` onto the end of this set, leaving `other` empty.
    pub fn append(&mut self, other: &mut Exits) {
        for (direction, to) in other.0.drain(..) {
            self.insert(direction, to);
        }
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.iter().map(|(dir, _)| *dir)
    }

    pub fn values(&self) -> impl Iterator<Item = &Id> {
        self.0.iter().map(|(_, to)| to)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Serialize for Exits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(dir, to)| (dir, to)))
    }
}
impl<'de> Deserialize<'de> for Exits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExitsVisitor;

        impl<'de> Visitor<'de> for ExitsVisitor {
            type Value = Exits;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of direction words to room ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Exits, A::Error> {
                let mut exits = Exits::default();
                while let Some((direction, to)) = access.next_entry::<Direction, Id>()? {
                    exits.insert(direction, to);
                }
                Ok(exits)
            }
        }

        deserializer.deserialize_map(ExitsVisitor)
    }
}

/// Any visitable location in the castle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub exits: Exits,
    pub hidden_exits: Exits,
    pub items: Vec<Item>,
    pub enemy: Option<Enemy>,
    pub npc: Option<Npc>,
    /// Entry is barred while set.
    pub locked: bool,
    /// Present on the one room that is opened by answering instead of with a key.
    pub riddle: Option<Riddle>,
}
impl ItemHolder for Room {
    fn items(&self) -> &[Item] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }
}
impl Room {
    /// Create an empty, unlocked room with no exits.
    pub fn new(id: impl Into<Id>, name: impl Into<String>, description: impl Into<String>) -> Room {
        Room {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            exits: Exits::default(),
            hidden_exits: Exits::default(),
            items: Vec::new(),
            enemy: None,
            npc: None,
            locked: false,
            riddle: None,
        }
    }

    /// Move all hidden exits into the visible set.
    ///
    /// Returns true if anything was revealed; calling again afterward is a no-op.
    pub fn search(&mut self) -> bool {
        if self.hidden_exits.is_empty() {
            return false;
        }
        self.exits.append(&mut self.hidden_exits);
        true
    }

    /// The enemy in this room, if there is one still standing.
    pub fn live_enemy(&self) -> Option<&Enemy> {
        self.enemy.as_ref().filter(|enemy| enemy.is_alive())
    }

    /// Displays the full description, items, exits, enemy and NPC for the `Room`.
    pub fn show(&self, view: &mut View) {
        view.push(ViewItem::RoomDescription {
            name: self.name.clone(),
            description: self.description.clone(),
        });
        if !self.items.is_empty() {
            view.push(ViewItem::RoomItems(
                self.items
                    .iter()
                    .map(|item| ItemLine {
                        name: item.name.clone(),
                        description: item.description.clone(),
                    })
                    .collect(),
            ));
        }
        view.push(ViewItem::RoomExits(self.exits.directions().collect()));
        if let Some(enemy) = &self.enemy {
            view.push(ViewItem::RoomEnemy {
                name: enemy.name.clone(),
                description: enemy.description.clone(),
            });
        }
        if let Some(npc) = &self.npc {
            view.push(ViewItem::RoomNpc(npc.presence.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garden() -> Room {
        let mut room = Room::new("garden", "Garden", "A lush garden.");
        room.exits.insert(Direction::East, "entrance_hall");
        room.hidden_exits.insert(Direction::North, "secret_cave");
        room
    }

    #[test]
    fn direction_tokens_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_token(dir.as_str()), Some(dir));
        }
        assert_eq!(Direction::from_token("northwest"), None);
    }

    #[test]
    fn search_reveals_once() {
        let mut room = garden();
        assert!(room.search());
        assert_eq!(room.exits.get(&Direction::North).map(String::as_str), Some("secret_cave"));
        assert!(room.hidden_exits.is_empty());
        let after_first = room.exits.clone();
        assert!(!room.search());
        assert_eq!(room.exits, after_first);
    }

    #[test]
    fn revealed_exits_are_listed_last() {
        let mut room = garden();
        room.exits.insert(Direction::West, "kitchen");
        room.search();
        assert_eq!(
            room.exits.directions().collect::<Vec<_>>(),
            vec![Direction::East, Direction::West, Direction::North]
        );
    }

    #[test]
    fn exits_keep_declaration_order() {
        #[derive(Deserialize)]
        struct Holder {
            exits: Exits,
        }
        let holder: Holder = toml::from_str(r#"exits = { south = "hall", east = "kitchen", north = "chamber" }"#).unwrap();
        assert_eq!(
            holder.exits.directions().collect::<Vec<_>>(),
            vec![Direction::South, Direction::East, Direction::North]
        );
        assert_eq!(holder.exits.get(&Direction::East).map(String::as_str), Some("kitchen"));

        let text = ron::to_string(&holder.exits).unwrap();
        let back: Exits = ron::from_str(&text).unwrap();
        assert_eq!(back, holder.exits);
    }

    #[test]
    fn riddle_answer_is_normalized() {
        let riddle = Riddle {
            question: "?".into(),
            answer: "echo".into(),
        };
        assert!(riddle.is_correct("  ECHO "));
        assert!(!riddle.is_correct("an echo"));
        assert!(!riddle.is_correct(""));
    }

    #[test]
    fn dead_enemy_is_not_live() {
        let mut room = garden();
        room.enemy = Some(Enemy::new("Goblin", 0, 10, "A sneaky goblin."));
        assert!(room.live_enemy().is_none());
    }

    #[test]
    fn show_lists_items_exits_and_enemy() {
        let mut room = garden();
        room.items.push(Item::new("golden apple", "Shiny.", 2));
        room.enemy = Some(Enemy::new("Goblin", 30, 10, "A sneaky goblin."));
        let mut view = View::new();
        room.show(&mut view);
        let kinds: Vec<_> = view.items.iter().map(|entry| &entry.view_item).collect();
        assert!(matches!(kinds[0], ViewItem::RoomDescription { name, .. } if name == "Garden"));
        assert!(matches!(kinds[1], ViewItem::RoomItems(lines) if lines[0].name == "golden apple"));
        assert!(matches!(kinds[2], ViewItem::RoomExits(dirs) if dirs == &vec![Direction::East]));
        assert!(matches!(kinds[3], ViewItem::RoomEnemy { name, .. } if name == "Goblin"));
    }
}
