//! Command module
//!
//! Describes possible commands used during gameplay.
use crate::room::Direction;

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    AcceptQuest,
    CompleteQuest,
    Drop(String),
    Get(String),
    Help,
    Inventory,
    /// `None` means the configured default slot.
    Load(Option<String>),
    ListSaves,
    Look,
    #[variantly(rename = "move_dir")]
    Move(Direction),
    Quit,
    Save(Option<String>),
    Search,
    Talk,
    Unknown,
    #[variantly(rename = "use_item")]
    Use(String),
}

/// Parses an input string and returns the corresponding `Command`.
///
/// Input is trimmed and lowercased first. Item names keep their inner spacing
/// ("get health potion" takes the item named `health potion`).
pub fn parse_command(input: &str) -> Command {
    let normalized = input.trim().to_lowercase();
    if let Some(dir) = Direction::from_token(&normalized) {
        return Command::Move(dir);
    }
    if let Some(rest) = normalized.strip_prefix("get ") {
        return Command::Get(rest.trim().to_string());
    }
    if let Some(rest) = normalized.strip_prefix("drop ") {
        return Command::Drop(rest.trim().to_string());
    }
    if let Some(rest) = normalized.strip_prefix("use ") {
        return Command::Use(rest.trim().to_string());
    }
    let words: Vec<&str> = normalized.split_whitespace().collect();
    match words.as_slice() {
        ["go", dir] => Direction::from_token(dir).map_or(Command::Unknown, Command::Move),
        ["search"] => Command::Search,
        ["look"] => Command::Look,
        ["inventory"] => Command::Inventory,
        ["save"] => Command::Save(None),
        ["save", slot] => Command::Save(Some((*slot).to_string())),
        ["load"] => Command::Load(None),
        ["load", slot] => Command::Load(Some((*slot).to_string())),
        ["saves"] => Command::ListSaves,
        ["accept", "quest"] => Command::AcceptQuest,
        ["complete", "quest"] => Command::CompleteQuest,
        ["talk"] => Command::Talk,
        ["help" | "instructions"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_case_insensitive() {
        assert_eq!(parse_command("  NORTH "), Command::Move(Direction::North));
        assert_eq!(parse_command("down"), Command::Move(Direction::Down));
        assert_eq!(parse_command("go up"), Command::Move(Direction::Up));
        assert_eq!(parse_command("go sideways"), Command::Unknown);
    }

    #[test]
    fn item_commands_keep_multiword_names() {
        assert_eq!(parse_command("get health potion"), Command::Get("health potion".into()));
        assert_eq!(parse_command("Drop Mysterious Amulet"), Command::Drop("mysterious amulet".into()));
        assert_eq!(parse_command("use ring of power"), Command::Use("ring of power".into()));
    }

    #[test]
    fn bare_verbs_without_object_are_unknown() {
        assert_eq!(parse_command("get"), Command::Unknown);
        assert_eq!(parse_command("use"), Command::Unknown);
    }

    #[test]
    fn system_and_quest_commands() {
        assert_eq!(parse_command("save"), Command::Save(None));
        assert_eq!(parse_command("load slot2"), Command::Load(Some("slot2".into())));
        assert_eq!(parse_command("accept quest"), Command::AcceptQuest);
        assert_eq!(parse_command("complete quest"), Command::CompleteQuest);
        assert_eq!(parse_command("instructions"), Command::Help);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("talk"), Command::Talk);
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(parse_command("dance"), Command::Unknown);
        assert_eq!(parse_command("accept"), Command::Unknown);
        assert_eq!(parse_command(""), Command::Unknown);
    }
}
