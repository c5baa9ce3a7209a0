use castle_engine as ce;
use ce::health::LivingEntity;
use ce::quest::{PlayerChoice, QuestStatus};
use ce::room::Direction;
use ce::world::{MAIN_QUEST, SIDE_QUEST};
use ce::*;

use tempfile::tempdir;

fn new_game() -> (CastleWorld, GameConfig) {
    let world = load_world().expect("embedded world loads");
    let dir = std::env::temp_dir().join("castle_engine_walkthrough_unused");
    let config = GameConfig {
        save_dir: dir,
        ..GameConfig::default()
    };
    (world, config)
}

/// Feed each line through the dispatcher and return everything displayed.
fn play(world: &mut CastleWorld, config: &GameConfig, lines: &[&str]) -> Vec<String> {
    let mut view = View::new();
    for line in lines {
        handle_input(world, &mut view, config, line).expect("handler should not fail");
    }
    view.lines()
}

#[test]
fn spellbook_pickup_shows_in_inventory() {
    let (mut world, config) = new_game();
    let lines = play(&mut world, &config, &["north", "get spellbook", "inventory"]);
    assert!(lines.contains(&"You have picked up the spellbook.".to_string()));
    assert!(lines.contains(&"- spellbook (Weight: 5)".to_string()));
    assert!(lines.contains(&"Total carry weight: 5/20".to_string()));
}

#[test]
fn evil_spirit_falls_in_four_rounds() {
    let (mut world, config) = new_game();
    let lines = play(&mut world, &config, &["east", "down"]);
    assert!(lines.contains(&"A wild Evil Spirit appears!".to_string()));
    assert_eq!(world.pending, Some(PendingPrompt::Combat));

    let lines = play(&mut world, &config, &["attack", "attack", "attack", "attack"]);
    assert_eq!(world.player.health, 55);
    assert!(lines.contains(&"You have defeated the Evil Spirit!".to_string()));
    assert!(world.rooms["dungeon"].enemy.is_none());
    assert!(world.pending.is_none());
    assert!(world.is_running());

    // a cleared room doesn't re-engage
    play(&mut world, &config, &["look"]);
    assert!(world.pending.is_none());
}

#[test]
fn enemy_reengages_until_resolved() {
    let (mut world, config) = new_game();
    let lines = play(&mut world, &config, &["east", "down", "attack", "run"]);
    assert!(lines.contains(&"You run back to the previous room.".to_string()));
    assert_eq!(world.current_room, "armory");
    assert_eq!(world.rooms["dungeon"].enemy.as_ref().map(|e| e.health), Some(35));

    play(&mut world, &config, &["down"]);
    assert_eq!(world.pending, Some(PendingPrompt::Combat));
    let lines = play(&mut world, &config, &["fight", "quit"]);
    assert_eq!(
        lines.iter().filter(|l| *l == "Invalid action. Type 'attack' or 'run'.").count(),
        2
    );
    assert_eq!(world.player.health, 85);
}

#[test]
fn riddle_blocks_until_answered() {
    let (mut world, config) = new_game();
    let lines = play(&mut world, &config, &["north", "north", "wind"]);
    assert!(lines.contains(
        &"A voice echoes: 'I speak without a mouth and hear without ears. I have nobody, but I come alive with the wind. What am I?'"
            .to_string()
    ));
    assert!(lines.contains(&"The voice says, 'Incorrect. You may not enter.'".to_string()));
    assert_eq!(world.current_room, "library");
    assert!(world.rooms["mystic_chamber"].locked);

    let lines = play(&mut world, &config, &["north", " Echo "]);
    assert!(lines.contains(&"The door creaks open as you answer correctly.".to_string()));
    assert_eq!(world.current_room, "mystic_chamber");
    assert!(!world.rooms["mystic_chamber"].locked);
}

#[test]
fn overweight_pickup_is_refused() {
    let (mut world, config) = new_game();
    world.player.add_item(Item::new("anvil", "Very heavy.", 16));
    let lines = play(&mut world, &config, &["north", "get spellbook"]);
    assert!(lines.contains(&"You can't carry any more weight. Consider dropping something.".to_string()));
    assert!(world.rooms["library"].contains_item("spellbook"));
    assert!(world.player.carry_weight() <= world.player.max_weight);

    play(&mut world, &config, &["drop anvil", "get spellbook"]);
    assert!(world.player.contains_item("spellbook"));
    assert!(world.rooms["library"].contains_item("anvil"));
}

#[test]
fn search_reveals_cave_once() {
    let (mut world, config) = new_game();
    play(&mut world, &config, &["west", "north"]);
    assert_eq!(world.current_room, "garden");

    play(&mut world, &config, &["search"]);
    let exits = world.rooms["garden"].exits.clone();
    assert_eq!(exits.get(&Direction::North).map(String::as_str), Some("secret_cave"));
    play(&mut world, &config, &["search"]);
    assert_eq!(world.rooms["garden"].exits, exits);
}

#[test]
fn golden_apple_in_tower_is_victory() {
    let (mut world, config) = new_game();
    let lines = play(&mut world, &config, &["west", "get golden apple", "east", "up"]);
    assert_eq!(world.status, GameStatus::Over(Ending::Victory));
    assert!(lines.contains(&"Congratulations, you have achieved ultimate knowledge!".to_string()));
    assert_eq!(world.pending, Some(PendingPrompt::PlayAgain));

    let mut view = View::new();
    let control = handle_input(&mut world, &mut view, &config, "no").unwrap();
    assert_eq!(control, ReplControl::Quit);
}

#[test]
fn refusing_the_stranger_spoils_the_apple() {
    let (mut world, config) = new_game();
    play(&mut world, &config, &["west", "talk", "perhaps", "no"]);
    assert_eq!(world.player_choice, PlayerChoice::Declined);
    play(&mut world, &config, &["get golden apple", "east", "up"]);
    assert_eq!(world.status, GameStatus::Over(Ending::BadEnding));
}

#[test]
fn bringing_the_lamp_is_the_secret_ending() {
    let (mut world, config) = new_game();
    play(&mut world, &config, &["west", "talk", "yes", "search", "north"]);
    assert_eq!(world.quest(SIDE_QUEST).unwrap().status, QuestStatus::Active);
    assert_eq!(world.current_room, "secret_cave");
    assert_eq!(world.pending, Some(PendingPrompt::Combat));

    play(&mut world, &config, &["attack", "attack"]);
    assert!(world.rooms["secret_cave"].enemy.is_none());
    assert_eq!(world.player.health, 90);

    play(&mut world, &config, &["get magic lamp"]);
    assert!(!world.player.contains_item("magic lamp"));
    assert_eq!(world.status, GameStatus::Over(Ending::SecretEnding));
}

#[test]
fn dragon_kills_a_weakened_player_and_restart_resets() {
    let (mut world, config) = new_game();
    play(&mut world, &config, &["east", "down", "attack", "attack", "attack", "attack", "down"]);
    assert_eq!(world.current_room, "crypt");
    let lines = play(&mut world, &config, &["attack", "attack", "attack"]);
    assert!(!world.player.is_alive());
    assert_eq!(world.status, GameStatus::Over(Ending::Death));
    assert!(lines.contains(&"Game Over.".to_string()));

    play(&mut world, &config, &["y"]);
    assert!(world.is_running());
    assert_eq!(world.current_room, "entrance_hall");
    assert_eq!(world.player.health, 100);
    assert!(world.rooms["dungeon"].enemy.is_some());
}

#[test]
fn crown_completes_main_quest_on_pickup() {
    let (mut world, config) = new_game();
    world.player.attack = 200;
    play(&mut world, &config, &["accept quest", "east", "down", "attack", "down", "attack"]);
    assert!(world.rooms["crypt"].enemy.is_none());

    let lines = play(&mut world, &config, &["get lost crown"]);
    assert!(lines.contains(&"You have completed the quest and received the ring of power!".to_string()));
    assert!(world.quest(MAIN_QUEST).unwrap().is_completed());
    assert!(world.player.contains_item("ring of power"));
    assert!(!world.player.contains_item("lost crown"));

    let lines = play(&mut world, &config, &["accept quest"]);
    assert!(lines.contains(&"You have already accepted or completed the quest.".to_string()));
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let (mut world, mut config) = new_game();
    config.save_dir = dir.path().to_path_buf();

    play(&mut world, &config, &["north", "get spellbook", "save"]);
    let saved = world.clone();

    play(&mut world, &config, &["drop spellbook", "south", "east"]);
    assert_eq!(world.current_room, "armory");

    let lines = play(&mut world, &config, &["load"]);
    assert!(lines.contains(&"Game loaded successfully.".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("Could not load")));
    assert_eq!(world.current_room, "library");
    assert!(world.player.contains_item("spellbook"));
    assert_eq!(world.rooms, saved.rooms);
    assert_eq!(world.player, saved.player);
}

#[test]
fn named_slots_are_independent() {
    let dir = tempdir().unwrap();
    let (mut world, mut config) = new_game();
    config.save_dir = dir.path().to_path_buf();

    play(&mut world, &config, &["north", "save first", "south", "west", "save second"]);
    play(&mut world, &config, &["load first"]);
    assert_eq!(world.current_room, "library");
    play(&mut world, &config, &["load second"]);
    assert_eq!(world.current_room, "garden");

    let lines = play(&mut world, &config, &["load third"]);
    assert!(lines.contains(&"No saved game found.".to_string()));
    assert_eq!(world.current_room, "garden");
}

#[test]
fn unknown_and_empty_input_change_nothing() {
    let (mut world, config) = new_game();
    let before = world.clone();
    let lines = play(&mut world, &config, &["   "]);
    assert!(lines.is_empty());
    assert_eq!(world, before);

    let lines = play(&mut world, &config, &["dance wildly", "go sideways", "get"]);
    assert_eq!(lines, vec!["Invalid action.".to_string(); 3]);
    assert_eq!(world, before);
}

#[test]
fn instructions_repeat_when_configured() {
    let (mut world, mut config) = new_game();
    let lines = play(&mut world, &config, &["look"]);
    assert!(!lines.iter().any(|l| l == "You can:"));

    config.repeat_instructions = true;
    let lines = play(&mut world, &config, &["look"]);
    assert!(lines.iter().any(|l| l == "You can:"));
}

#[test]
fn quit_ends_the_session() {
    let (mut world, config) = new_game();
    let mut view = View::new();
    assert_eq!(
        handle_input(&mut world, &mut view, &config, "EXIT").unwrap(),
        ReplControl::Quit
    );
    assert!(view.contains(ViewItem::is_quit_summary));
}
