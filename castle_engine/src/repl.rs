//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. [`handle_input`] takes one input line,
//! routes it either to an outstanding [`PendingPrompt`] or through the command
//! parser, runs the post-action checks, and leaves everything the player should see
//! in a [`View`]. [`run_repl`] wraps that in terminal input and rendering.

pub mod combat;
mod input;
pub mod inventory;
pub mod movement;
pub mod npc;
pub mod quest;
pub mod system;

pub use combat::*;
pub use inventory::*;
pub use movement::*;
pub use npc::*;
pub use quest::*;
pub use system::*;

use crate::command::{Command, parse_command};
use crate::config::GameConfig;
use crate::style::GameStyle;
use crate::world::{CastleWorld, PendingPrompt};
use crate::{View, ViewItem};

use anyhow::Result;
use log::info;

use input::{InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read–eval–print loop until the user quits.
///
/// Handles prompting and rendering; all game logic goes through [`handle_input`].
///
/// # Errors
/// - Propagates failures from handlers, such as a missing room for the player.
pub fn run_repl(world: &mut CastleWorld, config: &GameConfig) -> Result<()> {
    let mut view = View::new();
    let mut input_manager = InputManager::new(config);
    let mut current_turn = 0;

    loop {
        if world.turn_count > current_turn {
            current_turn = world.turn_count;
            info!("================> BEGIN TURN {current_turn} <================");
        }

        let prompt = match &world.pending {
            Some(pending) => pending.text().prompt_style().to_string(),
            None => format!("\n[Turn: {}|Health: {}]>> ", world.turn_count, world.player.health)
                .prompt_style()
                .to_string(),
        };

        let input_event = if let Ok(event) = input_manager.read_line(&prompt) {
            event
        } else {
            view.push(ViewItem::Error("Failed to read input. Try again.".to_string()));
            view.flush();
            continue;
        };

        let input = match input_event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                quit_handler(world, &mut view);
                view.flush();
                break;
            },
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
        };

        let control = handle_input(world, &mut view, config, &input)?;
        view.flush();
        if control == ReplControl::Quit {
            break;
        }
    }
    Ok(())
}

/// Process one line of player input against the world.
///
/// If a prompt is outstanding the line answers it; otherwise the line is parsed as
/// a command and dispatched, and the post-action checks run afterward.
///
/// # Errors
/// - if a handler finds the world inconsistent (e.g. the player's room is missing)
pub fn handle_input(
    world: &mut CastleWorld,
    view: &mut View,
    config: &GameConfig,
    input: &str,
) -> Result<ReplControl> {
    let line = input.trim();

    if let Some(pending) = world.pending.clone() {
        return answer_prompt(world, view, &pending, line);
    }
    if line.is_empty() {
        return Ok(ReplControl::Continue);
    }
    if !world.is_running() {
        view.push(ViewItem::Error("The game is over.".to_string()));
        world.pending = Some(PendingPrompt::PlayAgain);
        return Ok(ReplControl::Continue);
    }

    let command = parse_command(line);
    info!("turn {}: \"{line}\" parsed as {command:?}", world.turn_count);
    if dispatch_command(world, view, config, &command)? == ReplControl::Quit {
        return Ok(ReplControl::Quit);
    }
    // unrecognized input doesn't take a turn
    if command.is_unknown() {
        return Ok(ReplControl::Continue);
    }
    world.turn_count += 1;

    post_action_checks(world, view)?;
    if config.repeat_instructions && world.pending.is_none() && world.is_running() {
        view.push(ViewItem::Instructions);
    }
    Ok(ReplControl::Continue)
}

/// Call the handler for a parsed command.
///
/// # Errors
/// - propagated from the handler
pub fn dispatch_command(
    world: &mut CastleWorld,
    view: &mut View,
    config: &GameConfig,
    command: &Command,
) -> Result<ReplControl> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;
    match command {
        AcceptQuest => accept_quest_handler(world, view)?,
        CompleteQuest => complete_quest_handler(world, view)?,
        Drop(item) => drop_handler(world, view, item)?,
        Get(item) => get_handler(world, view, item)?,
        Help => help_handler(view),
        Inventory => inventory_handler(world, view),
        Load(slot) => load_handler(world, view, config, slot.as_deref())?,
        ListSaves => list_saves_handler(view, config),
        Look => look_handler(world, view)?,
        Move(direction) => move_handler(world, view, *direction)?,
        Quit => return Ok(quit_handler(world, view)),
        Save(slot) => save_handler(world, view, config, slot.as_deref()),
        Search => search_handler(world, view)?,
        Talk => talk_handler(world, view)?,
        Unknown => view.push(ViewItem::Error("Invalid action.".to_string())),
        Use(item) => use_handler(world, view, item)?,
    }
    Ok(ReplControl::Continue)
}

/// Route an input line to whatever prompt the game is waiting on.
fn answer_prompt(world: &mut CastleWorld, view: &mut View, pending: &PendingPrompt, line: &str) -> Result<ReplControl> {
    match pending {
        PendingPrompt::Riddle { room } => {
            answer_riddle(world, view, room, line)?;
            post_action_checks(world, view)?;
        },
        PendingPrompt::Combat => match combat_round(world, view, line)? {
            CombatOutcome::EnemyDefeated | CombatOutcome::Fled => check_quests_and_endings(world, view)?,
            CombatOutcome::Ongoing | CombatOutcome::Invalid | CombatOutcome::PlayerDied => {},
        },
        PendingPrompt::StrangerOffer => {
            if answer_stranger(world, view, line)? {
                post_action_checks(world, view)?;
            }
        },
        PendingPrompt::PlayAgain => return play_again_handler(world, view, line),
    }
    Ok(ReplControl::Continue)
}

/// Checks that run after every action, in a fixed order:
/// a live enemy opens combat and suspends the rest; then quests auto-complete;
/// then endings are checked.
///
/// # Errors
/// - if the player's room can't be found
pub fn post_action_checks(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    if !world.is_running() || world.pending.is_some() {
        return Ok(());
    }
    if start_combat_if_enemy(world, view)? {
        return Ok(());
    }
    check_quests_and_endings(world, view)
}

/// The tail of [`post_action_checks`], also run once a fight ends with the player alive.
///
/// # Errors
/// - if the player's room can't be found
pub fn check_quests_and_endings(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    auto_complete_quests(world, view)?;
    if world.is_running() {
        check_victory(world, view)?;
    }
    Ok(())
}
