//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location,
//! including the lock and riddle checks on the way in.

use crate::item::ItemHolder;
use crate::room::Direction;
use crate::world::{CastleWorld, KEY_ITEM, PendingPrompt};
use crate::{View, ViewItem};

use anyhow::{Context, Result, anyhow};
use log::info;

/// Move the player through the exit in `direction`, if there is one and it can be opened.
///
/// # Errors
/// - if the current room or the exit's destination is missing from the world
pub fn move_handler(world: &mut CastleWorld, view: &mut View, direction: Direction) -> Result<()> {
    let destination_id = {
        let current_room = world.player_room_ref()?;
        if let Some(to) = current_room.exits.get(&direction) {
            to.clone()
        } else {
            view.push(ViewItem::ActionFailure("You can't go that way.".to_string()));
            info!("no exit {direction} from ({})", current_room.id);
            return Ok(());
        }
    };

    let destination = world
        .room_ref(&destination_id)
        .with_context(|| format!("following exit {direction} from ({})", world.current_room))?;
    if destination.locked {
        if let Some(riddle) = &destination.riddle {
            view.push(ViewItem::Riddle(format!("A voice echoes: '{}'", riddle.question)));
            info!("riddle posed at the door of {} ({})", destination.name, destination.id);
            world.pending = Some(PendingPrompt::Riddle { room: destination_id });
            return Ok(());
        }
        if !world.player.contains_item(KEY_ITEM) {
            view.push(ViewItem::ActionFailure("The door is locked. You need a key.".to_string()));
            info!("player denied entry to locked room ({destination_id})");
            return Ok(());
        }
        world.room_mut(&destination_id)?.locked = false;
        view.push(ViewItem::ActionSuccess("You use the key to unlock the door.".to_string()));
        info!("({destination_id}) unlocked with the key");
    }

    enter_room(world, view, &destination_id)
}

/// Put the player in `room_id` and describe it.
///
/// # Errors
/// - if `room_id` is not in the world
pub fn enter_room(world: &mut CastleWorld, view: &mut View, room_id: &str) -> Result<()> {
    world.room_ref(room_id)?;
    world.move_player_to(room_id);
    let room = world.player_room_ref()?;
    info!("player moved to {} ({})", room.name, room.id);
    room.show(view);
    Ok(())
}

/// Check an answer to the riddle guarding `room_id`. A right answer opens the room
/// for good and walks the player in; a wrong one changes nothing.
///
/// # Errors
/// - if the room is missing or has no riddle
pub fn answer_riddle(world: &mut CastleWorld, view: &mut View, room_id: &str, answer: &str) -> Result<()> {
    world.pending = None;
    let riddle = world
        .room_ref(room_id)?
        .riddle
        .clone()
        .ok_or_else(|| anyhow!("room ({room_id}) has no riddle to answer"))?;

    if riddle.is_correct(answer) {
        world.room_mut(room_id)?.locked = false;
        view.push(ViewItem::ActionSuccess(
            "The door creaks open as you answer correctly.".to_string(),
        ));
        info!("riddle for ({room_id}) solved");
        enter_room(world, view, room_id)
    } else {
        view.push(ViewItem::ActionFailure(
            "The voice says, 'Incorrect. You may not enter.'".to_string(),
        ));
        info!("wrong riddle answer \"{answer}\" at ({room_id})");
        Ok(())
    }
}
