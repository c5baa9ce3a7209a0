//! `repl::npc` module
//!
//! Talking to the stranger and answering the favor they ask.

use crate::npc::NpcState;
use crate::quest::{PlayerChoice, QuestStatus};
use crate::world::{CastleWorld, PendingPrompt, SIDE_QUEST};
use crate::{View, ViewItem};

use anyhow::Result;
use log::info;

/// Speak to whoever is in the room. The first conversation with the stranger asks a question.
///
/// # Errors
/// - if the player's room is missing, or the NPC's quest isn't defined
pub fn talk_handler(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    let room = world.player_room_ref()?;
    let Some(npc) = &room.npc else {
        view.push(ViewItem::ActionFailure("There is no one here to talk to.".to_string()));
        return Ok(());
    };

    let state = match (world.player_choice, world.quest(&npc.quest)?.status) {
        (PlayerChoice::Declined, _) => NpcState::Spurned,
        (_, QuestStatus::Inactive) => NpcState::Offering,
        _ => NpcState::Waiting,
    };
    view.push(ViewItem::NpcSpeech {
        speaker: npc.name.clone(),
        quote: npc.dialogue_for(state),
    });
    info!("talked to {} ({state})", npc.name);

    if state.is_offering() {
        world.pending = Some(PendingPrompt::StrangerOffer);
    }
    Ok(())
}

/// Handle a yes/no answer to the stranger. Returns true once the question is settled;
/// anything other than yes/y/no/n asks again.
///
/// # Errors
/// - if the side quest isn't defined in the world
pub fn answer_stranger(world: &mut CastleWorld, view: &mut View, answer: &str) -> Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "yes" | "y" => {
            world.pending = None;
            world.player_choice = PlayerChoice::Accepted;
            let quest = world.quest_mut(SIDE_QUEST)?;
            quest.accept();
            view.push(ViewItem::QuestUpdate(format!(
                "You have accepted the quest: {}",
                quest.description
            )));
            info!("stranger's quest ({SIDE_QUEST}) accepted");
            Ok(true)
        },
        "no" | "n" => {
            world.pending = None;
            world.player_choice = PlayerChoice::Declined;
            view.push(ViewItem::QuestUpdate(
                "You refuse. The stranger turns away without a word.".to_string(),
            ));
            info!("stranger's quest ({SIDE_QUEST}) declined");
            Ok(true)
        },
        _ => {
            view.push(ViewItem::Error("Please answer 'yes' or 'no'.".to_string()));
            Ok(false)
        },
    }
}
