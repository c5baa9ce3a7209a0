//! `repl::quest` module
//!
//! Quest commands, quest auto-completion, and the endings they lead to.

use crate::health::LivingEntity;
use crate::item::ItemHolder;
use crate::quest::PlayerChoice;
use crate::world::{
    CastleWorld, Ending, GameStatus, MAIN_QUEST, PendingPrompt, SIDE_QUEST, VICTORY_ITEM, VICTORY_ROOM_NAME,
};
use crate::{View, ViewItem};

use anyhow::{Result, anyhow};
use log::info;

/// Take on the main quest.
///
/// # Errors
/// - if the main quest isn't defined in the world
pub fn accept_quest_handler(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    let quest = world.quest_mut(MAIN_QUEST)?;
    if quest.accept() {
        view.push(ViewItem::QuestUpdate(format!(
            "You have accepted the quest: {}",
            quest.description
        )));
        info!("quest ({MAIN_QUEST}) accepted");
    } else {
        view.push(ViewItem::ActionFailure(
            "You have already accepted or completed the quest.".to_string(),
        ));
    }
    Ok(())
}

/// Hand in the main quest explicitly.
///
/// # Errors
/// - if the main quest isn't defined in the world
pub fn complete_quest_handler(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    if !complete_main_quest(world, view)? {
        view.push(ViewItem::ActionFailure("You can't complete the quest yet.".to_string()));
    }
    Ok(())
}

/// Complete the main quest if it's active and the crown is held. Returns true if it completed.
///
/// # Errors
/// - if the main quest isn't defined in the world
pub fn complete_main_quest(world: &mut CastleWorld, view: &mut View) -> Result<bool> {
    let quest = world
        .quests
        .get_mut(MAIN_QUEST)
        .ok_or_else(|| anyhow!("quest ({MAIN_QUEST}) not found in world"))?;
    let Some(reward) = quest.complete(&mut world.player) else {
        return Ok(false);
    };
    let message = match &reward {
        Some(reward) => format!("You have completed the quest and received the {reward}!"),
        None => "You have completed the quest!".to_string(),
    };
    view.push(ViewItem::QuestUpdate(message));
    info!("quest ({MAIN_QUEST}) completed, reward: {reward:?}");
    Ok(true)
}

/// Post-action quest check: main quest first, then the stranger's.
/// Finishing the stranger's quest ends the game on the spot.
///
/// # Errors
/// - if either quest isn't defined in the world
pub fn auto_complete_quests(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    complete_main_quest(world, view)?;

    let quest = world
        .quests
        .get_mut(SIDE_QUEST)
        .ok_or_else(|| anyhow!("quest ({SIDE_QUEST}) not found in world"))?;
    let required = quest.required_item.clone();
    if quest.complete(&mut world.player).is_some() {
        view.push(ViewItem::QuestUpdate(format!(
            "You hand the {required} to the mysterious stranger."
        )));
        info!("quest ({SIDE_QUEST}) completed");
        end_game(world, view, Ending::SecretEnding);
    }
    Ok(())
}

/// Check for the golden apple in the tower. Which ending it brings depends on
/// whether the stranger was turned down.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn check_victory(world: &mut CastleWorld, view: &mut View) -> Result<()> {
    let in_victory_room = world.player_room_ref()?.name == VICTORY_ROOM_NAME;
    if in_victory_room && world.player.contains_item(VICTORY_ITEM) {
        let ending = if world.player_choice == PlayerChoice::Declined {
            Ending::BadEnding
        } else {
            Ending::Victory
        };
        end_game(world, view, ending);
    }
    Ok(())
}

/// Stop the game with `ending` and ask whether to play again.
pub fn end_game(world: &mut CastleWorld, view: &mut View, ending: Ending) {
    for line in ending_narrative(ending) {
        view.push(ViewItem::EndingNarrative((*line).to_string()));
    }
    let alive = world.player.is_alive();
    view.push(ViewItem::GameOver { ending, alive });
    world.status = GameStatus::Over(ending);
    world.pending = Some(PendingPrompt::PlayAgain);
    info!(
        "game over: {ending} on turn {} (alive: {alive}, health: {})",
        world.turn_count, world.player.health
    );
}

fn ending_narrative(ending: Ending) -> &'static [&'static str] {
    match ending {
        Ending::Victory => &[
            "You bite into the golden apple atop the tower. Enlightenment floods over you.",
            "Congratulations, you have achieved ultimate knowledge!",
        ],
        Ending::Death => &[],
        Ending::BadEnding => &[
            "You bite into the golden apple atop the tower, but it turns to ash in your mouth.",
            "Far below, the stranger you turned away begins to laugh.",
        ],
        Ending::SecretEnding => &[
            "The stranger lifts the lamp and its light fills the garden. The hood falls back, and the castle's true master smiles at you.",
            "You have uncovered the secret of the castle.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Item;
    use crate::load_world;
    use crate::quest::QuestStatus;

    fn crown() -> Item {
        Item::new("lost crown", "The crown of the lost king.", 2)
    }

    #[test]
    fn accept_only_once() {
        let mut world = load_world().unwrap();
        let mut view = View::new();
        accept_quest_handler(&mut world, &mut view).unwrap();
        assert!(world.quest(MAIN_QUEST).unwrap().is_active());
        accept_quest_handler(&mut world, &mut view).unwrap();
        assert!(view.lines().contains(&"You have already accepted or completed the quest.".to_string()));
    }

    #[test]
    fn complete_requires_crown() {
        let mut world = load_world().unwrap();
        let mut view = View::new();
        accept_quest_handler(&mut world, &mut view).unwrap();
        complete_quest_handler(&mut world, &mut view).unwrap();
        assert!(world.quest(MAIN_QUEST).unwrap().is_active());

        world.player.add_item(crown());
        complete_quest_handler(&mut world, &mut view).unwrap();
        assert_eq!(world.quest(MAIN_QUEST).unwrap().status, QuestStatus::Completed);
        assert!(!world.player.contains_item("lost crown"));
        assert!(world.player.contains_item("ring of power"));
        assert!(view.lines().contains(&"You have completed the quest and received the ring of power!".to_string()));
    }

    #[test]
    fn reward_ignores_carry_limit() {
        let mut world = load_world().unwrap();
        let mut view = View::new();
        accept_quest_handler(&mut world, &mut view).unwrap();
        world.player.add_item(crown());
        world.player.add_item(Item::new("sword", "A sharp-looking sword.", 10));
        world.player.add_item(Item::new("shield", "A sturdy shield.", 8));
        auto_complete_quests(&mut world, &mut view).unwrap();
        assert!(world.player.contains_item("ring of power"));
        assert_eq!(world.player.carry_weight(), 19);
    }

    #[test]
    fn inactive_quest_does_not_auto_complete() {
        let mut world = load_world().unwrap();
        let mut view = View::new();
        world.player.add_item(crown());
        auto_complete_quests(&mut world, &mut view).unwrap();
        assert!(world.player.contains_item("lost crown"));
        assert!(view.items.is_empty());
    }

    #[test]
    fn lamp_delivery_is_the_secret_ending() {
        let mut world = load_world().unwrap();
        let mut view = View::new();
        world.quest_mut(SIDE_QUEST).unwrap().accept();
        world.player.add_item(Item::new("magic lamp", "An old brass lamp.", 4));
        auto_complete_quests(&mut world, &mut view).unwrap();
        assert!(!world.player.contains_item("magic lamp"));
        assert_eq!(world.status, GameStatus::Over(Ending::SecretEnding));
        assert_eq!(world.pending, Some(PendingPrompt::PlayAgain));
    }

    #[test]
    fn apple_in_tower_wins_unless_stranger_was_refused() {
        let mut world = load_world().unwrap();
        let mut view = View::new();
        world.player.add_item(Item::new("golden apple", "A shiny golden apple.", 2));
        check_victory(&mut world, &mut view).unwrap();
        assert!(world.is_running());

        world.move_player_to("tower");
        let mut declined = world.clone();
        check_victory(&mut world, &mut view).unwrap();
        assert_eq!(world.status, GameStatus::Over(Ending::Victory));

        declined.player_choice = PlayerChoice::Declined;
        check_victory(&mut declined, &mut view).unwrap();
        assert_eq!(declined.status, GameStatus::Over(Ending::BadEnding));
    }
}
