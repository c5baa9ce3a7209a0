//! `repl::inventory` module
//!
//! Handlers for taking, dropping, using, and listing items.

use crate::item::ItemHolder;
use crate::view::InventoryLine;
use crate::world::{AMULET, AMULET_BONUS, CastleWorld, HEALTH_POTION};
use crate::{View, ViewItem};

use anyhow::{Context, Result, anyhow};
use log::info;

/// Pick up an item from the current room, if it's there and the player can carry it.
///
/// An item with an effect fires it once on pickup.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn get_handler(world: &mut CastleWorld, view: &mut View, item_name: &str) -> Result<()> {
    let room = world
        .rooms
        .get_mut(&world.current_room)
        .with_context(|| format!("player room ({}) not found", world.current_room))?;

    let Some(item) = room.find_item(item_name) else {
        view.push(ViewItem::ActionFailure("That item is not here.".to_string()));
        return Ok(());
    };
    if !world.player.can_carry(item) {
        view.push(ViewItem::ActionFailure(
            "You can't carry any more weight. Consider dropping something.".to_string(),
        ));
        info!(
            "pickup of '{item_name}' refused: {} + {} > {}",
            world.player.carry_weight(),
            item.weight,
            world.player.max_weight
        );
        return Ok(());
    }

    let item = room
        .remove_item(item_name)
        .ok_or_else(|| anyhow!("item '{item_name}' vanished from ({})", room.id))?;
    view.push(ViewItem::ActionSuccess(format!("You have picked up the {}.", item.name)));
    info!("player picked up '{}' in ({})", item.name, room.id);
    for line in item.use_on(&mut world.player) {
        view.push(ViewItem::ItemEffect(line));
    }
    world.player.add_item(item);
    Ok(())
}

/// Drop an item into the current room. Dropping the amulet takes its bonus back.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn drop_handler(world: &mut CastleWorld, view: &mut View, item_name: &str) -> Result<()> {
    let room = world
        .rooms
        .get_mut(&world.current_room)
        .with_context(|| format!("player room ({}) not found", world.current_room))?;

    let Some(item) = world.player.remove_item(item_name) else {
        view.push(ViewItem::ActionFailure("You don't have that item.".to_string()));
        return Ok(());
    };
    view.push(ViewItem::ActionSuccess(format!("You have dropped the {}.", item.name)));
    info!("player dropped '{}' in ({})", item.name, room.id);
    if item.name == AMULET {
        world.player.attack -= AMULET_BONUS;
        view.push(ViewItem::ItemEffect(format!(
            "You feel your power wane. Your attack decreases by {AMULET_BONUS}."
        )));
    }
    room.add_item(item);
    Ok(())
}

/// Use an item from the inventory. Its effect fires every time; only the health
/// potion is used up.
///
/// # Errors
/// Currently infallible; returns `Result` to match the other handlers.
pub fn use_handler(world: &mut CastleWorld, view: &mut View, item_name: &str) -> Result<()> {
    let Some(item) = world.player.find_item(item_name).cloned() else {
        view.push(ViewItem::ActionFailure("You don't have that item.".to_string()));
        return Ok(());
    };

    let lines = item.use_on(&mut world.player);
    if lines.is_empty() {
        view.push(ViewItem::ActionFailure(format!(
            "Nothing happens when you use the {}.",
            item.name
        )));
    }
    for line in lines {
        view.push(ViewItem::ItemEffect(line));
    }
    if item.name == HEALTH_POTION {
        world.player.remove_item(HEALTH_POTION);
        info!("health potion consumed");
    }
    Ok(())
}

/// Show health, attack and what the player is carrying.
pub fn inventory_handler(world: &CastleWorld, view: &mut View) {
    let player = &world.player;
    view.push(ViewItem::Inventory {
        health: player.health,
        attack: player.attack,
        items: player
            .inventory
            .iter()
            .map(|item| InventoryLine {
                name: item.name.clone(),
                weight: item.weight,
            })
            .collect(),
        total_weight: player.carry_weight(),
        max_weight: player.max_weight,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_world;
    use crate::player::START_ATTACK;

    fn world_in(room: &str) -> CastleWorld {
        let mut world = load_world().unwrap();
        world.move_player_to(room);
        world
    }

    #[test]
    fn get_moves_item_from_room_to_pack() {
        let mut world = world_in("library");
        let mut view = View::new();
        get_handler(&mut world, &mut view, "spellbook").unwrap();
        assert!(world.player.contains_item("spellbook"));
        assert!(!world.rooms["library"].contains_item("spellbook"));
        assert_eq!(world.player.carry_weight(), 5);
    }

    #[test]
    fn get_missing_item_reports_not_here() {
        let mut world = world_in("library");
        let mut view = View::new();
        get_handler(&mut world, &mut view, "sword").unwrap();
        assert!(view.contains(|item| *item == ViewItem::ActionFailure("That item is not here.".into())));
        assert!(world.player.inventory.is_empty());
    }

    #[test]
    fn overweight_pickup_leaves_item_in_room() {
        let mut world = world_in("armory");
        world.player.max_weight = 9;
        let mut view = View::new();
        get_handler(&mut world, &mut view, "sword").unwrap();
        assert!(world.rooms["armory"].contains_item("sword"));
        assert!(world.player.inventory.is_empty());
        assert!(view.lines().iter().any(|line| line.starts_with("You can't carry any more weight")));
    }

    #[test]
    fn amulet_gives_on_pickup_and_takes_on_drop() {
        let mut world = world_in("mystic_chamber");
        let mut view = View::new();
        get_handler(&mut world, &mut view, "mysterious amulet").unwrap();
        assert_eq!(world.player.attack, START_ATTACK + AMULET_BONUS);
        drop_handler(&mut world, &mut view, "mysterious amulet").unwrap();
        assert_eq!(world.player.attack, START_ATTACK);
        assert!(world.rooms["mystic_chamber"].contains_item("mysterious amulet"));
    }

    #[test]
    fn drop_unknown_item_is_refused() {
        let mut world = world_in("library");
        let mut view = View::new();
        drop_handler(&mut world, &mut view, "spellbook").unwrap();
        assert!(view.contains(|item| *item == ViewItem::ActionFailure("You don't have that item.".into())));
    }

    #[test]
    fn potion_heals_on_pickup_and_again_when_used_up() {
        let mut world = world_in("library");
        let mut view = View::new();
        get_handler(&mut world, &mut view, "health potion").unwrap();
        assert_eq!(world.player.health, 130);
        use_handler(&mut world, &mut view, "health potion").unwrap();
        assert_eq!(world.player.health, 160);
        assert!(!world.player.contains_item("health potion"));
    }

    #[test]
    fn reusable_items_reapply_every_use() {
        let mut world = world_in("crypt");
        world.rooms.get_mut("crypt").unwrap().enemy = None;
        let mut view = View::new();
        get_handler(&mut world, &mut view, "ancient sword").unwrap();
        use_handler(&mut world, &mut view, "ancient sword").unwrap();
        use_handler(&mut world, &mut view, "ancient sword").unwrap();
        assert_eq!(world.player.attack, START_ATTACK + 60);
        assert!(world.player.contains_item("ancient sword"));
    }

    #[test]
    fn inert_item_use_says_nothing_happens() {
        let mut world = world_in("library");
        let mut view = View::new();
        get_handler(&mut world, &mut view, "spellbook").unwrap();
        use_handler(&mut world, &mut view, "spellbook").unwrap();
        assert!(view.lines().contains(&"Nothing happens when you use the spellbook.".to_string()));
    }

    #[test]
    fn inventory_lists_weights() {
        let mut world = world_in("library");
        let mut view = View::new();
        get_handler(&mut world, &mut view, "spellbook").unwrap();
        let mut view = View::new();
        inventory_handler(&world, &mut view);
        let lines = view.lines();
        assert!(lines.contains(&"- spellbook (Weight: 5)".to_string()));
        assert!(lines.contains(&"Total carry weight: 5/20".to_string()));
    }
}
