//! `repl::combat` module
//!
//! A fight is a series of prompts: each `attack` is one exchange of blows,
//! `run` retreats to the previous room. Damage is fixed by the attack stats.

use crate::health::LivingEntity;
use crate::repl::quest::end_game;
use crate::world::{CastleWorld, Ending, PendingPrompt};
use crate::{View, ViewItem};

use anyhow::{Context, Result, bail};
use log::info;
use variantly::Variantly;

/// What a single combat answer led to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Variantly)]
pub enum CombatOutcome {
    /// Both sides still standing; the prompt stays up.
    Ongoing,
    /// Neither `attack` nor `run`; nothing happened.
    Invalid,
    EnemyDefeated,
    Fled,
    PlayerDied,
}

/// Open a fight if a live enemy shares the player's room.
///
/// Returns true if combat started.
///
/// # Errors
/// - if the player's room is missing from the world
pub fn start_combat_if_enemy(world: &mut CastleWorld, view: &mut View) -> Result<bool> {
    let room = world.player_room_ref()?;
    let Some(enemy) = room.live_enemy() else {
        return Ok(false);
    };
    view.push(ViewItem::EnemyAppears(enemy.name.clone()));
    info!(
        "combat begins: {} ({} hp / {} atk) in ({})",
        enemy.name, enemy.health, enemy.attack, room.id
    );
    world.pending = Some(PendingPrompt::Combat);
    Ok(true)
}

/// Resolve one answer to the combat prompt.
///
/// # Errors
/// - if the player's room is missing, or has no enemy to fight
pub fn combat_round(world: &mut CastleWorld, view: &mut View, choice: &str) -> Result<CombatOutcome> {
    match choice.trim().to_lowercase().as_str() {
        "attack" => attack_round(world, view),
        "run" => flee(world, view),
        _ => {
            view.push(ViewItem::Error("Invalid action. Type 'attack' or 'run'.".to_string()));
            Ok(CombatOutcome::Invalid)
        },
    }
}

fn attack_round(world: &mut CastleWorld, view: &mut View) -> Result<CombatOutcome> {
    let player_attack = world.player.attack;
    let room = world
        .rooms
        .get_mut(&world.current_room)
        .with_context(|| format!("player room ({}) not found", world.current_room))?;
    let Some(enemy) = room.enemy.as_mut() else {
        world.pending = None;
        bail!("combat in ({}) with no enemy present", room.id);
    };

    enemy.damage(player_attack);
    let enemy_name = enemy.name.clone();
    view.push(ViewItem::PlayerAttack {
        enemy: enemy_name.clone(),
        damage: player_attack,
    });

    if !enemy.is_alive() {
        view.push(ViewItem::EnemyDefeated(enemy_name.clone()));
        info!("{enemy_name} defeated in ({})", room.id);
        room.enemy = None;
        world.pending = None;
        return Ok(CombatOutcome::EnemyDefeated);
    }

    let damage = enemy.attack;
    info!("{enemy_name} has {} hp left, strikes back for {damage}", enemy.health);
    world.player.damage(damage);
    view.push(ViewItem::EnemyAttack {
        enemy: enemy_name,
        damage,
        health: world.player.health,
    });

    if world.player.is_alive() {
        Ok(CombatOutcome::Ongoing)
    } else {
        world.pending = None;
        end_game(world, view, Ending::Death);
        Ok(CombatOutcome::PlayerDied)
    }
}

/// Retreat to the room the player came from (or stay put if there is none).
/// The enemy keeps whatever health it has left.
fn flee(world: &mut CastleWorld, view: &mut View) -> Result<CombatOutcome> {
    world.pending = None;
    view.push(ViewItem::Fled);
    if let Some(previous) = world.previous_room.clone() {
        info!("player fled ({}) for ({previous})", world.current_room);
        world.current_room = previous;
    }
    world.player_room_ref()?.show(view);
    Ok(CombatOutcome::Fled)
}
