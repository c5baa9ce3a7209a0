#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Castle **
//! A text adventure in a castle of riddles, relics and monsters.

use castle_engine::{GameConfig, View, ViewItem, load_world, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    let config = GameConfig::load().context("while loading game configuration")?;
    info!("Start: loading castle world...");
    let mut world = load_world().context("while loading CastleWorld")?;
    info!("CastleWorld loaded successfully.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("flushing stdout")?;
    info!("Starting the game!");

    println!("{:^80}", "THE CASTLE".bright_yellow().underline());
    println!("\n{}\n", "Welcome to the Adventure Game!".bold());

    let mut view = View::new();
    world.player_room_ref()?.show(&mut view);
    view.push(ViewItem::Instructions);
    view.flush();

    run_repl(&mut world, &config)
}
