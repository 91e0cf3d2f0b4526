//! # tinyecs_sweeper
//!
//! Terminal grid-reveal puzzle running on the tinyecs scene and system
//! registries. Each cell is an entity; a system list relabels the board and
//! decides the outcome after every move.
//!
//! ## Turn Sequence
//!
//! 1. Print the board.
//! 2. Read an X and a Y coordinate from stdin.
//! 3. Flood-reveal from that cell, then tick the systems.

mod board;
mod config;
mod game;
mod systems;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::SweeperConfig;
use game::Game;

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tinyecs_sweeper=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let config = SweeperConfig::parse();
    config.validate()?;

    let mut game = Game::new(&config)?;
    let outcome = game::play(&mut game, &mut io::stdin().lock(), &mut io::stdout().lock())?;

    info!(?outcome, entities = game.scene().entity_count(), "game finished");
    Ok(())
}
