#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Hunt the Wumpus in a terminal.

mod game;
mod prompt;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use hunt_system_turn::{Config, Session};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::game::Console;

/// Hunt the wumpus through a cave of twenty rooms.
#[derive(Debug, Parser)]
#[command(name = "hunt-the-wumpus", version, about)]
struct CliArgs {
    /// Pass `cheat` to reveal where every hazard lurks.
    mode: Option<String>,
}

impl CliArgs {
    fn config(&self) -> Config {
        Config {
            cheat_mode: self
                .mode
                .as_deref()
                .map_or(false, |mode| mode.eq_ignore_ascii_case("cheat")),
        }
    }
}

/// Entry point for the Hunt the Wumpus command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.config();
    info!(cheat_mode = config.cheat_mode, "starting session");

    let mut session = Session::initialize(config, ChaCha8Rng::from_entropy())
        .context("failed to set up the cave")?;
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    game::run(&mut session, &mut console)
}
