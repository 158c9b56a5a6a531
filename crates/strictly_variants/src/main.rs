//! Strictly Variants - headless CLI
//!
//! Runs bot-vs-bot matches through the session API.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_variants::{SessionConfig, Variant, run_match};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            variant,
            games,
            seed,
            config,
            json,
            show_board,
        } => run_play(variant, games, seed, config, json, show_board),
        Command::Variants => {
            list_variants();
            Ok(())
        }
    }
}

/// Plays a bot-vs-bot match and prints the summary
#[instrument]
fn run_play(
    variant: Option<Variant>,
    games: u32,
    seed: Option<u64>,
    config: Option<PathBuf>,
    json: bool,
    show_board: bool,
) -> Result<()> {
    let mut session_config = match config {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(variant) = variant {
        session_config = session_config.with_variant(variant);
    }
    if seed.is_some() {
        session_config = session_config.with_seed(seed);
    }

    info!(variant = %session_config.variant(), games, "Starting match");
    let summary = run_match(&session_config, games)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Variant:    {}", summary.variant());
        println!("Games:      {}", summary.games());
        println!("X wins:     {}", summary.x_wins());
        println!("O wins:     {}", summary.o_wins());
        println!("Draws:      {}", summary.draws());
        println!("Unfinished: {}", summary.unfinished());
        println!("Moves:      {}", summary.moves());
    }
    if show_board && let Some(board) = summary.last_board() {
        println!("\n{}", board.display());
    }
    Ok(())
}

fn list_variants() {
    for variant in Variant::iter() {
        println!("{:<16} {}", variant.to_string(), variant.description());
    }
}
