//! Command-line interface for strictly_variants.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_variants::Variant;

/// Strictly Variants - multi-variant tic-tac-toe engine
#[derive(Parser, Debug)]
#[command(name = "strictly_variants")]
#[command(about = "Headless driver for the tic-tac-toe variant engines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play bot-vs-bot games and print the totals
    Play {
        /// Variant to play (overrides the config file)
        #[arg(short, long)]
        variant: Option<Variant>,

        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Seed for both bots (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to a session config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Print the final position of the last game
        #[arg(long)]
        show_board: bool,
    },

    /// List the available variants
    Variants,
}
