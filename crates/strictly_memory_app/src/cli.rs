//! Command-line interface for strictly_memory.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use strictly_memory_app::DEFAULT_CONFIG_FILE;

/// Strictly Memory - find the pairs in as few reveals as you can
#[derive(Parser, Debug)]
#[command(name = "strictly_memory")]
#[command(about = "Terminal pair-matching memory game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Number of tiles (even, 4-100). Asked on screen if omitted.
        #[arg(short, long)]
        tiles: Option<usize>,

        /// Path to config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db_path: Option<String>,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print best scores per board size
    Best {
        /// Path to config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Path to the database file
        #[arg(long)]
        db_path: Option<String>,
    },
}
