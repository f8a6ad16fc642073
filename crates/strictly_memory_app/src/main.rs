//! Strictly Memory - terminal pair-matching game

#![warn(missing_docs)]

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_memory_app::{GameConfig, ScoreRepository, run_tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            tiles,
            config,
            db_path,
            seed,
        } => {
            let config = GameConfig::load(&config)?.with_overrides(tiles, db_path, seed);
            run_tui(config).await
        }
        Command::Best { config, db_path } => print_best_scores(config, db_path),
    }
}

/// Print every stored best score
#[instrument(skip_all)]
fn print_best_scores(config: PathBuf, db_path: Option<String>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load(&config)?.with_overrides(None, db_path, None);
    let Some(repo) = ScoreRepository::open_existing(config.database_path().clone())? else {
        println!("No best scores yet.");
        return Ok(());
    };
    let rows = repo.list()?;
    info!(count = rows.len(), "Listing best scores");

    if rows.is_empty() {
        println!("No best scores yet.");
        return Ok(());
    }

    println!("{:>6}  {:>6}  {}", "Tiles", "Best", "Set at");
    for row in rows {
        println!(
            "{:>6}  {:>6}  {}",
            row.board_size(),
            row.score(),
            row.updated_at().format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
