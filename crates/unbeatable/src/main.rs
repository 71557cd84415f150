//! Unbeatable - play tic-tac-toe in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use unbeatable::{HostConfig, JsonFileStore, Session};
use unbeatable_tictactoe::{ScoreRecord, Scoreboard};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Play {
        delay_ms: None,
        first: None,
    });

    match command {
        Command::Play { delay_ms, first } => {
            let config = HostConfig::load_or_default(&cli.config)?.with_overrides(
                delay_ms,
                cli.scores.clone(),
                first,
            );
            run_play(config).await
        }
        Command::Scores => {
            let config = HostConfig::load_or_default(&cli.config)?.with_overrides(
                None,
                cli.scores.clone(),
                None,
            );
            print_scores(&config)
        }
        Command::ClearScores => {
            let config = HostConfig::load_or_default(&cli.config)?.with_overrides(
                None,
                cli.scores.clone(),
                None,
            );
            clear_scores(&config)
        }
    }
}

/// Run the interactive game on stdin/stdout
#[instrument(skip_all)]
async fn run_play(config: HostConfig) -> Result<()> {
    info!(score_file = %config.score_file().display(), "Starting game");

    let store = JsonFileStore::open(config.score_file())?;
    let mut session = Session::new(
        store,
        *config.first_mover(),
        config.reply_delay(),
        rand::rng(),
        std::io::stdout(),
    );

    println!("{}", unbeatable::HELP);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin).await
}

/// Print both win counters
#[instrument(skip_all)]
fn print_scores(config: &HostConfig) -> Result<()> {
    let scoreboard = Scoreboard::new(JsonFileStore::open(config.score_file())?);
    let tally = scoreboard.tally()?;
    println!(
        "Human (X) {}  vs  Computer (O) {}",
        tally.human_wins(),
        tally.computer_wins()
    );
    Ok(())
}

/// Remove both win counters
#[instrument(skip_all)]
fn clear_scores(config: &HostConfig) -> Result<()> {
    let mut scoreboard = Scoreboard::new(JsonFileStore::open(config.score_file())?);
    scoreboard.clear_scores()?;
    println!("Scores cleared.");
    Ok(())
}
