// SPDX-License-Identifier: MIT OR Apache-2.0

//! Go rules CLI - headless game driver
//!
//! Reads moves from stdin or a script file, feeds them through a rules
//! session with alternating turns and prints the board after every move.
//! Used for manual play and for replaying fixture sequences.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use gorules_cli::config::{self, CliConfig, FinishMode};
use gorules_cli::{input, render};
use gorules_core::{GameEvent, Play, Session, SessionError, SuicideRule};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "gorules-cli",
    about = "Play or replay a Go game against the rules engine",
    version
)]
struct Args {
    /// Board size (overrides the config file)
    #[clap(short, long)]
    size: Option<u8>,

    /// Read moves from this file instead of stdin
    #[clap(long)]
    script: Option<PathBuf>,

    /// Config file location (defaults to the platform config directory)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Suicide handling (overrides the config file)
    #[clap(long, value_enum)]
    suicide: Option<SuicideArg>,

    /// End-of-game policy (overrides the config file)
    #[clap(long, value_enum)]
    finish: Option<FinishMode>,

    /// Print only the final board
    #[clap(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SuicideArg {
    /// Reject suicide outright
    Forbidden,
    /// Remove the group and let superko decide
    Allowed,
}

impl From<SuicideArg> for SuicideRule {
    fn from(arg: SuicideArg) -> Self {
        match arg {
            SuicideArg::Forbidden => SuicideRule::Forbidden,
            SuicideArg::Allowed => SuicideRule::Allowed,
        }
    }
}

fn init_logging(level: &str, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialize logging: {}", err))
}

fn apply_overrides(mut config: CliConfig, args: &Args) -> CliConfig {
    if let Some(size) = args.size {
        config.board_size = size;
    }
    if let Some(suicide) = args.suicide {
        config.suicide = suicide.into();
    }
    if let Some(finish) = args.finish {
        config.finish = finish;
    }
    config
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = config::load_config(args.config.as_deref())?;
    let config = apply_overrides(loaded.config, &args);

    if let Err(e) = init_logging(&config.log_level, args.debug) {
        eprintln!("Warning: {}", e);
    }
    if loaded.created {
        tracing::info!("Config file not found, created default at: {}", loaded.path.display());
    } else {
        tracing::info!("Loaded config from: {}", loaded.path.display());
    }
    tracing::debug!(?config, "Configuration loaded");

    let session = Session::new(config.board_size, config.ruleset(), config.finish_policy())
        .with_context(|| format!("Cannot start a game of size {}", config.board_size))?;

    let reader: Box<dyn AsyncBufRead + Unpin> = match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    run_game_loop(session, reader, args.quiet).await
}

/// Run the main game loop
async fn run_game_loop(
    mut session: Session,
    reader: Box<dyn AsyncBufRead + Unpin>,
    quiet: bool,
) -> Result<()> {
    let mut lines = reader.lines();

    if !quiet {
        print_session(&session);
    }

    while !session.is_finished() {
        if !quiet {
            println!(
                "\n{} to move. Enter a move (e.g., 'D4', '3,3'), 'pass', or 'resign':",
                session.to_move()
            );
        }

        let line = tokio::select! {
            _ = signal::ctrl_c() => {
                println!("\nReceived Ctrl+C, shutting down gracefully...");
                break;
            }
            result = lines.next_line() => match result.context("Error reading input")? {
                Some(line) => line,
                None => break, // EOF
            },
        };

        // Blank lines and '#' comments make fixture scripts readable.
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let play = match input::parse_play(line, session.state().board().dim()) {
            Ok(play) => play,
            Err(e) => {
                eprintln!("Invalid move: {}", e);
                continue;
            }
        };

        let color = session.to_move();
        match session.play(color, play) {
            Ok(events) => {
                report_events(&events);
                if !quiet {
                    print_session(&session);
                }
            }
            Err(SessionError::Rejected(rejection)) => {
                println!(
                    "Illegal move for {}: {} ({:?} check)",
                    color,
                    rejection,
                    rejection.stage()
                );
            }
            Err(SessionError::Engine(err)) => {
                tracing::error!("Rules engine failure: {}", err);
                return Err(anyhow!(err));
            }
            Err(err) => {
                eprintln!("{}", err);
            }
        }
    }

    if quiet {
        print_session(&session);
    }
    match session.finish_reason() {
        Some(reason) => println!("Game finished: {:?}", reason),
        None => println!("Game stopped after {} moves", session.moves().len()),
    }

    Ok(())
}

fn report_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::MoveMade { play: Play::Pass, by } => println!("{} passes", by),
            GameEvent::MoveMade { play: Play::Resign, by } => println!("{} resigns", by),
            GameEvent::MoveMade { .. } => {}
            GameEvent::StonesCaptured { positions, player } => {
                println!("{} loses {} stone(s)", player, positions.len());
            }
            GameEvent::GameFinished { .. } => {}
        }
    }
}

/// Print the current game state
fn print_session(session: &Session) {
    println!("\n{}", render::render_status(session));
    println!("{}", render::render_board(session.state().board()));
}
