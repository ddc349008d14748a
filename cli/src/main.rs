use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use sapper_core::{BoardEngine, Difficulty};

mod command;
mod render;

use command::Command;

/// Clear the grid without stepping on a mine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Board preset: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed for reproducible mine layouts
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let mut engine = match cli.seed {
        Some(seed) => BoardEngine::with_seed(cli.difficulty, seed),
        None => BoardEngine::new(cli.difficulty),
    };
    log::info!("Started {} game", engine.difficulty());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render::board(&engine))?;
    writeln!(stdout, "{}", command::HELP)?;

    for line in stdin.lock().lines() {
        let line = line.context("could not read command")?;
        let parsed = match line.parse::<Command>() {
            Ok(parsed) => parsed,
            Err(err) => {
                writeln!(stdout, "{err}\n{}", command::HELP)?;
                continue;
            }
        };

        match parsed {
            Command::Quit => break,
            Command::New(difficulty) => {
                engine.new_game(difficulty.unwrap_or(engine.difficulty()));
            }
            Command::Reveal(row, col) => {
                let result = engine.reveal(row, col);
                log::debug!("reveal ({}, {}): {:?}", row, col, result.status);
                if let Some(message) = render::outcome(result.outcome) {
                    writeln!(stdout, "{message}")?;
                }
            }
            Command::Flag(row, col) => {
                let result = engine.toggle_flag(row, col);
                log::debug!("flag ({}, {}): {:?}", row, col, result.status);
            }
        }
        write!(stdout, "{}", render::board(&engine))?;
        stdout.flush()?;
    }

    Ok(())
}
