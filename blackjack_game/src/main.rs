use anyhow::Context;
use blackjack_game::prelude::*;
use blackjack_lib::{BlackjackGame, BlackjackGameError};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();
    if args.no_color {
        colored::control::set_override(false);
    }

    let messages = match &args.messages {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading message templates from {}", path.display()))?;
            MessageTable::from_json(&json)
                .with_context(|| format!("parsing message templates in {}", path.display()))?
        }
        None => MessageTable::default(),
    };

    let mut input = ConsoleInput::stdin(messages.clone());
    let setup = match collect(&args, &mut input, &mut io::stdout()) {
        Ok(setup) => setup,
        Err(BlackjackGameError::InputClosed(reason)) => {
            log::warn!("input closed during setup: {}", reason);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    log::info!(
        "seating {} player(s) with ${} each",
        setup.names.len(),
        setup.starting_balance
    );

    let output = ConsoleOutput::new(messages, io::stdout(), !args.no_color);
    let mut game = BlackjackGame::new(
        setup.names,
        setup.starting_balance,
        args.config(),
        input,
        output,
    )?;

    let summary = match game.run() {
        Ok(summary) => summary,
        Err(BlackjackGameError::InputClosed(reason)) => {
            log::warn!("input closed, ending the game: {}", reason);
            game.summary()
        }
        Err(e) => return Err(e.into()),
    };

    write_summary(&summary, io::stdout().lock()).context("writing summary")?;
    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("creating summary file {}", path.display()))?;
        write_summary_json(&summary, BufWriter::new(file))
            .with_context(|| format!("writing summary file {}", path.display()))?;
        log::info!("summary written to {}", path.display());
    }
    Ok(())
}
