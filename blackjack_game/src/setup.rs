//! Collects the table setup (players and starting balance) from the command line, asking at
//! the terminal for anything that was left out.

use crate::cli::Args;
use crate::console::ConsoleInput;
use crate::messages::MessageKind;
use blackjack_lib::input::{parse_initial_balance, parse_player_count, validate_player_count};
use blackjack_lib::BlackjackGameError;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSetup {
    pub names: Vec<String>,
    pub starting_balance: u64,
}

/// Builds the setup from `args`. Missing values are asked for through `input`, recoverable
/// mistakes are written to `errors` and asked again.
pub fn collect<R, W, E>(
    args: &Args,
    input: &mut ConsoleInput<R, W>,
    errors: &mut E,
) -> Result<TableSetup, BlackjackGameError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let names = if !args.names.is_empty() {
        validate_player_count(args.names.len())?;
        args.names.iter().map(|n| n.trim().to_string()).collect()
    } else {
        let count = match args.players {
            Some(count) => validate_player_count(count)?,
            None => {
                let prompt = input.player_count_prompt();
                input.ask_until(&prompt, errors, parse_player_count)?
            }
        };
        let mut names = Vec::with_capacity(count);
        for number in 1..=count {
            let prompt = input
                .messages()
                .render(MessageKind::PlayerNamePrompt, &[("number", number.to_string())]);
            let name = input.ask(&prompt)?;
            names.push(name);
        }
        names
    };

    let names = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| match name.is_empty() {
            true => format!("Player {}", i + 1),
            false => name,
        })
        .collect();

    let starting_balance = match args.balance {
        Some(0) => return Err(BlackjackGameError::InvalidInitialBalance),
        Some(balance) => balance,
        None => {
            let prompt = input
                .messages()
                .render(MessageKind::InitialBalancePrompt, &[]);
            input.ask_until(&prompt, errors, parse_initial_balance)?
        }
    };

    Ok(TableSetup {
        names,
        starting_balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageTable;
    use clap::Parser;
    use std::io::{self, Cursor};

    fn input(lines: &str) -> ConsoleInput<Cursor<String>, io::Sink> {
        ConsoleInput::from_reader(MessageTable::new(), Cursor::new(lines.to_string()), io::sink())
    }

    #[test]
    fn everything_from_flags() {
        let args = Args::parse_from(["blackjack", "--names", "Alice,Bob", "--balance", "300"]);
        let setup = collect(&args, &mut input(""), &mut io::sink()).unwrap();
        assert_eq!(setup.names, vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(setup.starting_balance, 300);
    }

    #[test]
    fn everything_prompted() {
        let args = Args::parse_from(["blackjack"]);
        let mut errors = Vec::new();
        let setup = collect(&args, &mut input("9\n2\nAlice\n\nnope\n500\n"), &mut errors).unwrap();
        assert_eq!(setup.names, vec!["Alice".to_string(), "Player 2".to_string()]);
        assert_eq!(setup.starting_balance, 500);
        assert_eq!(String::from_utf8(errors).unwrap().lines().count(), 2);
    }

    #[test]
    fn bad_flags_are_errors() {
        let args = Args::parse_from(["blackjack", "--players", "7"]);
        assert!(matches!(
            collect(&args, &mut input(""), &mut io::sink()),
            Err(BlackjackGameError::InvalidPlayerCount { got: 7, .. })
        ));
        let args = Args::parse_from(["blackjack", "--players", "1", "--balance", "0"]);
        assert_eq!(
            collect(&args, &mut input("Alice\n"), &mut io::sink()),
            Err(BlackjackGameError::InvalidInitialBalance)
        );
    }

    #[test]
    fn closed_input_during_setup() {
        let args = Args::parse_from(["blackjack"]);
        assert!(matches!(
            collect(&args, &mut input(""), &mut io::sink()),
            Err(BlackjackGameError::InputClosed(_))
        ));
    }
}
