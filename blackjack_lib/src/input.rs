//! The input boundary. The game asks a [`PlayerInput`] for raw text and validates it here, so
//! any front end (terminal, scripted, network) only has to move strings around.

use crate::error::BlackjackGameError;
use std::str::FromStr;

/// Most seats at one table.
pub const MAX_PLAYERS: usize = 6;

/// A question the game needs answered before it can continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Bet { name: String, balance: u64 },
    Action { name: String, hand_index: usize },
    Split { name: String },
    DoubleDown { name: String },
}

/// Supplies the raw responses to prompts.
pub trait PlayerInput {
    /// Returns the response to `prompt`. Errors only when no more input can ever arrive.
    fn respond(&mut self, prompt: &Prompt) -> Result<String, BlackjackGameError>;
}

/// Hit or stand, chosen in the hit/stand loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Hit,
    Stand,
}

impl FromStr for Action {
    type Err = BlackjackGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "h" | "hit" => Ok(Action::Hit),
            "s" | "stand" => Ok(Action::Stand),
            _ => Err(BlackjackGameError::InvalidAction(s.trim().to_string())),
        }
    }
}

/// A yes/no answer to a split or double down offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn is_yes(&self) -> bool {
        *self == Answer::Yes
    }
}

impl FromStr for Answer {
    type Err = BlackjackGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Answer::Yes),
            "n" | "no" => Ok(Answer::No),
            _ => Err(BlackjackGameError::InvalidAnswer(s.trim().to_string())),
        }
    }
}

fn parse_number(raw: &str) -> Result<u64, BlackjackGameError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| BlackjackGameError::NotANumber(raw.trim().to_string()))
}

/// Parses a bet, which must lie in `[0, balance]`. Zero means sitting the round out.
pub fn parse_bet(raw: &str, balance: u64) -> Result<u64, BlackjackGameError> {
    let trimmed = raw.trim();
    if matches!(trimmed.parse::<i64>(), Ok(n) if n < 0) {
        return Err(BlackjackGameError::InvalidBet { max: balance });
    }
    let bet = parse_number(trimmed)?;
    if bet > balance {
        return Err(BlackjackGameError::InvalidBet { max: balance });
    }
    Ok(bet)
}

pub fn validate_player_count(count: usize) -> Result<usize, BlackjackGameError> {
    if (1..=MAX_PLAYERS).contains(&count) {
        Ok(count)
    } else {
        Err(BlackjackGameError::InvalidPlayerCount {
            got: count,
            max: MAX_PLAYERS,
        })
    }
}

pub fn parse_player_count(raw: &str) -> Result<usize, BlackjackGameError> {
    let count = usize::try_from(parse_number(raw)?).unwrap_or(usize::MAX);
    validate_player_count(count)
}

/// Starting balances must be a positive whole number.
pub fn parse_initial_balance(raw: &str) -> Result<u64, BlackjackGameError> {
    let trimmed = raw.trim();
    if matches!(trimmed.parse::<i64>(), Ok(n) if n < 0) {
        return Err(BlackjackGameError::InvalidInitialBalance);
    }
    match parse_number(trimmed)? {
        0 => Err(BlackjackGameError::InvalidInitialBalance),
        balance => Ok(balance),
    }
}
