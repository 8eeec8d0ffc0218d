//! Message templates for everything the terminal prints, keyed by what is being announced.
//! Placeholders look like `{name}` and are filled in by [`MessageTable::render`].

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Welcome,
    Separator,
    RoundStarted,
    Balance,
    PlayerExited,
    SkipRound,
    NoActivePlayers,
    DealingCards,
    HandDealt,
    HostShowing,
    Split,
    DoubledDown,
    PlayingHand,
    DrawingCard,
    NewDeck,
    HandUpdated,
    HostReveals,
    PlayerBusts,
    HostBusts,
    PlayerWins,
    HostWins,
    Tie,
    InvalidInput,
    GameOver,
    GameOverNoFunds,
    BetPrompt,
    ActionPrompt,
    SplitPrompt,
    DoubleDownPrompt,
    PlayerCountPrompt,
    PlayerNamePrompt,
    InitialBalancePrompt,
}

lazy_static! {
    static ref DEFAULT_MESSAGES: HashMap<MessageKind, &'static str> = {
        use MessageKind::*;
        HashMap::from([
            (Welcome, "Welcome to Blackjack!"),
            (Separator, "----------------------------------------"),
            (RoundStarted, "Round {round}:"),
            (Balance, "{name}'s balance: ${balance}"),
            (PlayerExited, "{name} has exited the game due to insufficient funds."),
            (SkipRound, "{name} is skipping this round."),
            (NoActivePlayers, "No active players for this round."),
            (DealingCards, "Dealing cards..."),
            (HandDealt, "{name}'s hand: {hand}"),
            (HostShowing, "{host}'s hand: {card} ?"),
            (Split, "{name} has split."),
            (DoubledDown, "{name} has doubled down. New bet: ${bet}"),
            (PlayingHand, "Playing hand {hand} for {name}"),
            (DrawingCard, "Drawing card..."),
            (NewDeck, "New deck is being used"),
            (HandUpdated, "{name}'s hand: {hand} ({value})"),
            (HostReveals, "{host} reveals hand: {hand} ({value})"),
            (PlayerBusts, "{name} busts with {score}! {host} wins. Balance: ${balance}"),
            (HostBusts, "{host} busts with {host_score}! {name} wins. Balance: ${balance}"),
            (PlayerWins, "{name} wins with {score} against {host_score}! Balance: ${balance}"),
            (
                HostWins,
                "{host} wins with {host_score} against {score}. {name}'s balance: ${balance}",
            ),
            (Tie, "{name} and {host} tie at {score}. Balance: ${balance}"),
            (InvalidInput, "{error}"),
            (GameOver, "Game over."),
            (GameOverNoFunds, "All players have insufficient funds to continue. Game over."),
            (BetPrompt, "{name}, how much do you want to bet? (0 to skip, up to ${balance})"),
            (ActionPrompt, "{name}, hand {hand}: do you want to hit (h) or stand (s)?"),
            (SplitPrompt, "{name}, do you want to split? (yes/no)"),
            (DoubleDownPrompt, "{name}, do you want to double down? (yes/no)"),
            (PlayerCountPrompt, "Enter the number of players (1-{max})"),
            (PlayerNamePrompt, "Enter name for player {number}"),
            (InitialBalancePrompt, "Enter initial balance for players"),
        ])
    };
}

/// The templates in use, the built-in defaults with any overrides applied on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTable {
    templates: HashMap<MessageKind, String>,
}

impl MessageTable {
    pub fn new() -> MessageTable {
        let templates = DEFAULT_MESSAGES
            .iter()
            .map(|(kind, template)| (*kind, template.to_string()))
            .collect();
        MessageTable { templates }
    }

    /// Defaults overridden by the templates in `overrides`.
    pub fn with_overrides(overrides: HashMap<MessageKind, String>) -> MessageTable {
        let mut table = MessageTable::new();
        table.templates.extend(overrides);
        table
    }

    /// Reads overrides from a JSON object such as `{"welcome": "Hi!"}`. Kinds that are not
    /// mentioned keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<MessageTable> {
        let overrides: HashMap<MessageKind, String> = serde_json::from_str(json)?;
        Ok(MessageTable::with_overrides(overrides))
    }

    pub fn template(&self, kind: MessageKind) -> &str {
        self.templates.get(&kind).map(String::as_str).unwrap_or("")
    }

    /// Fills every `{key}` of the template for `kind` with its value from `params`.
    pub fn render(&self, kind: MessageKind, params: &[(&str, String)]) -> String {
        let mut text = self.template(kind).to_string();
        for (key, value) in params {
            text = text.replace(&format!("{{{}}}", key), value);
        }
        text
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        MessageTable::new()
    }
}
