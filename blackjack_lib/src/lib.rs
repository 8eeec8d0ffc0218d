//! Core rules engine for a terminal blackjack game: cards and decks, hand scoring, players and the
//! host, and the round controller that runs betting, dealing, turns and settlement.
//! The crate does no terminal I/O itself, every question and every announcement goes through
//! the [`PlayerInput`] and [`GameObserver`] traits.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod input;
pub mod outcome;
pub mod participant;
pub mod stats;

pub use card::{Card, Rank, Suit};
pub use config::{BlackjackGameConfig, BlackjackGameConfigBuilder};
pub use deck::Deck;
pub use error::BlackjackGameError;
pub use event::{GameEvent, GameObserver};
pub use game::{BlackjackGame, RoundPhase};
pub use hand::{compute_optimal_hand, Hand};
pub use input::{Action, Answer, PlayerInput, Prompt, MAX_PLAYERS};
pub use outcome::Outcome;
pub use participant::{BettingHand, HandResult, Host, Participant, Player};
pub use stats::{GameSummary, PlayerStats, PlayerSummary};

pub mod prelude {
    pub use super::{
        compute_optimal_hand, BlackjackGame, BlackjackGameConfig, BlackjackGameError, Card, Deck,
        GameEvent, GameObserver, GameSummary, Hand, Host, Outcome, Participant, Player,
        PlayerInput, Prompt, Rank, Suit,
    };
}
