//! The output boundary. The game reports everything that happens as a [`GameEvent`] and leaves
//! wording and layout to the [`GameObserver`].

use crate::card::Card;
use crate::error::BlackjackGameError;
use crate::hand::Hand;
use crate::outcome::Outcome;
use crate::stats::GameSummary;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Welcome,
    RoundStarted { round: u32 },
    Balance { name: String, balance: u64 },
    /// The player ran out of money and left the table for good.
    PlayerExited { name: String },
    SkipRound { name: String },
    NoActivePlayers,
    DealingCards,
    HandDealt { name: String, hand: Hand },
    /// Only the first host card is visible until settlement.
    HostShowing { card: Card },
    Split { name: String },
    DoubledDown { name: String, bet: u64 },
    PlayingHand { name: String, hand_index: usize },
    DrawingCard,
    NewDeck,
    HandUpdated { name: String, hand_index: usize, hand: Hand },
    HostReveals { hand: Hand },
    HandSettled {
        name: String,
        hand_index: usize,
        score: u32,
        host_score: u32,
        outcome: Outcome,
        balance: u64,
    },
    RoundEnded { round: u32 },
    InvalidInput { error: BlackjackGameError },
    GameOver { summary: GameSummary },
}

pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

/// Collects every event, useful when nothing should be printed.
impl GameObserver for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}
