use crate::card::{Card, Rank, Suit};
use crate::error::BlackjackGameError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// An ordered pile of cards, the top of the deck is the end of `cards`.
/// Made of one or more canonical 52 card decks merged together.
pub struct Deck {
    cards: Vec<Card>,
    num_decks: usize,
    rng: StdRng,
}

impl Deck {
    /// A single canonical deck in construction order, not yet shuffled.
    pub fn new() -> Deck {
        Deck::with_decks(1)
    }

    /// `num_decks` canonical decks merged in construction order, not yet shuffled.
    /// A value of zero is treated as one deck.
    pub fn with_decks(num_decks: usize) -> Deck {
        Deck::with_rng(num_decks, StdRng::from_entropy())
    }

    /// Same as `Deck::with_decks` but every shuffle is reproducible for a given `seed`.
    pub fn seeded(num_decks: usize, seed: u64) -> Deck {
        Deck::with_rng(num_decks, StdRng::seed_from_u64(seed))
    }

    /// Builds a deck that deals exactly `draw_order`, first element first.
    pub fn stacked(draw_order: Vec<Card>) -> Deck {
        let mut cards = draw_order;
        cards.reverse();
        Deck {
            cards,
            num_decks: 1,
            rng: StdRng::from_entropy(),
        }
    }

    fn with_rng(num_decks: usize, rng: StdRng) -> Deck {
        let num_decks = num_decks.max(1);
        Deck {
            cards: Deck::canonical(num_decks),
            num_decks,
            rng,
        }
    }

    fn canonical(num_decks: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(52 * num_decks);
        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }
        cards
    }

    /// Uniformly permutes the cards that remain in the deck.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the top card.
    pub fn draw_one(&mut self) -> Result<Card, BlackjackGameError> {
        self.cards.pop().ok_or(BlackjackGameError::EmptyDeck)
    }

    /// Removes and returns the top two cards. Leaves the deck untouched if fewer than two remain.
    pub fn draw_two(&mut self) -> Result<(Card, Card), BlackjackGameError> {
        if self.cards.len() < 2 {
            return Err(BlackjackGameError::EmptyDeck);
        }
        let first = self.draw_one()?;
        let second = self.draw_one()?;
        Ok((first, second))
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    /// Throws away whatever is left, rebuilds every canonical deck and shuffles.
    pub fn reinitialize(&mut self) {
        log::info!("reinitializing {} deck(s)", self.num_decks);
        self.cards = Deck::canonical(self.num_decks);
        self.shuffle();
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}
