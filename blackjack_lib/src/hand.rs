use crate::card::Card;
use serde::Serialize;
use std::fmt::Display;

/// Returns `(total, soft_aces)`: the best total for `cards` and how many Aces still count 11.
fn optimal_total(cards: &[Card]) -> (u32, u32) {
    let mut total: u32 = cards.iter().map(|c| c.value()).sum();
    let mut soft_aces = cards.iter().filter(|c| c.is_ace()).count() as u32;
    while total > 21 && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    (total, soft_aces)
}

/// Computes the best blackjack total for `cards`. Every Ace starts at 11 and is demoted to 1,
/// one at a time, while the total is over 21. An empty slice scores 0.
pub fn compute_optimal_hand(cards: &[Card]) -> u32 {
    optimal_total(cards).0
}

/// An ordered run of cards held by one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Takes the last card out of the hand, used when splitting.
    pub(crate) fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u32 {
        compute_optimal_hand(&self.cards)
    }

    /// A hand is soft while one of its Aces is still counted as 11.
    pub fn is_soft(&self) -> bool {
        optimal_total(&self.cards).1 > 0
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Exactly two cards of the same rank.
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Formats the value of the hand, soft totals are shown as `hard/soft`.
    pub fn formatted_value(&self) -> String {
        let total = self.value();
        if self.is_soft() {
            format!("{}/{}", total - 10, total)
        } else {
            format!("{}", total)
        }
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "{}", cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use proptest::prelude::*;

    fn hand(ranks: &[Rank]) -> Hand {
        ranks.iter().map(|r| Card::new(Suit::Spade, *r)).collect()
    }

    #[test]
    fn empty_hand_scores_zero() {
        assert_eq!(Hand::new().value(), 0);
        assert_eq!(compute_optimal_hand(&[]), 0);
    }

    #[test]
    fn known_totals() {
        assert_eq!(hand(&[Rank::Ten, Rank::King]).value(), 20);
        assert_eq!(hand(&[Rank::Ace, Rank::King]).value(), 21);
        assert_eq!(hand(&[Rank::Ace, Rank::Ace, Rank::Nine]).value(), 21);
        assert_eq!(hand(&[Rank::Ten, Rank::Ten, Rank::Five]).value(), 25);
    }

    #[test]
    fn two_aces_score_twelve() {
        assert_eq!(hand(&[Rank::Ace, Rank::Ace]).value(), 12);
    }

    #[test]
    fn every_ace_can_be_demoted() {
        let h = hand(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace, Rank::Nine, Rank::Nine]);
        assert_eq!(h.value(), 22);
        assert!(h.is_bust());
    }

    #[test]
    fn soft_and_hard_totals() {
        let soft = hand(&[Rank::Ace, Rank::Six]);
        assert!(soft.is_soft());
        assert_eq!(soft.formatted_value(), "7/17");

        let hard = hand(&[Rank::Ace, Rank::Six, Rank::Ten]);
        assert!(!hard.is_soft());
        assert_eq!(hard.formatted_value(), "17");
    }

    #[test]
    fn pairs_match_on_rank() {
        assert!(hand(&[Rank::King, Rank::King]).is_pair());
        assert!(!hand(&[Rank::King, Rank::Queen]).is_pair());
        assert!(!hand(&[Rank::Five, Rank::Five, Rank::Five]).is_pair());
    }

    #[test]
    fn display_joins_cards() {
        let h: Hand = [
            Card::new(Suit::Heart, Rank::Ace),
            Card::new(Suit::Club, Rank::Ten),
        ]
        .into_iter()
        .collect();
        assert_eq!(h.to_string(), "A♥ 10♣");
    }

    fn arb_card() -> impl Strategy<Value = Card> {
        (0..4usize, 0..13usize).prop_map(|(s, r)| Card::new(Suit::ALL[s], Rank::ALL[r]))
    }

    proptest! {
        #[test]
        fn score_ignores_card_order(
            mut cards in prop::collection::vec(arb_card(), 0..12),
            seed in any::<u64>()
        ) {
            let before = compute_optimal_hand(&cards);
            let len = cards.len();
            if len > 1 {
                cards.rotate_left((seed as usize) % len);
                cards.swap(0, len - 1);
            }
            prop_assert_eq!(compute_optimal_hand(&cards), before);
        }

        #[test]
        fn aces_only_demote_when_needed(cards in prop::collection::vec(arb_card(), 1..8)) {
            let total = compute_optimal_hand(&cards);
            let hard: u32 = cards.iter().map(|c| if c.is_ace() { 1 } else { c.value() }).sum();
            prop_assert!(total >= hard);
            if hard <= 21 {
                prop_assert!(total <= 21);
            } else {
                prop_assert_eq!(total, hard);
            }
        }
    }
}
