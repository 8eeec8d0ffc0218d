use crate::card::Card;
use crate::error::BlackjackGameError;
use crate::hand::Hand;
use crate::outcome::Outcome;
use std::fmt::Display;

/// What the host and the players have in common: they hold hands and take cards.
pub trait Participant {
    fn name(&self) -> &str;

    /// The hand at `hand_index`, `None` if it does not exist.
    fn hand(&self, hand_index: usize) -> Option<&Hand>;

    fn num_hands(&self) -> usize;

    /// Appends one card to the hand at `hand_index`.
    fn hit(&mut self, card: Card, hand_index: usize) -> Result<(), BlackjackGameError>;

    /// Puts the two dealt cards into hand 0, which must be empty.
    fn receive_initial_hand(&mut self, first: Card, second: Card) -> Result<(), BlackjackGameError>;

    /// Back to a single empty hand.
    fn reset_hand(&mut self);

    /// Score of the hand at `hand_index`, 0 for a hand that does not exist.
    fn score(&self, hand_index: usize) -> u32 {
        self.hand(hand_index).map(Hand::value).unwrap_or(0)
    }
}

/// A hand paired with the bet riding on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BettingHand {
    pub hand: Hand,
    pub bet: u64,
}

/// The result of settling one hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub hand_index: usize,
    pub score: u32,
    pub bet: u64,
    pub outcome: Outcome,
    pub payout: u64,
    /// The player's balance right after this hand's payout was credited.
    pub balance: u64,
}

impl HandResult {
    /// Net change to the player's money over the round for this hand.
    pub fn net(&self) -> i64 {
        let net = i128::from(self.payout) - i128::from(self.bet);
        net.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

/// A human seat at the table with a balance and one bet per hand.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    balance: u64,
    hands: Vec<BettingHand>,
}

impl Player {
    pub fn new(name: impl Into<String>, starting_balance: u64) -> Player {
        Player {
            name: name.into(),
            balance: starting_balance,
            hands: vec![BettingHand::default()],
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn hands(&self) -> &[BettingHand] {
        &self.hands
    }

    fn betting_hand(&self, hand_index: usize) -> Result<&BettingHand, BlackjackGameError> {
        self.hands
            .get(hand_index)
            .ok_or(BlackjackGameError::InvalidHandIndex(hand_index))
    }

    fn betting_hand_mut(
        &mut self,
        hand_index: usize,
    ) -> Result<&mut BettingHand, BlackjackGameError> {
        self.hands
            .get_mut(hand_index)
            .ok_or(BlackjackGameError::InvalidHandIndex(hand_index))
    }

    /// The bet riding on `hand_index`, 0 for a hand that does not exist.
    pub fn bet(&self, hand_index: usize) -> u64 {
        self.hands.get(hand_index).map(|h| h.bet).unwrap_or(0)
    }

    /// Sum of every bet currently on the table.
    pub fn total_bet(&self) -> u64 {
        self.hands.iter().fold(0, |total, h| total.saturating_add(h.bet))
    }

    /// Moves `amount` from the balance onto the hand at `hand_index`.
    /// A zero bet is accepted and changes nothing.
    pub fn place_bet(&mut self, amount: u64, hand_index: usize) -> Result<(), BlackjackGameError> {
        if amount > self.balance {
            return Err(BlackjackGameError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        let balance = self.balance;
        let seat = self.betting_hand_mut(hand_index)?;
        seat.bet = seat.bet.saturating_add(amount);
        self.balance = balance - amount;
        Ok(())
    }

    /// True when the hand at `hand_index` is exactly two cards of equal rank.
    pub fn can_split(&self, hand_index: usize) -> bool {
        self.hands
            .get(hand_index)
            .map(|h| h.hand.is_pair())
            .unwrap_or(false)
    }

    /// Moves the second card of a pair into a new hand placed right after `hand_index`.
    /// The new hand carries a copy of the bet, debited from the balance like a double down.
    pub fn split(&mut self, hand_index: usize) -> Result<(), BlackjackGameError> {
        if !self.can_split(hand_index) {
            return Err(BlackjackGameError::CannotSplit(hand_index));
        }
        let bet = self.bet(hand_index);
        if bet > self.balance {
            return Err(BlackjackGameError::InsufficientFunds {
                requested: bet,
                available: self.balance,
            });
        }
        let seat = self.betting_hand_mut(hand_index)?;
        let card = seat
            .hand
            .pop()
            .ok_or(BlackjackGameError::CannotSplit(hand_index))?;
        let mut hand = Hand::new();
        hand.push(card);
        self.hands.insert(hand_index + 1, BettingHand { hand, bet });
        self.balance -= bet;
        Ok(())
    }

    /// True when the balance covers another copy of the bet on `hand_index`. With
    /// `require_two_cards` the hand must also hold exactly two cards.
    pub fn can_double_down(&self, hand_index: usize, require_two_cards: bool) -> bool {
        match self.hands.get(hand_index) {
            Some(seat) => {
                seat.bet > 0
                    && self.balance >= seat.bet
                    && (!require_two_cards || seat.hand.len() == 2)
            }
            None => false,
        }
    }

    /// Debits the current bet again and doubles it.
    pub fn double_down(
        &mut self,
        hand_index: usize,
        require_two_cards: bool,
    ) -> Result<(), BlackjackGameError> {
        if !self.can_double_down(hand_index, require_two_cards) {
            return Err(BlackjackGameError::CannotDoubleDown(hand_index));
        }
        let seat = self.betting_hand_mut(hand_index)?;
        let bet = seat.bet;
        seat.bet = seat.bet.saturating_mul(2);
        self.balance -= bet;
        Ok(())
    }

    /// Zeroes every bet without touching the hands.
    pub fn reset_bet(&mut self) {
        for seat in self.hands.iter_mut() {
            seat.bet = 0;
        }
    }

    /// Settles every hand against `host_score`, credits the payouts and zeroes the bets.
    /// The balance saturates rather than overflowing.
    pub fn settle(&mut self, host_score: u32) -> Vec<HandResult> {
        let mut results = Vec::with_capacity(self.hands.len());
        for (hand_index, seat) in self.hands.iter_mut().enumerate() {
            let score = seat.hand.value();
            let outcome = Outcome::resolve(score, host_score);
            let payout = outcome.payout(seat.bet);
            self.balance = self.balance.saturating_add(payout);
            results.push(HandResult {
                hand_index,
                score,
                bet: seat.bet,
                outcome,
                payout,
                balance: self.balance,
            });
            seat.bet = 0;
        }
        results
    }
}

impl Participant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand(&self, hand_index: usize) -> Option<&Hand> {
        self.hands.get(hand_index).map(|h| &h.hand)
    }

    fn num_hands(&self) -> usize {
        self.hands.len()
    }

    fn hit(&mut self, card: Card, hand_index: usize) -> Result<(), BlackjackGameError> {
        self.betting_hand_mut(hand_index)?.hand.push(card);
        Ok(())
    }

    fn receive_initial_hand(
        &mut self,
        first: Card,
        second: Card,
    ) -> Result<(), BlackjackGameError> {
        let seat = self.betting_hand_mut(0)?;
        if !seat.hand.is_empty() {
            return Err(BlackjackGameError::HandNotEmpty);
        }
        seat.hand.push(first);
        seat.hand.push(second);
        Ok(())
    }

    fn reset_hand(&mut self) {
        self.hands.truncate(1);
        if let Some(seat) = self.hands.first_mut() {
            seat.hand.clear();
        } else {
            self.hands.push(BettingHand::default());
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hands = self
            .hands
            .iter()
            .map(|h| format!("{} (${})", h.hand, h.bet))
            .collect::<Vec<String>>()
            .join(" | ");
        write!(f, "{:<21}{}\n{:<21}${}", "hands:", hands, "balance:", self.balance)
    }
}

/// The dealer. Holds a single hand, never bets, and draws until reaching 17.
#[derive(Debug, Clone, Default)]
pub struct Host {
    hand: Hand,
    hits_soft_seventeen: bool,
}

impl Host {
    pub const NAME: &'static str = "Host";
    pub const STANDS_ON: u32 = 17;

    pub fn new(hits_soft_seventeen: bool) -> Host {
        Host {
            hand: Hand::new(),
            hits_soft_seventeen,
        }
    }

    /// The card shown to the table before the host reveals.
    pub fn up_card(&self) -> Option<Card> {
        self.hand.cards().first().copied()
    }

    /// True while the host's total is under 17, or on a soft 17 when the table hits soft 17s.
    pub fn must_hit(&self) -> bool {
        let score = self.hand.value();
        score < Host::STANDS_ON
            || (self.hits_soft_seventeen && score == Host::STANDS_ON && self.hand.is_soft())
    }
}

impl Participant for Host {
    fn name(&self) -> &str {
        Host::NAME
    }

    fn hand(&self, hand_index: usize) -> Option<&Hand> {
        (hand_index == 0).then_some(&self.hand)
    }

    fn num_hands(&self) -> usize {
        1
    }

    fn hit(&mut self, card: Card, hand_index: usize) -> Result<(), BlackjackGameError> {
        if hand_index != 0 {
            return Err(BlackjackGameError::InvalidHandIndex(hand_index));
        }
        self.hand.push(card);
        Ok(())
    }

    fn receive_initial_hand(
        &mut self,
        first: Card,
        second: Card,
    ) -> Result<(), BlackjackGameError> {
        if !self.hand.is_empty() {
            return Err(BlackjackGameError::HandNotEmpty);
        }
        self.hand.push(first);
        self.hand.push(second);
        Ok(())
    }

    fn reset_hand(&mut self) {
        self.hand.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(Suit::Club, rank)
    }

    fn seated(cards: &[Rank], bet: u64) -> Player {
        let mut player = Player::new("Alice", 1000);
        player.place_bet(bet, 0).unwrap();
        for rank in cards {
            player.hit(card(*rank), 0).unwrap();
        }
        player
    }

    #[test]
    fn place_bet_debits_balance() {
        let mut player = Player::new("Alice", 500);
        player.place_bet(200, 0).unwrap();
        assert_eq!(player.balance(), 300);
        assert_eq!(player.bet(0), 200);
    }

    #[test]
    fn place_bet_over_balance_fails() {
        let mut player = Player::new("Alice", 50);
        let err = player.place_bet(51, 0).unwrap_err();
        assert_eq!(
            err,
            BlackjackGameError::InsufficientFunds {
                requested: 51,
                available: 50
            }
        );
        assert_eq!(player.balance(), 50);
        assert_eq!(player.bet(0), 0);
    }

    #[test]
    fn zero_bet_is_not_an_error() {
        let mut player = Player::new("Alice", 50);
        player.place_bet(0, 0).unwrap();
        assert_eq!(player.balance(), 50);
    }

    #[test]
    fn place_bet_on_missing_hand() {
        let mut player = Player::new("Alice", 50);
        assert_eq!(player.place_bet(10, 3), Err(BlackjackGameError::InvalidHandIndex(3)));
        assert_eq!(player.balance(), 50);
    }

    #[test]
    fn initial_hand_needs_empty_hand() {
        let mut player = Player::new("Alice", 50);
        player.receive_initial_hand(card(Rank::Two), card(Rank::Three)).unwrap();
        assert_eq!(player.score(0), 5);
        assert_eq!(
            player.receive_initial_hand(card(Rank::Two), card(Rank::Three)),
            Err(BlackjackGameError::HandNotEmpty)
        );
    }

    #[test]
    fn split_two_aces() {
        let mut player = seated(&[Rank::Ace, Rank::Ace], 100);
        assert!(player.can_split(0));
        player.split(0).unwrap();
        assert_eq!(player.num_hands(), 2);
        assert_eq!(player.bet(0), 100);
        assert_eq!(player.bet(1), 100);
        assert_eq!(player.hand(0).unwrap().len(), 1);
        assert_eq!(player.hand(1).unwrap().len(), 1);
        assert_eq!(player.balance(), 1000 - 200);
    }

    #[test]
    fn split_requires_pair() {
        let mut player = seated(&[Rank::King, Rank::Queen], 100);
        assert!(!player.can_split(0));
        assert_eq!(player.split(0), Err(BlackjackGameError::CannotSplit(0)));
        assert_eq!(player.num_hands(), 1);
    }

    #[test]
    fn split_requires_funds() {
        let mut player = Player::new("Bob", 150);
        player.place_bet(100, 0).unwrap();
        player.receive_initial_hand(card(Rank::Eight), card(Rank::Eight)).unwrap();
        assert!(matches!(
            player.split(0),
            Err(BlackjackGameError::InsufficientFunds { .. })
        ));
        assert_eq!(player.num_hands(), 1);
        assert_eq!(player.balance(), 50);
    }

    #[test]
    fn double_down_doubles_bet() {
        let mut player = seated(&[Rank::Five, Rank::Six], 100);
        assert!(player.can_double_down(0, true));
        player.double_down(0, true).unwrap();
        assert_eq!(player.bet(0), 200);
        assert_eq!(player.balance(), 800);
    }

    #[test]
    fn double_down_variants() {
        let player = seated(&[Rank::Two, Rank::Three, Rank::Four], 100);
        assert!(player.can_double_down(0, false));
        assert!(!player.can_double_down(0, true));

        let mut broke = Player::new("Carol", 100);
        broke.place_bet(60, 0).unwrap();
        assert!(!broke.can_double_down(0, false));
        assert_eq!(broke.double_down(0, false), Err(BlackjackGameError::CannotDoubleDown(0)));
    }

    #[test]
    fn settle_pays_each_hand() {
        let mut player = seated(&[Rank::Ten, Rank::King], 100);
        let before = player.balance();
        let results = player.settle(18);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].outcome, Outcome::PlayerWins);
        assert_eq!(results[0].net(), 100);
        assert_eq!(player.balance(), before + 200);
        assert_eq!(player.bet(0), 0);
    }

    #[test]
    fn winning_all_in_on_a_large_balance() {
        let mut player = Player::new("Alice", 3_000_000_000);
        player.place_bet(3_000_000_000, 0).unwrap();
        player.hit(card(Rank::Ten), 0).unwrap();
        player.hit(card(Rank::King), 0).unwrap();
        let results = player.settle(18);
        assert_eq!(results[0].payout, 6_000_000_000);
        assert_eq!(results[0].net(), 3_000_000_000);
        assert_eq!(player.balance(), 6_000_000_000);
    }

    #[test]
    fn balance_saturates_instead_of_overflowing() {
        let mut player = Player::new("Alice", u64::MAX);
        player.place_bet(u64::MAX - 1, 0).unwrap();
        player.hit(card(Rank::Ten), 0).unwrap();
        player.hit(card(Rank::King), 0).unwrap();
        let results = player.settle(18);
        assert_eq!(results[0].payout, u64::MAX);
        assert_eq!(results[0].net(), i64::MAX);
        assert_eq!(player.balance(), u64::MAX);
    }

    #[test]
    fn settle_reports_the_running_balance_per_hand() {
        let mut player = seated(&[Rank::Eight, Rank::Eight], 100);
        player.split(0).unwrap();
        player.hit(card(Rank::Ten), 0).unwrap();
        player.hit(card(Rank::Nine), 1).unwrap();
        assert_eq!(player.balance(), 800);
        let results = player.settle(17);
        assert_eq!(results[0].outcome, Outcome::PlayerWins);
        assert_eq!(results[0].balance, 1000);
        assert_eq!(results[1].outcome, Outcome::Push);
        assert_eq!(results[1].balance, 1100);
        assert_eq!(player.balance(), 1100);
    }

    #[test]
    fn reset_returns_to_one_empty_hand() {
        let mut player = seated(&[Rank::Nine, Rank::Nine], 100);
        player.split(0).unwrap();
        player.reset_hand();
        player.reset_bet();
        assert_eq!(player.num_hands(), 1);
        assert!(player.hand(0).unwrap().is_empty());
        assert_eq!(player.total_bet(), 0);
    }

    #[test]
    fn host_hits_below_seventeen() {
        let mut host = Host::new(false);
        host.receive_initial_hand(card(Rank::Ten), card(Rank::Six)).unwrap();
        assert!(host.must_hit());
        host.hit(card(Rank::Ace), 0).unwrap();
        assert!(!host.must_hit());
        assert_eq!(host.score(0), 17);
    }

    #[test]
    fn host_soft_seventeen_variant() {
        let mut standing = Host::new(false);
        standing.receive_initial_hand(card(Rank::Ace), card(Rank::Six)).unwrap();
        assert!(!standing.must_hit());

        let mut hitting = Host::new(true);
        hitting.receive_initial_hand(card(Rank::Ace), card(Rank::Six)).unwrap();
        assert!(hitting.must_hit());
    }

    #[test]
    fn host_has_one_hand() {
        let mut host = Host::new(false);
        assert_eq!(host.name(), "Host");
        assert_eq!(host.hit(card(Rank::Two), 1), Err(BlackjackGameError::InvalidHandIndex(1)));
        assert_eq!(host.up_card(), None);
    }
}
