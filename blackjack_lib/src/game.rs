//! The round controller. A `BlackjackGame` owns the deck, the host and the roster, and walks
//! every round through betting, dealing, player turns, the host's turn and settlement.

use crate::card::Card;
use crate::config::BlackjackGameConfig;
use crate::deck::Deck;
use crate::error::BlackjackGameError;
use crate::event::{GameEvent, GameObserver};
use crate::input::{parse_bet, validate_player_count, Action, Answer, PlayerInput, Prompt};
use crate::participant::{Host, Participant, Player};
use crate::stats::{GameSummary, PlayerStats, PlayerSummary};

/// Where the current round is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Betting,
    Dealing,
    PlayerTurns,
    HostTurn,
    Settlement,
    RoundEnd,
}

/// A player together with the tallies kept for them over the game.
struct Seat {
    /// Position at the table when the game started.
    number: usize,
    player: Player,
    stats: PlayerStats,
}

pub struct BlackjackGame<I, O>
where
    I: PlayerInput,
    O: GameObserver,
{
    roster: Vec<Seat>,
    departed: Vec<Seat>,
    active: Vec<usize>,
    host: Host,
    deck: Deck,
    config: BlackjackGameConfig,
    input: I,
    observer: O,
    phase: RoundPhase,
    round: u32,
}

impl<I, O> BlackjackGame<I, O>
where
    I: PlayerInput,
    O: GameObserver,
{
    /// Seats one player per name, each starting with `starting_balance`. Fails when the number
    /// of names is outside 1..=6 or the balance is zero.
    pub fn new(
        names: Vec<String>,
        starting_balance: u64,
        config: BlackjackGameConfig,
        input: I,
        observer: O,
    ) -> Result<Self, BlackjackGameError> {
        validate_player_count(names.len())?;
        if starting_balance == 0 {
            return Err(BlackjackGameError::InvalidInitialBalance);
        }
        let mut deck = match config.seed {
            Some(seed) => Deck::seeded(config.num_decks, seed),
            None => Deck::with_decks(config.num_decks),
        };
        deck.shuffle();
        let roster = names
            .into_iter()
            .enumerate()
            .map(|(number, name)| Seat {
                number,
                player: Player::new(name, starting_balance),
                stats: PlayerStats::default(),
            })
            .collect();
        Ok(BlackjackGame {
            roster,
            departed: Vec::new(),
            active: Vec::new(),
            host: Host::new(config.hits_soft_seventeen),
            deck,
            config,
            input,
            observer,
            phase: RoundPhase::RoundEnd,
            round: 0,
        })
    }

    /// Replaces the shoe, e.g. with a stacked deck.
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.roster.iter().map(|seat| &seat.player)
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn any_player_with_funds(&self) -> bool {
        self.roster.iter().any(|seat| seat.player.balance() > 0)
    }

    /// Plays rounds until nobody has money left, or until `max_rounds` is reached.
    /// Only an input failure ends the game early.
    pub fn run(&mut self) -> Result<GameSummary, BlackjackGameError> {
        self.notify(GameEvent::Welcome);
        while self.any_player_with_funds() {
            if let Some(max_rounds) = self.config.max_rounds {
                if self.round >= max_rounds {
                    log::info!("stopping after {} rounds", max_rounds);
                    break;
                }
            }
            self.play_round()?;
        }
        let summary = self.summary();
        self.notify(GameEvent::GameOver {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    /// Runs one full round.
    pub fn play_round(&mut self) -> Result<(), BlackjackGameError> {
        self.round += 1;
        log::info!("starting round {}", self.round);
        self.set_phase(RoundPhase::Betting);
        self.notify(GameEvent::RoundStarted { round: self.round });

        self.drop_broke_players();
        if self.roster.is_empty() {
            self.end_round();
            return Ok(());
        }
        self.reset_for_new_round();

        match self.handle_bets() {
            Ok(()) => {}
            Err(BlackjackGameError::NoActivePlayers) => {
                self.notify(GameEvent::NoActivePlayers);
                self.end_round();
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        self.set_phase(RoundPhase::Dealing);
        self.deal_initial_cards()?;

        self.set_phase(RoundPhase::PlayerTurns);
        for idx in self.active.clone() {
            self.play_turn(idx)?;
        }

        self.set_phase(RoundPhase::HostTurn);
        self.host_turn()?;

        self.set_phase(RoundPhase::Settlement);
        self.settle();

        self.end_round();
        Ok(())
    }

    /// Builds the summary of everything played so far, departed players included, in seating
    /// order.
    pub fn summary(&self) -> GameSummary {
        let mut seats: Vec<&Seat> = self.roster.iter().chain(self.departed.iter()).collect();
        seats.sort_by_key(|seat| seat.number);
        let players = seats
            .into_iter()
            .map(|seat| PlayerSummary {
                name: seat.player.name().to_string(),
                final_balance: seat.player.balance(),
                stats: seat.stats.clone(),
            })
            .collect();
        GameSummary {
            rounds_played: self.round,
            players,
        }
    }

    fn notify(&mut self, event: GameEvent) {
        self.observer.notify(&event);
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        log::debug!("round {}: {:?} -> {:?}", self.round, self.phase, phase);
        self.phase = phase;
    }

    fn end_round(&mut self) {
        self.set_phase(RoundPhase::RoundEnd);
        self.notify(GameEvent::RoundEnded { round: self.round });
    }

    /// Asks until `parse` accepts the response. Recoverable errors are reported and re-asked.
    fn ask<T, F>(&mut self, prompt: Prompt, parse: F) -> Result<T, BlackjackGameError>
    where
        F: Fn(&str) -> Result<T, BlackjackGameError>,
    {
        loop {
            let raw = self.input.respond(&prompt)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(error) if error.is_recoverable() => {
                    log::debug!("rejected response {:?}: {}", raw, error);
                    self.notify(GameEvent::InvalidInput { error });
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Players without money leave the roster for good, everyone else gets their balance shown.
    fn drop_broke_players(&mut self) {
        let (staying, leaving): (Vec<Seat>, Vec<Seat>) = std::mem::take(&mut self.roster)
            .into_iter()
            .partition(|seat| seat.player.balance() > 0);
        self.roster = staying;
        for seat in leaving {
            log::warn!("{} has no funds left and leaves the table", seat.player.name());
            self.notify(GameEvent::PlayerExited {
                name: seat.player.name().to_string(),
            });
            self.departed.push(seat);
        }
        let balances: Vec<(String, u64)> = self
            .players()
            .map(|p| (p.name().to_string(), p.balance()))
            .collect();
        for (name, balance) in balances {
            self.notify(GameEvent::Balance { name, balance });
        }
    }

    fn reset_for_new_round(&mut self) {
        for seat in self.roster.iter_mut() {
            seat.player.reset_hand();
            seat.player.reset_bet();
        }
        self.host.reset_hand();
        self.active.clear();
        if self.config.shuffle_between_rounds {
            self.deck.shuffle();
        }
    }

    /// Collects a bet from every seated player. A zero bet sits the round out.
    fn handle_bets(&mut self) -> Result<(), BlackjackGameError> {
        for idx in 0..self.roster.len() {
            let name = self.roster[idx].player.name().to_string();
            let balance = self.roster[idx].player.balance();
            let prompt = Prompt::Bet {
                name: name.clone(),
                balance,
            };
            let bet = self.ask(prompt, |raw| parse_bet(raw, balance))?;
            if bet > 0 {
                self.roster[idx].player.place_bet(bet, 0)?;
                log::debug!("{} bets {}", name, bet);
                self.active.push(idx);
            } else {
                self.notify(GameEvent::SkipRound { name });
            }
        }
        if self.active.is_empty() {
            return Err(BlackjackGameError::NoActivePlayers);
        }
        Ok(())
    }

    /// Draws the top card, rebuilding the deck first if it ran out.
    fn draw_card(&mut self) -> Result<Card, BlackjackGameError> {
        match self.deck.draw_one() {
            Err(BlackjackGameError::EmptyDeck) => {
                self.notify(GameEvent::NewDeck);
                self.deck.reinitialize();
                self.deck.draw_one()
            }
            drawn => drawn,
        }
    }

    fn draw_two(&mut self) -> Result<(Card, Card), BlackjackGameError> {
        match self.deck.draw_two() {
            Err(BlackjackGameError::EmptyDeck) => {
                self.notify(GameEvent::NewDeck);
                self.deck.reinitialize();
                self.deck.draw_two()
            }
            drawn => drawn,
        }
    }

    fn deal_initial_cards(&mut self) -> Result<(), BlackjackGameError> {
        self.notify(GameEvent::DealingCards);
        for idx in self.active.clone() {
            let (first, second) = self.draw_two()?;
            self.roster[idx].player.receive_initial_hand(first, second)?;
        }
        let (first, second) = self.draw_two()?;
        self.host.receive_initial_hand(first, second)?;

        for idx in self.active.clone() {
            let player = &self.roster[idx].player;
            let event = GameEvent::HandDealt {
                name: player.name().to_string(),
                hand: player.hand(0).cloned().unwrap_or_default(),
            };
            self.notify(event);
        }
        if let Some(card) = self.host.up_card() {
            self.notify(GameEvent::HostShowing { card });
        }
        Ok(())
    }

    /// One player's turn: an optional split, otherwise an optional double down, otherwise the
    /// hit/stand loop on hand 0.
    fn play_turn(&mut self, idx: usize) -> Result<(), BlackjackGameError> {
        let name = self.roster[idx].player.name().to_string();
        let double_requires_two = self.config.double_down_requires_two_cards;

        let player = &self.roster[idx].player;
        if player.can_split(0) && player.balance() >= player.bet(0) {
            let answer = self.ask(Prompt::Split { name: name.clone() }, str::parse::<Answer>)?;
            if answer.is_yes() {
                self.roster[idx].player.split(0)?;
                self.notify(GameEvent::Split { name: name.clone() });
                let num_hands = self.roster[idx].player.num_hands();
                for hand_index in 0..num_hands {
                    self.notify(GameEvent::PlayingHand {
                        name: name.clone(),
                        hand_index,
                    });
                    self.play_hand(idx, hand_index)?;
                }
                return Ok(());
            }
        }

        let player = &self.roster[idx].player;
        if player.score(0) < 21 && player.can_double_down(0, double_requires_two) {
            let prompt = Prompt::DoubleDown { name: name.clone() };
            let answer = self.ask(prompt, str::parse::<Answer>)?;
            if answer.is_yes() {
                self.roster[idx].player.double_down(0, double_requires_two)?;
                let bet = self.roster[idx].player.bet(0);
                self.notify(GameEvent::DoubledDown { name, bet });
                return self.handle_hit(idx, 0);
            }
        }

        self.play_hand(idx, 0)
    }

    /// The hit/stand loop, over once the hand reaches 21 or more or the player stands.
    fn play_hand(&mut self, idx: usize, hand_index: usize) -> Result<(), BlackjackGameError> {
        while self.roster[idx].player.score(hand_index) < 21 {
            let prompt = Prompt::Action {
                name: self.roster[idx].player.name().to_string(),
                hand_index,
            };
            match self.ask(prompt, str::parse::<Action>)? {
                Action::Hit => self.handle_hit(idx, hand_index)?,
                Action::Stand => {
                    self.notify_hand(idx, hand_index);
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_hit(&mut self, idx: usize, hand_index: usize) -> Result<(), BlackjackGameError> {
        self.notify(GameEvent::DrawingCard);
        let card = self.draw_card()?;
        log::debug!("{} draws {}", self.roster[idx].player.name(), card);
        self.roster[idx].player.hit(card, hand_index)?;
        self.notify_hand(idx, hand_index);
        Ok(())
    }

    fn notify_hand(&mut self, idx: usize, hand_index: usize) {
        let player = &self.roster[idx].player;
        let event = GameEvent::HandUpdated {
            name: player.name().to_string(),
            hand_index,
            hand: player.hand(hand_index).cloned().unwrap_or_default(),
        };
        self.notify(event);
    }

    fn host_turn(&mut self) -> Result<(), BlackjackGameError> {
        while self.host.must_hit() {
            let card = self.draw_card()?;
            log::debug!("host draws {}", card);
            self.host.hit(card, 0)?;
        }
        Ok(())
    }

    fn settle(&mut self) {
        let host_score = self.host.score(0);
        let host_hand = self.host.hand(0).cloned().unwrap_or_default();
        self.notify(GameEvent::HostReveals { hand: host_hand });

        for idx in self.active.clone() {
            let seat = &mut self.roster[idx];
            let results = seat.player.settle(host_score);
            let mut events = Vec::with_capacity(results.len());
            for result in results.iter() {
                seat.stats.record(result);
                log::debug!(
                    "{} hand {}: {} vs {} -> {} (payout {})",
                    seat.player.name(),
                    result.hand_index,
                    result.score,
                    host_score,
                    result.outcome,
                    result.payout
                );
                events.push(GameEvent::HandSettled {
                    name: seat.player.name().to_string(),
                    hand_index: result.hand_index,
                    score: result.score,
                    host_score,
                    outcome: result.outcome,
                    balance: result.balance,
                });
            }
            for event in events {
                self.notify(event);
            }
        }
    }
}
