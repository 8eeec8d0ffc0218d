/// Struct for configuring a `BlackjackGame`, i.e. the table rules and deck handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackjackGameConfig {
    pub num_decks: usize,
    pub shuffle_between_rounds: bool,
    pub double_down_requires_two_cards: bool,
    pub hits_soft_seventeen: bool,
    pub max_rounds: Option<u32>,
    pub seed: Option<u64>,
}

impl BlackjackGameConfig {
    /// Associated method for returning a new `BlackjackGameConfigBuilder` object, every option left
    /// unset falls back to the standard single deck game.
    pub fn new() -> BlackjackGameConfigBuilder {
        BlackjackGameConfigBuilder::default()
    }
}

impl Default for BlackjackGameConfig {
    fn default() -> Self {
        BlackjackGameConfig::new().build()
    }
}

/// Struct to implement builder pattern for `BlackjackGameConfig`
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackjackGameConfigBuilder {
    num_decks: Option<usize>,
    shuffle_between_rounds: Option<bool>,
    double_down_requires_two_cards: Option<bool>,
    hits_soft_seventeen: Option<bool>,
    max_rounds: Option<u32>,
    seed: Option<u64>,
}

impl BlackjackGameConfigBuilder {
    /// Number of 52 card decks merged into the shoe.
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Whether the remaining cards get shuffled at the start of every round.
    pub fn shuffle_between_rounds(&mut self, shuffle: bool) -> &mut Self {
        self.shuffle_between_rounds = Some(shuffle);
        self
    }

    /// Only allow doubling down on a two card hand.
    pub fn double_down_requires_two_cards(&mut self, required: bool) -> &mut Self {
        self.double_down_requires_two_cards = Some(required);
        self
    }

    /// Method for setting the flag that determines if the host must hit soft seventeens,
    /// default is false
    pub fn hits_soft_seventeen(&mut self, hits: bool) -> &mut Self {
        self.hits_soft_seventeen = Some(hits);
        self
    }

    /// Stop after this many rounds even if players still have money.
    pub fn max_rounds(&mut self, rounds: u32) -> &mut Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Seed for reproducible shuffles.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(&mut self) -> BlackjackGameConfig {
        BlackjackGameConfig {
            num_decks: self.num_decks.unwrap_or(1).max(1),
            shuffle_between_rounds: self.shuffle_between_rounds.unwrap_or(true),
            double_down_requires_two_cards: self.double_down_requires_two_cards.unwrap_or(false),
            hits_soft_seventeen: self.hits_soft_seventeen.unwrap_or(false),
            max_rounds: self.max_rounds,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BlackjackGameConfig::default();
        assert_eq!(config.num_decks, 1);
        assert!(config.shuffle_between_rounds);
        assert!(!config.double_down_requires_two_cards);
        assert!(!config.hits_soft_seventeen);
        assert_eq!(config.max_rounds, None);
    }

    #[test]
    fn builder_overrides() {
        let config = BlackjackGameConfig::new()
            .num_decks(0)
            .max_rounds(3)
            .seed(9)
            .hits_soft_seventeen(true)
            .build();
        assert_eq!(config.num_decks, 1);
        assert_eq!(config.max_rounds, Some(3));
        assert_eq!(config.seed, Some(9));
        assert!(config.hits_soft_seventeen);
    }
}
