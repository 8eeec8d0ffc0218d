use blackjack_lib::BlackjackGameConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blackjack")]
#[command(about = "Terminal blackjack for one to six players against the host")]
pub struct Args {
    /// Number of players, asked for when missing
    #[arg(short, long)]
    pub players: Option<usize>,

    /// Comma separated player names, implies the number of players
    #[arg(short, long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// Starting balance for every player, asked for when missing
    #[arg(short, long)]
    pub balance: Option<u64>,

    /// Number of 52 card decks in the shoe
    #[arg(short, long, default_value_t = 1)]
    pub decks: usize,

    /// Seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many rounds
    #[arg(long)]
    pub rounds: Option<u32>,

    /// The host also hits a soft 17
    #[arg(long)]
    pub soft_seventeen: bool,

    /// Only allow doubling down on a two card hand
    #[arg(long)]
    pub strict_double: bool,

    /// Keep the deck order between rounds instead of reshuffling what is left
    #[arg(long)]
    pub no_shuffle_between_rounds: bool,

    /// JSON file overriding message templates
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// Write the end of game summary to this JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Disable colored cards
    #[arg(long)]
    pub no_color: bool,

    /// More log output on stderr, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn config(&self) -> BlackjackGameConfig {
        let mut builder = BlackjackGameConfig::new();
        builder
            .num_decks(self.decks)
            .shuffle_between_rounds(!self.no_shuffle_between_rounds)
            .double_down_requires_two_cards(self.strict_double)
            .hits_soft_seventeen(self.soft_seventeen);
        if let Some(rounds) = self.rounds {
            builder.max_rounds(rounds);
        }
        if let Some(seed) = self.seed {
            builder.seed(seed);
        }
        builder.build()
    }

    /// Default `env_logger` filter, `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_config() {
        let args = Args::parse_from([
            "blackjack",
            "--names",
            "Alice,Bob",
            "--decks",
            "6",
            "--rounds",
            "10",
            "--seed",
            "3",
            "--soft-seventeen",
            "--no-shuffle-between-rounds",
            "-vv",
        ]);
        assert_eq!(args.names, vec!["Alice".to_string(), "Bob".to_string()]);
        let config = args.config();
        assert_eq!(config.num_decks, 6);
        assert_eq!(config.max_rounds, Some(10));
        assert_eq!(config.seed, Some(3));
        assert!(config.hits_soft_seventeen);
        assert!(!config.shuffle_between_rounds);
        assert!(!config.double_down_requires_two_cards);
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["blackjack"]);
        assert!(args.names.is_empty());
        assert_eq!(args.players, None);
        assert_eq!(args.config(), BlackjackGameConfig::default());
        assert_eq!(args.log_filter(), "warn");
    }
}
