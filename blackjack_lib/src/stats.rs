use crate::outcome::Outcome;
use crate::participant::HandResult;
use serde::Serialize;
use std::fmt::Display;

/// Running tallies for one player over a whole game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub pushes: u32,
    pub losses: u32,
    pub busts: u32,
    pub winnings: i64,
}

impl PlayerStats {
    pub fn record(&mut self, result: &HandResult) {
        match result.outcome {
            Outcome::PlayerWins | Outcome::HostBust => self.wins += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::HostWins => self.losses += 1,
            Outcome::PlayerBust => {
                self.losses += 1;
                self.busts += 1;
            }
        }
        self.winnings = self.winnings.saturating_add(result.net());
    }

    pub fn hands_played(&self) -> u32 {
        self.wins + self.pushes + self.losses
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub final_balance: u64,
    pub stats: PlayerStats,
}

/// Everything worth reporting once the game is over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub rounds_played: u32,
    pub players: Vec<PlayerSummary>,
}

impl Display for GameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "hands busted:".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;

        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "{:-^WIDTH$}", format!("{} rounds played", self.rounds_played))?;
        for player in self.players.iter() {
            let stats = &player.stats;
            writeln!(f, "{:-^WIDTH$}", player.name)?;
            writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands won:", stats.wins)?;
            writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands pushed:", stats.pushes)?;
            writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands lost:", stats.losses)?;
            writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands busted:", stats.busts)?;
            writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "winnings:", stats.winnings)?;
            writeln!(
                f,
                "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
                "final balance:",
                format!("${}", player.final_balance)
            )?;
        }
        write!(f, "{}", "-".repeat(WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: Outcome, bet: u64) -> HandResult {
        HandResult {
            hand_index: 0,
            score: 0,
            bet,
            outcome,
            payout: outcome.payout(bet),
            balance: 0,
        }
    }

    #[test]
    fn tallies_follow_outcomes() {
        let mut stats = PlayerStats::default();
        stats.record(&result(Outcome::PlayerWins, 100));
        stats.record(&result(Outcome::HostBust, 50));
        stats.record(&result(Outcome::Push, 20));
        stats.record(&result(Outcome::PlayerBust, 10));
        stats.record(&result(Outcome::HostWins, 5));
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.pushes, 1);
        assert_eq!(stats.losses, 2);
        assert_eq!(stats.busts, 1);
        assert_eq!(stats.winnings, 100 + 50 - 10 - 5);
        assert_eq!(stats.hands_played(), 5);
    }

    #[test]
    fn summary_table_lines_are_80_wide() {
        let summary = GameSummary {
            rounds_played: 3,
            players: vec![PlayerSummary {
                name: "Alice".to_string(),
                final_balance: 1200,
                stats: PlayerStats::default(),
            }],
        };
        let rendered = summary.to_string();
        assert!(rendered.contains("3 rounds played"));
        assert!(rendered.contains("$1200"));
        assert!(rendered.lines().all(|line| line.chars().count() == 80));
    }
}
