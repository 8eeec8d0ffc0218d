use serde::Serialize;
use std::fmt::Display;

/// How a single hand finished against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    PlayerBust,
    HostBust,
    PlayerWins,
    Push,
    HostWins,
}

impl Outcome {
    /// Compares a player's final total with the host's. A player bust loses even when the host
    /// busts too.
    pub fn resolve(player_score: u32, host_score: u32) -> Outcome {
        if player_score > 21 {
            Outcome::PlayerBust
        } else if host_score > 21 {
            Outcome::HostBust
        } else if player_score > host_score {
            Outcome::PlayerWins
        } else if player_score < host_score {
            Outcome::HostWins
        } else {
            Outcome::Push
        }
    }

    /// The amount credited back to the player for a hand carrying `bet`. The bet was already
    /// taken from the balance when it was placed. Saturates at `u64::MAX`.
    pub fn payout(&self, bet: u64) -> u64 {
        match self {
            Outcome::HostBust | Outcome::PlayerWins => bet.saturating_mul(2),
            Outcome::Push => bet,
            Outcome::PlayerBust | Outcome::HostWins => 0,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::HostBust | Outcome::PlayerWins)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::PlayerBust => "bust",
            Outcome::HostBust => "host bust",
            Outcome::PlayerWins => "win",
            Outcome::Push => "push",
            Outcome::HostWins => "loss",
        };
        write!(f, "{}", s)
    }
}
