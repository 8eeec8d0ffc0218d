use thiserror::Error;

/// Every way a game of blackjack can go wrong. Most variants are reported back to the
/// player and re-prompted, see [`BlackjackGameError::is_recoverable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackjackGameError {
    #[error("the deck is empty")]
    EmptyDeck,

    #[error("insufficient funds: tried to wager ${requested} with a balance of ${available}")]
    InsufficientFunds { requested: u64, available: u64 },

    #[error("invalid bet, please enter a number between 0 and {max}")]
    InvalidBet { max: u64 },

    #[error("invalid input {0:?}, please enter a number")]
    NotANumber(String),

    #[error("invalid option {0:?}, please enter 'h' for hit or 's' for stand")]
    InvalidAction(String),

    #[error("invalid answer {0:?}, please answer with 'yes' or 'no'")]
    InvalidAnswer(String),

    #[error("hand {0} cannot be split")]
    CannotSplit(usize),

    #[error("hand {0} cannot be doubled down")]
    CannotDoubleDown(usize),

    #[error("there is no hand at index {0}")]
    InvalidHandIndex(usize),

    #[error("the hand already holds cards")]
    HandNotEmpty,

    #[error("no active players for this round")]
    NoActivePlayers,

    #[error("number of players must be between 1 and {max}, got {got}")]
    InvalidPlayerCount { got: usize, max: usize },

    #[error("initial balance must be a positive integer")]
    InvalidInitialBalance,

    #[error("input closed: {0}")]
    InputClosed(String),
}

impl BlackjackGameError {
    /// True for errors caused by a bad response at the input boundary, the caller should
    /// report them and ask again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BlackjackGameError::InsufficientFunds { .. }
                | BlackjackGameError::InvalidBet { .. }
                | BlackjackGameError::NotANumber(_)
                | BlackjackGameError::InvalidAction(_)
                | BlackjackGameError::InvalidAnswer(_)
                | BlackjackGameError::InvalidPlayerCount { .. }
                | BlackjackGameError::InvalidInitialBalance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_recoverable() {
        assert!(BlackjackGameError::InvalidAction("x".to_string()).is_recoverable());
        assert!(BlackjackGameError::InvalidBet { max: 10 }.is_recoverable());
        assert!(!BlackjackGameError::InputClosed("eof".to_string()).is_recoverable());
        assert!(!BlackjackGameError::EmptyDeck.is_recoverable());
    }

    #[test]
    fn messages_name_the_limits() {
        let e = BlackjackGameError::InvalidBet { max: 250 };
        assert_eq!(e.to_string(), "invalid bet, please enter a number between 0 and 250");
    }
}
