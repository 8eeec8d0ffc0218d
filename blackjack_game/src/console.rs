//! Terminal input and output for the game: prompts are read with `dialoguer` when stdin is a
//! terminal and line by line otherwise, events are rendered through the message table.

use crate::messages::{MessageKind, MessageTable};
use blackjack_lib::{
    BlackjackGameError, Card, GameEvent, GameObserver, Hand, Host, Outcome, PlayerInput, Prompt,
    MAX_PLAYERS,
};
use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

/// Renders a card, red suits in red when `color` is set.
pub fn paint_card(card: &Card, color: bool) -> String {
    if color && card.suit.is_red() {
        card.to_string().red().to_string()
    } else {
        card.to_string()
    }
}

pub fn paint_hand(hand: &Hand, color: bool) -> String {
    hand.cards()
        .iter()
        .map(|card| paint_card(card, color))
        .collect::<Vec<String>>()
        .join(" ")
}

/// The text shown for `prompt`.
pub fn render_prompt(messages: &MessageTable, prompt: &Prompt) -> String {
    match prompt {
        Prompt::Bet { name, balance } => messages.render(
            MessageKind::BetPrompt,
            &[("name", name.clone()), ("balance", balance.to_string())],
        ),
        Prompt::Action { name, hand_index } => messages.render(
            MessageKind::ActionPrompt,
            &[("name", name.clone()), ("hand", (hand_index + 1).to_string())],
        ),
        Prompt::Split { name } => {
            messages.render(MessageKind::SplitPrompt, &[("name", name.clone())])
        }
        Prompt::DoubleDown { name } => {
            messages.render(MessageKind::DoubleDownPrompt, &[("name", name.clone())])
        }
    }
}

fn settled_kind(outcome: Outcome) -> MessageKind {
    match outcome {
        Outcome::PlayerBust => MessageKind::PlayerBusts,
        Outcome::HostBust => MessageKind::HostBusts,
        Outcome::PlayerWins => MessageKind::PlayerWins,
        Outcome::HostWins => MessageKind::HostWins,
        Outcome::Push => MessageKind::Tie,
    }
}

/// The text printed for `event`, `None` for events with nothing to show.
pub fn render_event(messages: &MessageTable, event: &GameEvent, color: bool) -> Option<String> {
    let host = Host::NAME;
    let text = match event {
        GameEvent::Welcome => format!(
            "{}\n{}",
            messages.render(MessageKind::Welcome, &[]),
            messages.render(MessageKind::Separator, &[])
        ),
        GameEvent::RoundStarted { round } => {
            messages.render(MessageKind::RoundStarted, &[("round", round.to_string())])
        }
        GameEvent::Balance { name, balance } => messages.render(
            MessageKind::Balance,
            &[("name", name.clone()), ("balance", balance.to_string())],
        ),
        GameEvent::PlayerExited { name } => {
            messages.render(MessageKind::PlayerExited, &[("name", name.clone())])
        }
        GameEvent::SkipRound { name } => {
            messages.render(MessageKind::SkipRound, &[("name", name.clone())])
        }
        GameEvent::NoActivePlayers => messages.render(MessageKind::NoActivePlayers, &[]),
        GameEvent::DealingCards => messages.render(MessageKind::DealingCards, &[]),
        GameEvent::HandDealt { name, hand } => messages.render(
            MessageKind::HandDealt,
            &[("name", name.clone()), ("hand", paint_hand(hand, color))],
        ),
        GameEvent::HostShowing { card } => messages.render(
            MessageKind::HostShowing,
            &[("host", host.to_string()), ("card", paint_card(card, color))],
        ),
        GameEvent::Split { name } => messages.render(MessageKind::Split, &[("name", name.clone())]),
        GameEvent::DoubledDown { name, bet } => messages.render(
            MessageKind::DoubledDown,
            &[("name", name.clone()), ("bet", bet.to_string())],
        ),
        GameEvent::PlayingHand { name, hand_index } => messages.render(
            MessageKind::PlayingHand,
            &[("name", name.clone()), ("hand", (hand_index + 1).to_string())],
        ),
        GameEvent::DrawingCard => messages.render(MessageKind::DrawingCard, &[]),
        GameEvent::NewDeck => messages.render(MessageKind::NewDeck, &[]),
        GameEvent::HandUpdated { name, hand, .. } => messages.render(
            MessageKind::HandUpdated,
            &[
                ("name", name.clone()),
                ("hand", paint_hand(hand, color)),
                ("value", hand.formatted_value()),
            ],
        ),
        GameEvent::HostReveals { hand } => messages.render(
            MessageKind::HostReveals,
            &[
                ("host", host.to_string()),
                ("hand", paint_hand(hand, color)),
                ("value", hand.value().to_string()),
            ],
        ),
        GameEvent::HandSettled {
            name,
            hand_index,
            score,
            host_score,
            outcome,
            balance,
        } => {
            let label = match hand_index {
                0 => name.clone(),
                n => format!("{} (hand {})", name, n + 1),
            };
            let line = messages.render(
                settled_kind(*outcome),
                &[
                    ("name", label),
                    ("host", host.to_string()),
                    ("score", score.to_string()),
                    ("host_score", host_score.to_string()),
                    ("balance", balance.to_string()),
                ],
            );
            match (color, outcome.is_win()) {
                (true, true) => line.green().to_string(),
                _ => line,
            }
        }
        GameEvent::RoundEnded { .. } => messages.render(MessageKind::Separator, &[]),
        GameEvent::InvalidInput { error } => {
            messages.render(MessageKind::InvalidInput, &[("error", error.to_string())])
        }
        GameEvent::GameOver { summary } => {
            if summary.players.iter().all(|p| p.final_balance == 0) {
                messages.render(MessageKind::GameOverNoFunds, &[])
            } else {
                messages.render(MessageKind::GameOver, &[])
            }
        }
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

enum Source<R, W> {
    Terminal,
    Lines { reader: R, echo: W },
}

/// Reads responses from the player at the keyboard, or from any line source.
pub struct ConsoleInput<R, W> {
    messages: MessageTable,
    source: Source<R, W>,
}

impl ConsoleInput<StdinLock<'static>, Stdout> {
    /// Uses interactive prompts when stdin is a terminal, plain lines otherwise (pipes, files).
    pub fn stdin(messages: MessageTable) -> Self {
        let source = if io::stdin().is_terminal() {
            Source::Terminal
        } else {
            Source::Lines {
                reader: io::stdin().lock(),
                echo: io::stdout(),
            }
        };
        ConsoleInput { messages, source }
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    /// Reads one response per line from `reader`, writing each prompt to `echo` first.
    pub fn from_reader(messages: MessageTable, reader: R, echo: W) -> Self {
        ConsoleInput {
            messages,
            source: Source::Lines { reader, echo },
        }
    }

    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    /// Shows `text` and returns the trimmed response. End of input is reported as
    /// `InputClosed`.
    pub fn ask(&mut self, text: &str) -> Result<String, BlackjackGameError> {
        match &mut self.source {
            Source::Terminal => dialoguer::Input::<String>::new()
                .with_prompt(text)
                .allow_empty(true)
                .interact_text()
                .map(|s| s.trim().to_string())
                .map_err(|e| BlackjackGameError::InputClosed(e.to_string())),
            Source::Lines { reader, echo } => {
                write!(echo, "{}: ", text)
                    .and_then(|_| echo.flush())
                    .map_err(|e| BlackjackGameError::InputClosed(e.to_string()))?;
                let mut line = String::new();
                match reader.read_line(&mut line) {
                    Ok(0) => Err(BlackjackGameError::InputClosed("end of input".to_string())),
                    Ok(_) => Ok(line.trim().to_string()),
                    Err(e) => Err(BlackjackGameError::InputClosed(e.to_string())),
                }
            }
        }
    }

    /// Asks until `parse` accepts the answer, printing each recoverable error to `errors`.
    pub fn ask_until<T, F, E>(
        &mut self,
        text: &str,
        errors: &mut E,
        parse: F,
    ) -> Result<T, BlackjackGameError>
    where
        F: Fn(&str) -> Result<T, BlackjackGameError>,
        E: Write,
    {
        loop {
            let raw = self.ask(text)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(error) if error.is_recoverable() => {
                    let message = self
                        .messages
                        .render(MessageKind::InvalidInput, &[("error", error.to_string())]);
                    if let Err(e) = writeln!(errors, "{}", message) {
                        log::error!("failed to report invalid input: {}", e);
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    pub fn player_count_prompt(&self) -> String {
        self.messages.render(
            MessageKind::PlayerCountPrompt,
            &[("max", MAX_PLAYERS.to_string())],
        )
    }
}

impl<R: BufRead, W: Write> PlayerInput for ConsoleInput<R, W> {
    fn respond(&mut self, prompt: &Prompt) -> Result<String, BlackjackGameError> {
        let text = render_prompt(&self.messages, prompt);
        self.ask(&text)
    }
}

/// Prints every game event to `writer`.
pub struct ConsoleOutput<W: Write> {
    messages: MessageTable,
    writer: W,
    color: bool,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(messages: MessageTable, writer: W, color: bool) -> Self {
        ConsoleOutput {
            messages,
            writer,
            color,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GameObserver for ConsoleOutput<W> {
    fn notify(&mut self, event: &GameEvent) {
        if let Some(text) = render_event(&self.messages, event, self.color) {
            if let Err(e) = writeln!(self.writer, "{}", text) {
                log::error!("failed to write game output: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_lib::{Rank, Suit};
    use std::io::Cursor;

    fn hand(cards: &[(Suit, Rank)]) -> Hand {
        cards.iter().map(|(s, r)| Card::new(*s, *r)).collect()
    }

    #[test]
    fn prompts_use_one_based_hand_numbers() {
        let messages = MessageTable::new();
        let text = render_prompt(
            &messages,
            &Prompt::Action {
                name: "Alice".to_string(),
                hand_index: 1,
            },
        );
        assert_eq!(text, "Alice, hand 2: do you want to hit (h) or stand (s)?");
    }

    #[test]
    fn host_card_is_shown_with_a_placeholder() {
        let messages = MessageTable::new();
        let card = Card::new(Suit::Heart, Rank::King);
        let text = render_event(&messages, &GameEvent::HostShowing { card }, false).unwrap();
        assert_eq!(text, "Host's hand: K♥ ?");
    }

    #[test]
    fn settled_split_hands_are_labelled() {
        let messages = MessageTable::new();
        let event = GameEvent::HandSettled {
            name: "Bob".to_string(),
            hand_index: 1,
            score: 23,
            host_score: 18,
            outcome: Outcome::PlayerBust,
            balance: 400,
        };
        let text = render_event(&messages, &event, false).unwrap();
        assert_eq!(text, "Bob (hand 2) busts with 23! Host wins. Balance: $400");
    }

    #[test]
    fn updated_hands_show_soft_totals() {
        let messages = MessageTable::new();
        let event = GameEvent::HandUpdated {
            name: "Alice".to_string(),
            hand_index: 0,
            hand: hand(&[(Suit::Spade, Rank::Ace), (Suit::Club, Rank::Six)]),
        };
        let text = render_event(&messages, &event, false).unwrap();
        assert_eq!(text, "Alice's hand: A♠ 6♣ (7/17)");
    }

    #[test]
    fn line_input_trims_and_echoes_prompts() {
        let reader = Cursor::new("  h \n");
        let mut echo = Vec::new();
        let mut input = ConsoleInput::from_reader(MessageTable::new(), reader, &mut echo);
        let response = input
            .respond(&Prompt::Split {
                name: "Carol".to_string(),
            })
            .unwrap();
        assert_eq!(response, "h");
        assert!(matches!(
            input.ask("again"),
            Err(BlackjackGameError::InputClosed(_))
        ));
        drop(input);
        let echoed = String::from_utf8(echo).unwrap();
        assert!(echoed.starts_with("Carol, do you want to split? (yes/no): "));
    }

    #[test]
    fn ask_until_reports_bad_answers() {
        let reader = Cursor::new("seven\n0\n3\n");
        let mut errors = Vec::new();
        let mut input = ConsoleInput::from_reader(MessageTable::new(), reader, io::sink());
        let count = input
            .ask_until("players", &mut errors, blackjack_lib::input::parse_player_count)
            .unwrap();
        assert_eq!(count, 3);
        let errors = String::from_utf8(errors).unwrap();
        assert_eq!(errors.lines().count(), 2);
    }

    #[test]
    fn output_writes_one_line_per_event() {
        let mut output = ConsoleOutput::new(MessageTable::new(), Vec::new(), false);
        output.notify(&GameEvent::DealingCards);
        output.notify(&GameEvent::SkipRound {
            name: "Dan".to_string(),
        });
        let text = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(text, "Dealing cards...\nDan is skipping this round.\n");
    }
}
