//! Terminal front end for `blackjack_lib`: command line flags, setup prompts, console input and
//! output, and the end of game summary.

pub mod cli;
pub mod console;
pub mod messages;
pub mod setup;
pub mod write;

pub mod prelude {
    pub use super::cli::Args;
    pub use super::console::{ConsoleInput, ConsoleOutput};
    pub use super::messages::{MessageKind, MessageTable};
    pub use super::setup::{collect, TableSetup};
    pub use super::write::{write_summary, write_summary_json};
}
