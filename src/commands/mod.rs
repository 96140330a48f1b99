//! Chat command parsing.
//!
//! Turns a line of chat text into a [`Command`]. Only shape is checked here;
//! amount positivity and category eligibility are the engine's call.

mod errors;
mod parser;

pub use errors::CommandError;
pub use parser::{usage, Command};
