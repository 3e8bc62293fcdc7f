//! # Help Command
//!
//! Handles the `help` verb.
//! Displays the usage text; never touches the store.

use super::Outcome;

pub fn handle_help() -> Outcome {
    Outcome::channel(crate::strings::help::MAIN)
}
