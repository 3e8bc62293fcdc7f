//! # Error Taxonomy
//!
//! Store failures and the command-level errors the router turns into a single
//! user-facing reply.

use crate::domain::types::{Event, Verb};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The lookup ran and matched nothing.
    #[error("record not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Every way a command can stop short of success.
///
/// Variants are listed in the order they are checked while handling a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Wrong argument count or an unrecognised field / choice. Carries the guidance text.
    #[error("usage: {0}")]
    Usage(String),

    #[error("no events matched '{0}'")]
    NotFound(String),

    #[error("'{}' matched {} events", .verb.as_str(), .candidates.len())]
    Ambiguous { verb: Verb, candidates: Vec<Event> },

    #[error("user is not the creator of '{0}'")]
    Unauthorized(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
