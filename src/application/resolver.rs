//! # Event Resolver
//!
//! Turns the search token a user typed into the events it refers to.
//! A token that parses as an integer is an exact id lookup; anything else is a
//! case-insensitive substring search on event names.

use crate::domain::errors::{CommandError, StoreError};
use crate::domain::traits::EventStore;
use crate::domain::types::{Event, EventId, Verb};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    NotFound,
    Single(Event),
    Multiple(Vec<Event>),
}

pub struct Resolver {
    store: Arc<dyn EventStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, token: &str) -> Result<Resolution, StoreError> {
        let token = token.trim();
        if let Ok(id) = token.parse::<EventId>() {
            return match self.store.get_event(id).await {
                Ok(event) => Ok(Resolution::Single(event)),
                Err(StoreError::NotFound) => Ok(Resolution::NotFound),
                Err(e) => Err(e),
            };
        }

        let mut events = self.store.find_events_by_name(token).await?;
        Ok(match events.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Single(events.remove(0)),
            _ => Resolution::Multiple(events),
        })
    }

    /// Resolve for a command that needs exactly one event. Zero or several matches
    /// stop the command with the corresponding error.
    pub async fn resolve_one(&self, token: &str, verb: Verb) -> Result<Event, CommandError> {
        match self.resolve(token).await? {
            Resolution::Single(event) => Ok(event),
            Resolution::NotFound => Err(CommandError::NotFound(token.trim().to_string())),
            Resolution::Multiple(candidates) => Err(CommandError::Ambiguous { verb, candidates }),
        }
    }
}
