//! # Info Command
//!
//! Handles `info token`: full event details plus the RSVP roster, posted in the channel.

use super::Outcome;
use crate::application::resolver::Resolver;
use crate::domain::errors::CommandError;
use crate::domain::traits::EventStore;
use crate::domain::types::Verb;
use crate::strings::messages;

pub async fn handle_info(
    store: &dyn EventStore,
    resolver: &Resolver,
    args: &str,
) -> Result<Outcome, CommandError> {
    let token = args.trim();
    if token.is_empty() {
        return Err(CommandError::Usage(messages::INFO_USAGE.to_string()));
    }

    let event = resolver.resolve_one(token, Verb::Info).await?;
    let responses = store.responses_for_event(event.id).await?;
    Ok(Outcome::channel(messages::event_details(&event, &responses)))
}
