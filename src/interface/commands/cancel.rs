//! # Cancel Command
//!
//! Handles `cancel token`. Only the creator may cancel.
//! The RSVP list is read before the event is deleted so the attendees can still be told.

use super::Outcome;
use crate::application::locks::EventLocks;
use crate::application::notifier::{Notice, Notifier};
use crate::application::resolver::Resolver;
use crate::domain::errors::{CommandError, StoreError};
use crate::domain::traits::EventStore;
use crate::domain::types::{InboundMessage, Verb};
use crate::strings::{logs, messages};

pub async fn handle_cancel(
    store: &dyn EventStore,
    resolver: &Resolver,
    locks: &EventLocks,
    notifier: &Notifier,
    message: &InboundMessage,
    args: &str,
) -> Result<Outcome, CommandError> {
    let token = args.trim();
    if token.is_empty() {
        return Err(CommandError::Usage(messages::CANCEL_USAGE.to_string()));
    }

    let event = resolver.resolve_one(token, Verb::Cancel).await?;
    if !event.is_created_by(&message.author_id) {
        return Err(CommandError::Unauthorized(event.name));
    }

    let _guard = locks.lock(event.id).await;
    let responses = store.responses_for_event(event.id).await?;
    match store.delete_event(event.id).await {
        Ok(()) => {}
        Err(StoreError::NotFound) => return Err(CommandError::NotFound(token.to_string())),
        Err(e) => return Err(e.into()),
    }
    locks.forget(event.id).await;
    tracing::info!(
        "{}",
        logs::event_cancelled(event.id, &event.name, responses.len())
    );

    let notice = Notice {
        creator: messages::cancel_acknowledged(&event),
        responder: messages::event_cancelled(&event),
    };
    Ok(Outcome::notified(notifier.dispatch(&event, &responses, notice)))
}
