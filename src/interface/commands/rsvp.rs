//! # RSVP Command
//!
//! Handles `rsvp token|choice`. A user has at most one response per event:
//! an existing response is updated in place, otherwise a new one is recorded.

use super::Outcome;
use crate::application::locks::EventLocks;
use crate::application::parsing::split_fields;
use crate::application::resolver::Resolver;
use crate::domain::errors::{CommandError, StoreError};
use crate::domain::traits::EventStore;
use crate::domain::types::{InboundMessage, NewRsvp, RsvpStatus, Verb};
use crate::strings::{logs, messages};

pub async fn handle_rsvp(
    store: &dyn EventStore,
    resolver: &Resolver,
    locks: &EventLocks,
    message: &InboundMessage,
    args: &str,
) -> Result<Outcome, CommandError> {
    let fields = split_fields(args);
    let [token, choice] = fields.as_slice() else {
        return Err(CommandError::Usage(messages::RSVP_USAGE.to_string()));
    };
    if token.is_empty() {
        return Err(CommandError::Usage(messages::RSVP_USAGE.to_string()));
    }

    let event = resolver.resolve_one(token, Verb::Rsvp).await?;
    let Some(status) = RsvpStatus::from_choice(choice) else {
        return Err(CommandError::Usage(messages::unknown_choice(choice)));
    };

    let _guard = locks.lock(event.id).await;
    // The rsvps table has no foreign key; make sure the event was not cancelled meanwhile.
    match store.get_event(event.id).await {
        Ok(_) => {}
        Err(StoreError::NotFound) => return Err(CommandError::NotFound(token.to_string())),
        Err(e) => return Err(e.into()),
    }

    match store.find_response(event.id, &message.author_id).await? {
        Some(existing) => {
            store.update_response_status(existing.id, status).await?;
            tracing::info!("{}", logs::rsvp_updated(existing.id, event.id, status.as_str()));
        }
        None => {
            let created = store
                .create_response(NewRsvp {
                    event_id: event.id,
                    username: message.author_username.clone(),
                    user_id: message.author_id.clone(),
                    status,
                })
                .await?;
            tracing::info!("{}", logs::rsvp_recorded(created.id, event.id, status.as_str()));
        }
    }

    Ok(Outcome::private(messages::rsvp_recorded(&event, status)))
}
