//! # Create Command
//!
//! Handles `create name|description|location|date|time`.
//! The creator is told the new event's id privately, since every later command needs it.

use super::Outcome;
use crate::application::parsing::split_fields;
use crate::domain::errors::CommandError;
use crate::domain::traits::EventStore;
use crate::domain::types::{InboundMessage, NewEvent};
use crate::strings::{logs, messages};

pub async fn handle_create(
    store: &dyn EventStore,
    message: &InboundMessage,
    args: &str,
) -> Result<Outcome, CommandError> {
    let fields = split_fields(args);
    let [name, description, location, date, time] = fields.as_slice() else {
        return Err(CommandError::Usage(messages::CREATE_USAGE.to_string()));
    };
    if name.is_empty() {
        return Err(CommandError::Usage(messages::CREATE_USAGE.to_string()));
    }

    let new_event = NewEvent {
        name: name.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        creator: message.author_username.clone(),
        creator_id: message.author_id.clone(),
    };

    match store.create_event(new_event).await {
        Ok(event) => {
            tracing::info!("{}", logs::event_created(event.id, &event.name, &event.creator_id));
            Ok(Outcome::private(messages::event_created(&event)))
        }
        Err(e) => {
            tracing::error!("{}", logs::create_failed(name, &e.to_string()));
            Ok(Outcome::private(messages::CREATE_FAILED))
        }
    }
}
