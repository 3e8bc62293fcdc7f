//! # Edit Command
//!
//! Handles `edit token|field|newValue`. Only the creator may edit, one field at a time.
//! `desc+` appends a dated update line; every other field is overwritten.

use super::Outcome;
use crate::application::locks::EventLocks;
use crate::application::notifier::{Notice, Notifier};
use crate::application::parsing::split_fields;
use crate::application::resolver::Resolver;
use crate::domain::errors::{CommandError, StoreError};
use crate::domain::traits::EventStore;
use crate::domain::types::{EditableField, InboundMessage, Verb};
use crate::strings::{logs, messages};

pub async fn handle_edit(
    store: &dyn EventStore,
    resolver: &Resolver,
    locks: &EventLocks,
    notifier: &Notifier,
    message: &InboundMessage,
    args: &str,
) -> Result<Outcome, CommandError> {
    let fields = split_fields(args);
    let [token, field_name, value] = fields.as_slice() else {
        return Err(CommandError::Usage(messages::EDIT_USAGE.to_string()));
    };
    if token.is_empty() {
        return Err(CommandError::Usage(messages::EDIT_USAGE.to_string()));
    }

    let event = resolver.resolve_one(token, Verb::Edit).await?;
    if !event.is_created_by(&message.author_id) {
        return Err(CommandError::Unauthorized(event.name));
    }

    let field = EditableField::parse(field_name);
    let Some(column) = field.column() else {
        return Err(CommandError::Usage(messages::unknown_field(field_name)));
    };

    let _guard = locks.lock(event.id).await;
    let new_value = if field == EditableField::AppendDescription {
        // Re-read under the lock so a concurrent append is not lost.
        let current = match store.get_event(event.id).await {
            Ok(current) => current,
            Err(StoreError::NotFound) => return Err(CommandError::NotFound(token.to_string())),
            Err(e) => return Err(e.into()),
        };
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        messages::description_update(&current.description, value, &stamp)
    } else {
        value.to_string()
    };

    match store.update_event_field(event.id, column, &new_value).await {
        Ok(()) => {}
        Err(StoreError::NotFound) => return Err(CommandError::NotFound(token.to_string())),
        Err(e) => {
            tracing::error!("{}", logs::edit_failed(field.label(), event.id, &e.to_string()));
            return Ok(Outcome::private(messages::edit_failed(&event, &field)));
        }
    }
    tracing::info!("{}", logs::event_edited(event.id, field.label(), &message.author_id));

    let responses = store.responses_for_event(event.id).await.unwrap_or_else(|e| {
        tracing::warn!("{}", logs::roster_unavailable(event.id, &e.to_string()));
        Vec::new()
    });
    let notice = Notice {
        creator: messages::edit_succeeded(&event, &field, value),
        responder: messages::event_changed(&event, &field, value),
    };
    Ok(Outcome::notified(notifier.dispatch(&event, &responses, notice)))
}
