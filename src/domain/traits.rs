//! # Domain Traits
//!
//! Abstract interfaces for the collaborators the command engine talks to (Chat, Store).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::errors::StoreError;
use crate::domain::types::{Event, EventColumn, EventId, NewEvent, NewRsvp, Rsvp, RsvpStatus};
use async_trait::async_trait;

/// Abstract interface for a Chat Provider (e.g., Matrix, Discord, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to a channel (room). Returns the message id.
    async fn send_channel_message(&self, channel_id: &str, content: &str) -> Result<String, String>;

    /// Get (or create) the private channel shared with a user
    async fn open_private_channel(&self, user_id: &str) -> Result<String, String>;

    /// Send a message to a user's private channel
    async fn send_private_message(&self, user_id: &str, content: &str) -> Result<String, String> {
        let channel_id = self.open_private_channel(user_id).await?;
        self.send_channel_message(&channel_id, content).await
    }
}

/// Persistence for events and their RSVPs.
///
/// Writes are transactional: committed on success, rolled back on any error.
/// Lookups that match nothing return [`StoreError::NotFound`].
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, event: NewEvent) -> Result<Event, StoreError>;

    async fn get_event(&self, id: EventId) -> Result<Event, StoreError>;

    /// Case-insensitive substring match on the event name, ordered by id.
    async fn find_events_by_name(&self, fragment: &str) -> Result<Vec<Event>, StoreError>;

    async fn update_event_field(
        &self,
        id: EventId,
        column: EventColumn,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removes the event together with its RSVPs.
    async fn delete_event(&self, id: EventId) -> Result<(), StoreError>;

    async fn responses_for_event(&self, event_id: EventId) -> Result<Vec<Rsvp>, StoreError>;

    async fn find_response(
        &self,
        event_id: EventId,
        user_id: &str,
    ) -> Result<Option<Rsvp>, StoreError>;

    async fn create_response(&self, rsvp: NewRsvp) -> Result<Rsvp, StoreError>;

    async fn update_response_status(&self, id: i64, status: RsvpStatus) -> Result<(), StoreError>;
}
