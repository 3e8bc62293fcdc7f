//! Test doubles shared by the unit tests.

use crate::domain::errors::StoreError;
use crate::domain::traits::{ChatProvider, EventStore};
use crate::domain::types::{Event, EventColumn, EventId, NewEvent, NewRsvp, Rsvp, RsvpStatus};
use crate::infrastructure::store::SqliteStore;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

const PRIVATE_PREFIX: &str = "dm:";

/// Records every message instead of sending it. Private channels are `dm:<user id>`.
#[derive(Default)]
pub struct RecordingChat {
    sent: Mutex<Vec<(String, String)>>,
    failing_users: HashSet<String>,
}

impl RecordingChat {
    /// Private channels for these users cannot be opened.
    pub fn failing_for(users: &[&str]) -> Self {
        Self {
            sent: Mutex::default(),
            failing_users: users.iter().map(|u| u.to_string()).collect(),
        }
    }

    pub fn channel(&self, channel_id: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(channel, _)| channel == channel_id)
            .map(|(_, content)| content.clone())
            .collect()
    }

    pub fn private_to(&self, user_id: &str) -> Vec<String> {
        self.channel(&format!("{PRIVATE_PREFIX}{user_id}"))
    }

    pub fn total(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_channel_message(&self, channel_id: &str, content: &str) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((channel_id.to_string(), content.to_string()));
        Ok(format!("msg-{}", sent.len()))
    }

    async fn open_private_channel(&self, user_id: &str) -> Result<String, String> {
        if self.failing_users.contains(user_id) {
            return Err(format!("cannot open a private channel with {user_id}"));
        }
        Ok(format!("{PRIVATE_PREFIX}{user_id}"))
    }
}

/// In-memory store whose writes can be switched to fail, as if the pool had gone away.
/// Reads keep working so commands get past resolution.
pub struct FlakyStore {
    inner: SqliteStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub async fn new() -> Self {
        Self {
            inner: SqliteStore::in_memory().await.unwrap(),
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn write_allowed(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for FlakyStore {
    async fn create_event(&self, event: NewEvent) -> Result<Event, StoreError> {
        self.write_allowed()?;
        self.inner.create_event(event).await
    }

    async fn get_event(&self, id: EventId) -> Result<Event, StoreError> {
        self.inner.get_event(id).await
    }

    async fn find_events_by_name(&self, fragment: &str) -> Result<Vec<Event>, StoreError> {
        self.inner.find_events_by_name(fragment).await
    }

    async fn update_event_field(
        &self,
        id: EventId,
        column: EventColumn,
        value: &str,
    ) -> Result<(), StoreError> {
        self.write_allowed()?;
        self.inner.update_event_field(id, column, value).await
    }

    async fn delete_event(&self, id: EventId) -> Result<(), StoreError> {
        self.write_allowed()?;
        self.inner.delete_event(id).await
    }

    async fn responses_for_event(&self, event_id: EventId) -> Result<Vec<Rsvp>, StoreError> {
        self.inner.responses_for_event(event_id).await
    }

    async fn find_response(
        &self,
        event_id: EventId,
        user_id: &str,
    ) -> Result<Option<Rsvp>, StoreError> {
        self.inner.find_response(event_id, user_id).await
    }

    async fn create_response(&self, rsvp: NewRsvp) -> Result<Rsvp, StoreError> {
        self.write_allowed()?;
        self.inner.create_response(rsvp).await
    }

    async fn update_response_status(&self, id: i64, status: RsvpStatus) -> Result<(), StoreError> {
        self.write_allowed()?;
        self.inner.update_response_status(id, status).await
    }
}
