//! # Per-Event Locks
//!
//! Serializes check-then-write sequences (rsvp, edit, cancel) on the same event
//! within this process. Unrelated events never contend.

use crate::domain::types::EventId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct EventLocks {
    locks: Mutex<HashMap<EventId, Arc<Mutex<()>>>>,
}

impl EventLocks {
    pub async fn lock(&self, id: EventId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries only the table still references are idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry of a deleted event.
    pub async fn forget(&self, id: EventId) {
        self.locks.lock().await.remove(&id);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}
