//! # Notifier
//!
//! Fans a change to an event out to everyone who cares about it: the creator plus every
//! responder who is Going or Maybe. Each recipient gets one private message.
//!
//! Delivery is best-effort. Fan-out runs on a detached task so the command that caused it
//! returns immediately; failures for one recipient are logged and never stop the others.

use crate::domain::traits::ChatProvider;
use crate::domain::types::{Event, Rsvp};
use crate::strings::logs;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};

/// Text for the two kinds of recipient.
#[derive(Debug, Clone)]
pub struct Notice {
    pub creator: String,
    pub responder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub user_id: String,
    pub is_creator: bool,
}

/// Outcome of one fan-out. User ids are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<String>,
    pub failed: Vec<String>,
}

/// Handle to a running fan-out. Dropping it leaves the fan-out running.
pub struct NotificationHandle(JoinHandle<DeliveryReport>);

impl NotificationHandle {
    pub async fn wait(self) -> DeliveryReport {
        match self.0.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("{}", logs::notification_task_failed(&e.to_string()));
                DeliveryReport::default()
            }
        }
    }
}

pub struct Notifier {
    chat: Arc<dyn ChatProvider>,
    permits: Arc<Semaphore>,
}

impl Notifier {
    pub fn new(chat: Arc<dyn ChatProvider>, max_concurrency: usize) -> Self {
        Self {
            chat,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// The creator first, then Going/Maybe responders, each user at most once.
    pub fn recipients(event: &Event, responses: &[Rsvp]) -> Vec<Recipient> {
        let mut seen = HashSet::new();
        seen.insert(event.creator_id.clone());

        let mut recipients = vec![Recipient {
            user_id: event.creator_id.clone(),
            is_creator: true,
        }];
        for response in responses {
            if response.status.wants_updates() && seen.insert(response.user_id.clone()) {
                recipients.push(Recipient {
                    user_id: response.user_id.clone(),
                    is_creator: false,
                });
            }
        }
        recipients
    }

    /// Start delivering `notice` to everyone interested in `event`.
    pub fn dispatch(&self, event: &Event, responses: &[Rsvp], notice: Notice) -> NotificationHandle {
        let recipients = Self::recipients(event, responses);
        let chat = self.chat.clone();
        let permits = self.permits.clone();
        let notice = Arc::new(notice);

        NotificationHandle(tokio::spawn(async move {
            let mut deliveries = JoinSet::new();
            for recipient in recipients {
                let chat = chat.clone();
                let permits = permits.clone();
                let notice = notice.clone();
                deliveries.spawn(async move {
                    let text = if recipient.is_creator {
                        &notice.creator
                    } else {
                        &notice.responder
                    };
                    let result = match permits.acquire_owned().await {
                        Ok(_permit) => chat.send_private_message(&recipient.user_id, text).await,
                        Err(e) => Err(e.to_string()),
                    };
                    (recipient.user_id, result)
                });
            }

            let mut report = DeliveryReport::default();
            while let Some(joined) = deliveries.join_next().await {
                match joined {
                    Ok((user_id, Ok(_))) => report.delivered.push(user_id),
                    Ok((user_id, Err(e))) => {
                        tracing::warn!("{}", logs::delivery_failed(&user_id, &e));
                        report.failed.push(user_id);
                    }
                    Err(e) => tracing::error!("{}", logs::notification_panicked(&e.to_string())),
                }
            }
            report.delivered.sort();
            report.failed.sort();
            report
        }))
    }
}
