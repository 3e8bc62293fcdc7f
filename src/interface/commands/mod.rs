//! # Command Handlers
//!
//! One handler per planner verb (create, info, cancel, edit, rsvp, help).
//! These handlers are invoked by the Router, which delivers whatever they return.

pub mod cancel;
pub mod create;
pub mod edit;
pub mod help;
pub mod info;
pub mod rsvp;

use crate::application::notifier::NotificationHandle;

/// Where a handler's answer goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The channel the command came from.
    Channel(String),
    /// The private channel of the user who sent the command.
    Private(String),
}

/// What a successful handler hands back to the Router.
#[derive(Default)]
pub struct Outcome {
    pub reply: Option<Reply>,
    pub notification: Option<NotificationHandle>,
}

impl Outcome {
    pub fn channel(text: impl Into<String>) -> Self {
        Self {
            reply: Some(Reply::Channel(text.into())),
            notification: None,
        }
    }

    pub fn private(text: impl Into<String>) -> Self {
        Self {
            reply: Some(Reply::Private(text.into())),
            notification: None,
        }
    }

    pub fn notified(handle: NotificationHandle) -> Self {
        Self {
            reply: None,
            notification: Some(handle),
        }
    }
}
