//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It parses the command line (e.g., `!event rsvp 3|going`), dispatches it with the necessary
//! context, and turns whatever the handler returns (reply or error) into exactly one message.

use anyhow::Result;
use std::sync::Arc;

use crate::application::locks::EventLocks;
use crate::application::notifier::{NotificationHandle, Notifier};
use crate::application::parsing::CommandParser;
use crate::application::resolver::Resolver;
use crate::domain::config::{CommandsConfig, NotifierConfig};
use crate::domain::errors::CommandError;
use crate::domain::traits::{ChatProvider, EventStore};
use crate::domain::types::{InboundMessage, Verb};
use crate::interface::commands::{self, Outcome, Reply};
use crate::strings::{logs, messages};

pub struct CommandRouter {
    commands: CommandsConfig,
    parser: CommandParser,
    store: Arc<dyn EventStore>,
    chat: Arc<dyn ChatProvider>,
    resolver: Resolver,
    notifier: Notifier,
    locks: EventLocks,
}

impl CommandRouter {
    pub fn new(
        commands: CommandsConfig,
        notifier: &NotifierConfig,
        store: Arc<dyn EventStore>,
        chat: Arc<dyn ChatProvider>,
    ) -> Result<Self> {
        Ok(Self {
            parser: CommandParser::new(&commands.triggers)?,
            commands,
            resolver: Resolver::new(store.clone()),
            notifier: Notifier::new(chat.clone(), notifier.max_concurrency),
            locks: EventLocks::default(),
            store,
            chat,
        })
    }

    /// Handle one inbound message. Messages without a trigger are ignored.
    ///
    /// Returns the handle of any notification fan-out the command started; callers that
    /// don't care may drop it.
    pub async fn route(&self, message: &InboundMessage) -> Option<NotificationHandle> {
        let line = self.parser.parse(&message.content)?;
        tracing::info!(
            "{}",
            logs::router_dispatch(line.verb.as_str(), line.body, &message.author_id)
        );

        if !self.commands.is_allowed(&message.author_id) {
            self.deliver(message, Reply::Channel(messages::NOT_ALLOWED.to_string()))
                .await;
            return None;
        }

        let store = self.store.as_ref();
        let args = line.body;
        let result = match line.verb {
            Verb::Create => commands::create::handle_create(store, message, args).await,
            Verb::Info => commands::info::handle_info(store, &self.resolver, args).await,
            Verb::Cancel => {
                commands::cancel::handle_cancel(
                    store,
                    &self.resolver,
                    &self.locks,
                    &self.notifier,
                    message,
                    args,
                )
                .await
            }
            Verb::Edit => {
                commands::edit::handle_edit(
                    store,
                    &self.resolver,
                    &self.locks,
                    &self.notifier,
                    message,
                    args,
                )
                .await
            }
            Verb::Rsvp => {
                commands::rsvp::handle_rsvp(store, &self.resolver, &self.locks, message, args)
                    .await
            }
            Verb::Help => Ok(commands::help::handle_help()),
            Verb::Unknown(_) => Ok(Outcome::channel(messages::UNKNOWN_COMMAND)),
        };

        match result {
            Ok(outcome) => {
                if let Some(reply) = outcome.reply {
                    self.deliver(message, reply).await;
                }
                outcome.notification
            }
            Err(err) => {
                match &err {
                    CommandError::Store(e) => {
                        tracing::error!("{}", logs::store_failure(&message.content, &e.to_string()))
                    }
                    other => tracing::info!("{}", logs::command_refused(&other.to_string())),
                }
                self.deliver(message, Reply::Channel(self.render_error(&err)))
                    .await;
                None
            }
        }
    }

    fn render_error(&self, err: &CommandError) -> String {
        match err {
            CommandError::Usage(guidance) => guidance.clone(),
            CommandError::NotFound(token) => messages::no_events_found(token),
            CommandError::Ambiguous { verb, candidates } => {
                messages::disambiguation(candidates, self.parser.primary_trigger(), verb)
            }
            CommandError::Unauthorized(event_name) => messages::not_creator(event_name),
            CommandError::Store(_) => messages::STORE_FAILURE.to_string(),
        }
    }

    async fn deliver(&self, message: &InboundMessage, reply: Reply) {
        let (target, sent) = match &reply {
            Reply::Channel(text) => (
                &message.channel_id,
                self.chat.send_channel_message(&message.channel_id, text).await,
            ),
            Reply::Private(text) => (
                &message.author_id,
                self.chat.send_private_message(&message.author_id, text).await,
            ),
        };
        if let Err(e) = sent {
            tracing::warn!("{}", logs::reply_failed(target, &e));
        }
    }
}
