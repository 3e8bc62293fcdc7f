//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix, SQLite event store
//! - Application: Router, Resolver, Notifier, Logging
//! - Interface: Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::logging;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::types::InboundMessage;
use crate::infrastructure::matrix::MatrixService;
use crate::infrastructure::store::SqliteStore;
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(version, about = "Chat-driven event planner bot")]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Directory for the session log.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let _guard = logging::init(&args.data_dir)?;
    tracing::info!("{}", logs::STARTING);
    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));

    // 3. Event Store
    let store = Arc::new(
        SqliteStore::connect(&config.database)
            .await
            .context("Failed to open event store")?,
    );
    tracing::info!("{}", logs::store_opened(&config.database.url));

    // 4. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await
        .context("Matrix login failed")?;
    tracing::info!("{}", logs::logged_in(&config.services.matrix.username));

    if let Some(name) = &config.services.matrix.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    let chat = Arc::new(MatrixService::new(client.clone()));
    let router = Arc::new(CommandRouter::new(
        config.commands.clone(),
        &config.notifier,
        store,
        chat,
    )?);

    // 5. Event Handlers
    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = router.clone();
        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }
            if original_msg.sender == room.own_user_id() {
                return;
            }
            let MessageType::Text(text_content) = &original_msg.content.msgtype else {
                return;
            };

            let author_username = match room.get_member_no_sync(&original_msg.sender).await {
                Ok(Some(member)) => member
                    .display_name()
                    .unwrap_or_else(|| original_msg.sender.localpart())
                    .to_string(),
                _ => original_msg.sender.localpart().to_string(),
            };

            let message = InboundMessage {
                content: text_content.body.clone(),
                channel_id: room.room_id().to_string(),
                author_id: original_msg.sender.to_string(),
                author_username,
            };

            // Commands run off the sync loop; notifications finish in the background.
            tokio::spawn(async move {
                let _ = router.route(&message).await;
            });
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership != MembershipState::Invite || ev.state_key != room.own_user_id()
        {
            return;
        }
        tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
        if let Err(e) = room.join().await {
            tracing::error!("{}", logs::join_invite_fail(&e.to_string()));
        }
    });

    // 6. Sync Loop
    tracing::info!("{}", logs::SYNC_LOOP_START);
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
