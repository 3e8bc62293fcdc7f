//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the `matrix_sdk`.
//! Channels are Matrix rooms; a private channel is the direct-message room shared with a user,
//! reused when one exists and created otherwise.

use crate::domain::traits::ChatProvider;
use crate::strings::logs;
use async_trait::async_trait;
use matrix_sdk::Client;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;
use matrix_sdk::ruma::{RoomId, UserId};

#[derive(Clone)]
pub struct MatrixService {
    client: Client,
}

impl MatrixService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn room(&self, channel_id: &str) -> Result<Room, String> {
        let room_id = RoomId::parse(channel_id).map_err(|e| e.to_string())?;
        self.client
            .get_room(&room_id)
            .ok_or_else(|| format!("Not a member of room {channel_id}"))
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    async fn send_channel_message(&self, channel_id: &str, content: &str) -> Result<String, String> {
        tracing::info!("{}", logs::sending_message(channel_id, content));
        self.room(channel_id)?
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }

    async fn open_private_channel(&self, user_id: &str) -> Result<String, String> {
        let user_id = UserId::parse(user_id).map_err(|e| e.to_string())?;
        if let Some(room) = self.client.get_dm_room(&user_id) {
            return Ok(room.room_id().as_str().to_string());
        }
        self.client
            .create_dm(&user_id)
            .await
            .map(|room| room.room_id().as_str().to_string())
            .map_err(|e| e.to_string())
    }
}
