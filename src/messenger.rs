//! # Messenger
//!
//! Outbound messaging seam. The engine only ever asks for three things:
//! post a notification, repaint the live board, and start a fresh board
//! message. Everything Discord sits behind this trait so the engine can be
//! exercised with a recording fake.
//!
//! Delivery failures are logged and dropped here; the engine never retries
//! and registry state is unaffected.

use async_trait::async_trait;
use log::{debug, warn};
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;
use tokio::sync::Mutex;

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Fire-and-forget notification to the reminder channel.
    async fn notify(&self, text: &str);

    /// Replace the live board with freshly rendered text.
    async fn render(&self, text: &str);

    /// Abandon the current board message; the next render posts a new one.
    async fn reset_board(&self);
}

/// Posts notifications and maintains a single editable board message in the
/// configured channel.
pub struct DiscordMessenger {
    http: Arc<Http>,
    channel_id: ChannelId,
    board_message: Mutex<Option<MessageId>>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>, channel_id: u64) -> Self {
        DiscordMessenger {
            http,
            channel_id: ChannelId(channel_id),
            board_message: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn notify(&self, text: &str) {
        if let Err(e) = self.channel_id.say(&self.http, text).await {
            warn!("Failed to post notification: {e}");
        }
    }

    async fn render(&self, text: &str) {
        let mut board = self.board_message.lock().await;
        if let Some(message_id) = *board {
            match self
                .channel_id
                .edit_message(&self.http, message_id, |m| m.content(text))
                .await
            {
                Ok(_) => return,
                Err(e) => {
                    // Message was likely deleted out from under us; fall
                    // through and post a replacement.
                    warn!("Failed to edit board message {message_id}: {e}");
                    *board = None;
                }
            }
        }
        match self.channel_id.say(&self.http, text).await {
            Ok(message) => *board = Some(message.id),
            Err(e) => warn!("Failed to post board message: {e}"),
        }
    }

    async fn reset_board(&self) {
        *self.board_message.lock().await = None;
        debug!("Board reset; next render posts a fresh message");
    }
}
