//! Bot abstraction for sending, editing and retracting messages.
//!
//! [`Bot`] is transport-agnostic; campus-bot implements it over teloxide and tests substitute a recording mock.

use crate::error::{BotError, Result};
use crate::keyboard::OutgoingMessage;
use crate::types::Chat;
use async_trait::async_trait;

/// Abstraction for outbound messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a message and returns its transport id.
    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String>;

    /// Same as [`Bot::send`], but the message is remembered so [`Bot::retract_tracked`] can delete it later.
    async fn send_and_track(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String>;

    /// Deletes every tracked message of the chat. Best effort; returns how many were removed from tracking.
    async fn retract_tracked(&self, chat: &Chat) -> Result<usize>;

    /// Replaces the text and keyboard of an already-sent message.
    async fn edit(&self, chat: &Chat, message_id: &str, message: &OutgoingMessage) -> Result<()>;

    /// Answers a button press, optionally with a short toast.
    async fn acknowledge_callback(&self, callback_id: &str, toast: Option<&str>) -> Result<()>;

    /// Convenience: plain text without keyboard.
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<String> {
        self.send(chat, &OutgoingMessage::text(text)).await
    }
}

/// Parses a message id string into an i32. Used by edit and delete.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Bot(format!("Invalid message_id: {}", s)))
}
