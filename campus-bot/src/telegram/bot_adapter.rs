//! Wraps teloxide::Bot and implements [`campus_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use campus_core::{
    parse_message_id, Bot as CoreBot, BotError, Chat, InlineKeyboard, OutgoingMessage, ParseMode,
    Result,
};
use dashmap::DashMap;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId,
    ParseMode as TelegramParseMode,
};
use tracing::{debug, warn};

fn to_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.text.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

fn bot_error(e: teloxide::RequestError) -> BotError {
    BotError::Bot(e.to_string())
}

/// teloxide::Bot plus the ids of messages sent with [`CoreBot::send_and_track`], per chat.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
    tracked: DashMap<i64, Vec<MessageId>>,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self {
            bot,
            tracked: DashMap::new(),
        }
    }

    async fn send_raw(&self, chat: &Chat, message: &OutgoingMessage) -> Result<MessageId> {
        let mut request = self.bot.send_message(ChatId(chat.id), message.text.clone());
        if message.parse_mode == Some(ParseMode::Html) {
            request = request.parse_mode(TelegramParseMode::Html);
        }
        if let Some(keyboard) = &message.keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }
        let sent = request.await.map_err(bot_error)?;
        Ok(sent.id)
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String> {
        Ok(self.send_raw(chat, message).await?.to_string())
    }

    async fn send_and_track(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String> {
        let id = self.send_raw(chat, message).await?;
        self.tracked.entry(chat.id).or_default().push(id);
        Ok(id.to_string())
    }

    async fn retract_tracked(&self, chat: &Chat) -> Result<usize> {
        let Some((_, ids)) = self.tracked.remove(&chat.id) else {
            return Ok(0);
        };
        for id in &ids {
            // Telegram refuses deletes of old or already-deleted messages; keep going.
            if let Err(e) = self.bot.delete_message(ChatId(chat.id), *id).await {
                warn!(chat_id = chat.id, message_id = %id, error = %e, "Failed to delete tracked message");
            }
        }
        debug!(chat_id = chat.id, count = ids.len(), "Retracted tracked messages");
        Ok(ids.len())
    }

    async fn edit(&self, chat: &Chat, message_id: &str, message: &OutgoingMessage) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request =
            self.bot
                .edit_message_text(ChatId(chat.id), MessageId(id), message.text.clone());
        if message.parse_mode == Some(ParseMode::Html) {
            request = request.parse_mode(TelegramParseMode::Html);
        }
        let markup = message
            .keyboard
            .as_ref()
            .map(to_markup)
            .unwrap_or_default();
        request.reply_markup(markup).await.map_err(bot_error)?;
        Ok(())
    }

    async fn acknowledge_callback(&self, callback_id: &str, toast: Option<&str>) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(text) = toast {
            request = request.text(text);
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }
}
