//! Adapters from Telegram (teloxide) types to campus_core events.

use campus_core::{CallbackEvent, Chat, Event, TextMessage, User};
use teloxide::types::{CallbackQuery, Message};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: if chat.is_private() {
            "private".to_string()
        } else {
            "group".to_string()
        },
    }
}

/// Text message → [`Event::Text`]. `None` for messages without text (stickers, photos, ...).
pub fn message_to_event(msg: &Message) -> Option<Event> {
    let text = msg.text()?;
    let user = msg
        .from
        .as_ref()
        .map(|u| TelegramUserWrapper(u).to_core())
        .unwrap_or_else(unknown_user);
    Some(Event::Text(TextMessage::new(
        msg.id.to_string(),
        user,
        core_chat(&msg.chat),
        text,
    )))
}

/// Button press → [`Event::Callback`]. The chat falls back to the sender's private chat when the
/// originating message is unavailable; presses without data are dropped.
pub fn callback_to_event(query: &CallbackQuery) -> Option<Event> {
    let data = query.data.clone()?;
    let user = TelegramUserWrapper(&query.from).to_core();
    let (chat, message_id) = match query.message.as_ref() {
        Some(message) => (core_chat(message.chat()), Some(message.id().to_string())),
        None => (Chat::private(user.id), None),
    };
    Some(Event::Callback(CallbackEvent {
        id: query.id.to_string(),
        user,
        chat,
        message_id,
        data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Иван".to_string(),
            last_name: Some("Иванов".to_string()),
            username: Some("ivan".to_string()),
            language_code: Some("ru".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("ivan".to_string()));
        assert_eq!(core_user.first_name, Some("Иван".to_string()));
        assert_eq!(core_user.last_name, Some("Иванов".to_string()));
    }
}
