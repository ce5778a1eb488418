//! Core types: user, chat, inbound events (text and callback), handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transport user identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (private or group) identity. `id` is the chat identity the dialog state is keyed by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// Private chat with the given id.
    pub fn private(id: i64) -> Self {
        Self {
            id,
            chat_type: "private".to_string(),
        }
    }
}

/// Bot command parsed from text such as `/week@campus_bot 2025-01-13`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Lowercased command name without the leading slash or `@botname` suffix.
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    /// Parses a command from message text. Returns `None` when the text is not a command.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let head = parts.next()?;
        let name = head.split('@').next().unwrap_or(head).to_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            args: parts.map(str::to_string).collect(),
        })
    }

    /// First argument, if any.
    pub fn arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Inbound text message. `command` is set when the text starts with `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMessage {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub text: String,
    pub command: Option<Command>,
    pub created_at: DateTime<Utc>,
}

impl TextMessage {
    /// Builds a text message and parses its command, if any.
    pub fn new(id: impl Into<String>, user: User, chat: Chat, text: impl Into<String>) -> Self {
        let text = text.into();
        let command = Command::parse(&text);
        Self {
            id: id.into(),
            user,
            chat,
            text,
            command,
            created_at: Utc::now(),
        }
    }

    pub fn is_command(&self) -> bool {
        self.command.is_some()
    }
}

/// Inline button press. `message_id` is the message carrying the keyboard, when the transport knows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackEvent {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub message_id: Option<String>,
    pub data: String,
}

/// Any inbound event the dialog reacts to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Text(TextMessage),
    Callback(CallbackEvent),
}

impl Event {
    pub fn chat(&self) -> &Chat {
        match self {
            Event::Text(m) => &m.chat,
            Event::Callback(c) => &c.chat,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Event::Text(m) => &m.user,
            Event::Callback(c) => &c.user,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Text(m) if m.is_command() => "command",
            Event::Text(_) => "text",
            Event::Callback(_) => "callback",
        }
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _event: &Event) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the event. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _event: &Event) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _event: &Event,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
