//! # campus-core
//!
//! Core types and traits for the campus scheduling bot: [`Bot`], [`Handler`], inbound [`Event`]s,
//! outbound messages with inline keyboards, the university domain models, error types and tracing
//! initialization. Transport-agnostic; used by campus-storage, handler-chain and campus-bot.

pub mod bot;
pub mod error;
pub mod keyboard;
pub mod logger;
pub mod models;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, DialogError, Result};
pub use keyboard::{InlineButton, InlineKeyboard, OutgoingMessage, ParseMode};
pub use logger::{init_console_tracing, init_tracing, open_log_file};
pub use models::{DateRange, LessonType, Material, Role, Schedule, UserRecord};
pub use types::{CallbackEvent, Chat, Command, Event, Handler, HandlerResponse, TextMessage, User};
