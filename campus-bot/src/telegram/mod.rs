//! Telegram transport: adapters to core events, Bot implementation, dispatcher runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{callback_to_event, message_to_event, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_dispatcher;
