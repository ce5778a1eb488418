//! Bot configuration: BaseConfig (Telegram + log + DB) + DialogSettings (cache TTL, page size).

mod base;
mod bot_config;
mod dialog;

#[cfg(test)]
mod tests;

pub use base::{database_url_from_env, BaseConfig, DEFAULT_DATABASE_URL};
pub use bot_config::BotConfig;
pub use dialog::DialogSettings;
