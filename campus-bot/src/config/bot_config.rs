//! BotConfig: BaseConfig + DialogSettings. Use load() for env-based loading.

use anyhow::Result;
use std::time::Duration;

use super::{BaseConfig, DialogSettings};

/// Bot config. Call validate() after load() to fail fast before init.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub dialog: DialogSettings,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let dialog = DialogSettings::from_env()?;
        Ok(Self { base, dialog })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.dialog.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn schedule_cache_ttl(&self) -> Duration {
        self.dialog.schedule_cache_ttl()
    }
    pub fn materials_page_size(&self) -> usize {
        self.dialog.materials_page_size
    }
}
