//! Application entry points behind the CLI: `run` (bot) and `seed` (demo dataset).

use std::sync::Arc;

use anyhow::Result;
use campus_core::init_tracing;
use campus_storage::{SeedData, UniversityRepository};
use handler_chain::ChatSequencer;
use tracing::{info, instrument};

use crate::components::{
    build_bot_components, build_handler_chain, build_teloxide_bot, telegram_bot_adapter,
};
use crate::config::BotConfig;
use crate::telegram::run_dispatcher;

/// Main entry: validate config, init logging, build components and handler chain, then dispatch updates.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        cache_ttl_secs = config.schedule_cache_ttl().as_secs(),
        page_size = config.materials_page_size(),
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let teloxide_bot = build_teloxide_bot(&config);
    let chain = build_handler_chain(&components, telegram_bot_adapter(&teloxide_bot), &config);
    let sequencer = Arc::new(ChatSequencer::new(chain));

    info!("Bot started successfully");

    run_dispatcher(teloxide_bot, sequencer).await
}

/// Creates the schema if needed and loads the demo dataset.
#[instrument]
pub async fn run_seed(database_url: &str) -> Result<()> {
    let repo = UniversityRepository::new(database_url).await?;
    repo.seed(&SeedData::demo()).await?;
    info!(database_url = %database_url, "Demo data loaded");
    Ok(())
}
