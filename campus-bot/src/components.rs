//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use campus_core::Bot as CoreBot;
use campus_storage::{UniversityRepository, UniversityStore};
use handler_chain::HandlerChain;
use schedule_cache::CacheLayer;
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::dialog::DialogController;
use crate::logging::LoggingHandler;
use crate::query::QueryService;
use crate::session::SessionStore;
use crate::telegram::TelegramBotAdapter;

/// Shared services behind the dialog controller.
#[derive(Clone)]
pub struct BotComponents {
    pub store: Arc<dyn UniversityStore>,
    pub cache: Arc<CacheLayer>,
    pub query: Arc<QueryService>,
    pub sessions: Arc<SessionStore>,
}

impl BotComponents {
    /// Wires the query service and a fresh session store around an existing store.
    pub fn with_store(store: Arc<dyn UniversityStore>, config: &BotConfig) -> Self {
        let cache = Arc::new(CacheLayer::with_ttl(config.schedule_cache_ttl()));
        let query = Arc::new(QueryService::new(store.clone(), cache.clone()));
        Self {
            store,
            cache,
            query,
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

/// Opens the database (creating tables) and builds components on top of it.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let repo = UniversityRepository::new(config.database_url())
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url(),
                "Failed to initialize university storage"
            );
            anyhow::anyhow!("Failed to initialize university storage: {}", e)
        })?;
    info!(database_url = %config.database_url(), "University storage ready");
    Ok(BotComponents::with_store(Arc::new(repo), config))
}

/// teloxide Bot with the optional custom API URL applied.
pub fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// LoggingHandler, then the dialog controller.
pub fn build_handler_chain(
    components: &BotComponents,
    bot: Arc<dyn CoreBot>,
    config: &BotConfig,
) -> HandlerChain {
    let dialog = DialogController::new(
        bot,
        components.sessions.clone(),
        components.query.clone(),
        config.materials_page_size(),
    );
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(dialog))
}

/// Adapter used as the outbound [`CoreBot`] in production.
pub fn telegram_bot_adapter(bot: &teloxide::Bot) -> Arc<dyn CoreBot> {
    Arc::new(TelegramBotAdapter::new(bot.clone()))
}
