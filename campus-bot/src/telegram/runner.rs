//! Update loop: teloxide Dispatcher with message and callback branches. Each update becomes a
//! campus_core Event and is queued on the chat's sequencer, so the dispatcher never waits on handlers.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::ChatSequencer;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message};
use tracing::{debug, info, instrument};

use super::adapters::{callback_to_event, message_to_event};

async fn on_message(msg: Message, sequencer: Arc<ChatSequencer>) -> ResponseResult<()> {
    match message_to_event(&msg) {
        Some(event) => sequencer.submit(event),
        None => debug!(chat_id = msg.chat.id.0, "Ignoring non-text message"),
    }
    Ok(())
}

async fn on_callback(query: CallbackQuery, sequencer: Arc<ChatSequencer>) -> ResponseResult<()> {
    match callback_to_event(&query) {
        Some(event) => sequencer.submit(event),
        None => debug!(user_id = query.from.id.0, "Ignoring callback without data"),
    }
    Ok(())
}

/// Runs until Ctrl-C. Logs the bot username first when getMe succeeds.
#[instrument(skip(bot, sequencer))]
pub async fn run_dispatcher(bot: teloxide::Bot, sequencer: Arc<ChatSequencer>) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Dispatcher starting");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![sequencer])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
