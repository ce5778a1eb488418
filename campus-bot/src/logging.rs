//! Handler that logs every inbound event and its outcome.

use async_trait::async_trait;
use campus_core::{Event, Handler, HandlerResponse, Result};
use tracing::{debug, info, instrument};

/// Logs each event in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &Event) -> Result<bool> {
        let user = event.user();
        match event {
            Event::Text(msg) => info!(
                user_id = user.id,
                chat_id = msg.chat.id,
                username = %user.username.as_deref().unwrap_or("unknown"),
                kind = event.kind(),
                // Passwords travel as plain text; only commands are logged verbatim.
                command = %msg.command.as_ref().map(|c| c.name.as_str()).unwrap_or("-"),
                "Received message"
            ),
            Event::Callback(callback) => info!(
                user_id = user.id,
                chat_id = callback.chat.id,
                username = %user.username.as_deref().unwrap_or("unknown"),
                data = %callback.data,
                "Received callback"
            ),
        }
        Ok(true)
    }

    #[instrument(skip(self, event, response))]
    async fn after(&self, event: &Event, response: &HandlerResponse) -> Result<()> {
        debug!(
            chat_id = event.chat().id,
            kind = event.kind(),
            response = ?response,
            "Processed event"
        );
        Ok(())
    }
}
