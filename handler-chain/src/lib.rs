//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound event: every handler's `before` in order (any may
//! stop the chain), then `handle` until the first Stop or Reply, then every `after` in reverse order.
//!
//! [`ChatSequencer`] sits in front of the chain and guarantees that events of one chat are handled
//! one at a time in arrival order while different chats run concurrently.

mod sequencer;

pub use sequencer::ChatSequencer;

use campus_core::{Event, Handler, HandlerResponse, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered handlers: before in order, handle until Stop/Reply, after in reverse order.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs the three phases and returns the first Stop or Reply, or Continue.
    #[instrument(skip(self, event), fields(chat_id = event.chat().id, kind = event.kind()))]
    pub async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        info!(
            user_id = event.user().id,
            chat_id = event.chat().id,
            "step: handler_chain started"
        );

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(event).await? {
                info!(
                    chat_id = event.chat().id,
                    handler = %handler_name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(event).await?;
            debug!(
                handler = %handler_name,
                response = ?response,
                "Handler processed"
            );

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        chat_id = event.chat().id,
                        handler = %handler_name,
                        "step: handler chain stopped by handler"
                    );
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(event, &final_response).await?;
        }

        info!(chat_id = event.chat().id, "step: handler_chain finished");

        Ok(final_response)
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs
