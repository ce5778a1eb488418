//! Dialog controller: interprets each inbound event against the chat's session state, calls the
//! query service and the formatter, and emits the replies.
//!
//! Routing order for text: `/cancel`, then login state, then registration state, then command
//! dispatch. Callbacks go to the registration flow when it awaits a faculty or group pick, to
//! navigation when no flow is active, and are otherwise acknowledged without effect.
//!
//! Steps return `BotError::Dialog` for expected outcomes; [`DialogController::settle`] is the
//! single place that turns them into user-visible text and state transitions.

mod browse;
mod login;
pub mod messages;
mod registration;

use std::sync::Arc;

use async_trait::async_trait;
use campus_core::{
    Bot, BotError, CallbackEvent, Chat, Command, DialogError, Event, Handler, HandlerResponse,
    Result, TextMessage,
};
use tracing::{error, info, instrument, warn};

use crate::query::QueryService;
use crate::session::{Flow, FlowState, SessionStore};

/// Reply to a button press: `None` acknowledges silently.
type Toast = Option<&'static str>;

pub struct DialogController {
    bot: Arc<dyn Bot>,
    sessions: Arc<SessionStore>,
    query: Arc<QueryService>,
    materials_page_size: usize,
}

impl DialogController {
    pub fn new(
        bot: Arc<dyn Bot>,
        sessions: Arc<SessionStore>,
        query: Arc<QueryService>,
        materials_page_size: usize,
    ) -> Self {
        Self {
            bot,
            sessions,
            query,
            materials_page_size: materials_page_size.max(1),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[instrument(skip(self, msg), fields(chat_id = msg.chat.id))]
    async fn on_text(&self, msg: &TextMessage) -> Result<()> {
        let chat = &msg.chat;

        if msg.command.as_ref().is_some_and(|c| c.name == "cancel") {
            return self.cancel(chat).await;
        }

        if let Some(session) = self.sessions.get(Flow::Login, chat.id) {
            let outcome = self.login_step(msg, session).await;
            return self.settle(chat, Some(Flow::Login), outcome).await;
        }

        if let Some(session) = self.sessions.get(Flow::Registration, chat.id) {
            let outcome = self.registration_step(msg, session).await;
            return self.settle(chat, Some(Flow::Registration), outcome).await;
        }

        match &msg.command {
            Some(command) => {
                let outcome = self.dispatch_command(chat, command).await;
                self.settle(chat, None, outcome).await
            }
            None => self.bot.send_text(chat, messages::NO_STATE_HINT).await.map(|_| ()),
        }
    }

    async fn dispatch_command(&self, chat: &Chat, command: &Command) -> Result<()> {
        info!(chat_id = chat.id, command = %command.name, "Dispatching command");
        match command.name.as_str() {
            "start" => self.bot.send_text(chat, messages::GREETING).await.map(|_| ()),
            "help" => self.bot.send_text(chat, messages::HELP).await.map(|_| ()),
            "register" => self.start_registration(chat).await,
            "login" => self.start_login(chat).await,
            "day" | "week" | "month" => self.show_schedule(chat, command).await,
            "materials" => self.show_materials(chat).await,
            _ => self
                .bot
                .send_text(chat, messages::UNKNOWN_COMMAND)
                .await
                .map(|_| ()),
        }
    }

    async fn cancel(&self, chat: &Chat) -> Result<()> {
        if self.sessions.clear_all(chat.id) {
            info!(chat_id = chat.id, "Flow cancelled");
            self.retract(chat).await;
            self.bot.send_text(chat, messages::CANCELLED).await?;
        } else {
            self.bot.send_text(chat, messages::NOTHING_TO_CANCEL).await?;
        }
        Ok(())
    }

    #[instrument(skip(self, callback), fields(chat_id = callback.chat.id, data = %callback.data))]
    async fn on_callback(&self, callback: &CallbackEvent) -> Result<()> {
        let chat = &callback.chat;
        let registration = self.sessions.get(Flow::Registration, chat.id);

        let (flow, outcome) = match registration {
            Some(session) if session.state == FlowState::AwaitingFaculty => (
                Some(Flow::Registration),
                self.on_faculty_pick(callback, session).await,
            ),
            Some(session) if session.state == FlowState::AwaitingGroup => (
                Some(Flow::Registration),
                self.on_group_pick(callback, session).await,
            ),
            Some(_) => (None, Ok(None)),
            None if self.sessions.get_state(Flow::Login, chat.id).is_some() => (None, Ok(None)),
            None => (None, self.on_navigation(callback).await),
        };

        let toast = match outcome {
            Ok(toast) => toast,
            Err(e) => {
                self.settle(chat, flow, Err(e)).await?;
                None
            }
        };
        self.bot.acknowledge_callback(&callback.id, toast).await
    }

    /// Turns a step's dialog outcome into a reply. Transport errors pass through.
    async fn settle(&self, chat: &Chat, flow: Option<Flow>, outcome: Result<()>) -> Result<()> {
        let err = match outcome {
            Ok(()) => return Ok(()),
            Err(BotError::Dialog(err)) => err,
            Err(other) => return Err(other),
        };

        match err {
            DialogError::NotFound(text) | DialogError::Validation(text) => {
                self.send_in_flow(chat, flow, text).await
            }
            DialogError::Store(detail) => {
                error!(chat_id = chat.id, error = %detail, "Store failure; state left unchanged");
                self.send_in_flow(chat, flow, messages::STORE_ERROR.to_string())
                    .await
            }
            DialogError::State(detail) => {
                warn!(chat_id = chat.id, flow = ?flow, reason = %detail, "Flow aborted");
                if let Some(flow) = flow {
                    self.sessions.clear_state(flow, chat.id);
                }
                self.retract(chat).await;
                self.bot.send_text(chat, messages::FLOW_ABORTED).await.map(|_| ())
            }
        }
    }

    /// Messages sent while a flow is active are tracked so they can be retracted when it ends.
    async fn send_in_flow(&self, chat: &Chat, flow: Option<Flow>, text: String) -> Result<()> {
        let still_active = flow.is_some_and(|f| self.sessions.get_state(f, chat.id).is_some());
        let message = campus_core::OutgoingMessage::text(text);
        if still_active {
            self.bot.send_and_track(chat, &message).await?;
        } else {
            self.bot.send(chat, &message).await?;
        }
        Ok(())
    }

    /// Best effort; a failed delete must not break the reply.
    async fn retract(&self, chat: &Chat) {
        if let Err(e) = self.bot.retract_tracked(chat).await {
            warn!(chat_id = chat.id, error = %e, "Failed to retract tracked messages");
        }
    }
}

#[async_trait]
impl Handler for DialogController {
    async fn handle(&self, event: &Event) -> Result<HandlerResponse> {
        match event {
            Event::Text(msg) => self.on_text(msg).await?,
            Event::Callback(callback) => self.on_callback(callback).await?,
        }
        Ok(HandlerResponse::Stop)
    }
}

fn not_found(text: impl Into<String>) -> BotError {
    BotError::Dialog(DialogError::NotFound(text.into()))
}

fn validation(text: impl Into<String>) -> BotError {
    BotError::Dialog(DialogError::Validation(text.into()))
}

fn state_error(reason: impl Into<String>) -> BotError {
    BotError::Dialog(DialogError::State(reason.into()))
}
