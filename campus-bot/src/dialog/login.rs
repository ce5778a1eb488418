//! Login: code → password against an already-claimed account; success re-links it to this chat.

use campus_core::{Chat, OutgoingMessage, Result, TextMessage};
use tracing::info;

use super::messages;
use super::{state_error, validation, DialogController};
use crate::session::{Flow, FlowState, Scratch, Session};

impl DialogController {
    pub(super) async fn start_login(&self, chat: &Chat) -> Result<()> {
        self.sessions.set_state(
            Flow::Login,
            chat.id,
            FlowState::LoginAwaitingCode,
            Scratch::default(),
        );
        info!(chat_id = chat.id, "Login started");
        self.bot
            .send_and_track(chat, &OutgoingMessage::text(messages::LOGIN_ENTER_CODE))
            .await?;
        Ok(())
    }

    /// Text input while a login state is set.
    pub(super) async fn login_step(&self, msg: &TextMessage, session: Session) -> Result<()> {
        let chat = &msg.chat;
        let input = msg.text.trim();
        match session.state {
            FlowState::LoginAwaitingCode => self.on_login_code(chat, input).await,
            FlowState::LoginAwaitingPassword => {
                self.on_login_password(chat, input, session.scratch).await
            }
            other => Err(state_error(format!(
                "text received in login state {}",
                other.as_str()
            ))),
        }
    }

    async fn on_login_code(&self, chat: &Chat, code: &str) -> Result<()> {
        if code.is_empty() {
            return Err(validation(messages::EMPTY_CODE));
        }

        let Some(user) = self.query.find_claimed_user_by_code(code).await? else {
            info!(chat_id = chat.id, "Login code not matched; login state cleared");
            self.sessions.clear_state(Flow::Login, chat.id);
            self.retract(chat).await;
            self.bot
                .send_text(chat, messages::LOGIN_CODE_NOT_FOUND)
                .await?;
            return Ok(());
        };

        let scratch = Scratch {
            matched_user_id: Some(user.id),
            login_code: Some(code.to_string()),
            ..Scratch::default()
        };
        self.sessions
            .set_state(Flow::Login, chat.id, FlowState::LoginAwaitingPassword, scratch);
        self.bot
            .send_and_track(chat, &OutgoingMessage::text(messages::LOGIN_ENTER_PASSWORD))
            .await?;
        Ok(())
    }

    async fn on_login_password(&self, chat: &Chat, password: &str, scratch: Scratch) -> Result<()> {
        let Some(code) = scratch.login_code.as_deref() else {
            return Err(state_error("password step reached without a login code"));
        };

        let user = match self.query.find_claimed_user_by_code(code).await? {
            Some(user) if Some(user.id) == scratch.matched_user_id => user,
            _ => return Err(state_error("account changed during login")),
        };

        if user.password != password {
            info!(chat_id = chat.id, user_id = user.id, "Wrong password; retry in place");
            return Err(validation(messages::WRONG_PASSWORD));
        }

        if !self.query.bind_chat(user.id, chat.id).await? {
            return Err(state_error("account vanished before it could be bound"));
        }

        self.sessions.clear_state(Flow::Login, chat.id);
        info!(chat_id = chat.id, user_id = user.id, role = %user.role, "Login completed");
        self.retract(chat).await;
        self.bot.send_text(chat, &messages::login_done(&user.name)).await?;
        Ok(())
    }
}
