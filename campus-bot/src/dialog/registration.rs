//! Registration: faculty → group → code → password, claiming an unclaimed user record.

use campus_core::{CallbackEvent, Chat, OutgoingMessage, Result, TextMessage};
use tracing::info;

use super::messages::{self, FACULTY_CALLBACK_PREFIX, GROUP_CALLBACK_PREFIX};
use super::{not_found, state_error, validation, DialogController, Toast};
use crate::session::{Flow, FlowState, Scratch, Session};

impl DialogController {
    /// `/register`: offers the faculties and enters AwaitingFaculty with fresh scratch.
    pub(super) async fn start_registration(&self, chat: &Chat) -> Result<()> {
        let faculties = self.query.list_faculties().await?;
        if faculties.is_empty() {
            self.bot.send_text(chat, messages::NO_FACULTIES).await?;
            return Ok(());
        }

        self.sessions.set_state(
            Flow::Registration,
            chat.id,
            FlowState::AwaitingFaculty,
            Scratch::default(),
        );
        info!(chat_id = chat.id, "Registration started");
        self.bot
            .send_and_track(chat, &messages::faculty_keyboard(&faculties))
            .await?;
        Ok(())
    }

    /// Text input while a registration state is set.
    pub(super) async fn registration_step(&self, msg: &TextMessage, session: Session) -> Result<()> {
        match session.state {
            FlowState::AwaitingFaculty | FlowState::AwaitingGroup => {
                Err(validation(messages::USE_BUTTONS))
            }
            FlowState::AwaitingCode => self.on_code(&msg.chat, msg.text.trim(), session.scratch).await,
            FlowState::AwaitingPassword => {
                self.on_password(&msg.chat, msg.text.trim(), session.scratch)
                    .await
            }
            other => Err(state_error(format!(
                "text received in registration state {}",
                other.as_str()
            ))),
        }
    }

    pub(super) async fn on_faculty_pick(
        &self,
        callback: &CallbackEvent,
        session: Session,
    ) -> Result<Toast> {
        let Some(faculty) = callback.data.strip_prefix(FACULTY_CALLBACK_PREFIX) else {
            return Ok(None);
        };
        let chat = &callback.chat;

        let faculties = self.query.list_faculties().await?;
        if !faculties.iter().any(|f| f == faculty) {
            return Ok(Some(messages::UNKNOWN_FACULTY));
        }

        let groups = self.query.list_groups(faculty).await?;
        if groups.is_empty() {
            self.bot
                .send_and_track(chat, &OutgoingMessage::text(messages::NO_GROUPS))
                .await?;
            return Ok(None);
        }

        let scratch = Scratch {
            faculty: Some(faculty.to_string()),
            ..session.scratch
        };
        self.sessions
            .set_state(Flow::Registration, chat.id, FlowState::AwaitingGroup, scratch);
        self.bot
            .send_and_track(chat, &messages::group_keyboard(faculty, &groups))
            .await?;
        Ok(None)
    }

    pub(super) async fn on_group_pick(
        &self,
        callback: &CallbackEvent,
        session: Session,
    ) -> Result<Toast> {
        let Some(group) = callback.data.strip_prefix(GROUP_CALLBACK_PREFIX) else {
            return Ok(None);
        };
        let chat = &callback.chat;
        let Some(faculty) = session.scratch.faculty.as_deref() else {
            return Err(state_error("group picked without a faculty"));
        };

        let groups = self.query.list_groups(faculty).await?;
        if !groups.iter().any(|g| g == group) {
            return Ok(Some(messages::UNKNOWN_GROUP));
        }

        let scratch = Scratch {
            group: Some(group.to_string()),
            ..session.scratch
        };
        self.sessions
            .set_state(Flow::Registration, chat.id, FlowState::AwaitingCode, scratch);
        self.bot
            .send_and_track(chat, &OutgoingMessage::text(messages::ENTER_CODE))
            .await?;
        Ok(None)
    }

    async fn on_code(&self, chat: &Chat, code: &str, scratch: Scratch) -> Result<()> {
        if code.is_empty() {
            return Err(validation(messages::EMPTY_CODE));
        }
        let (Some(faculty), Some(group)) = (scratch.faculty.as_deref(), scratch.group.as_deref())
        else {
            return Err(state_error("code step reached without faculty and group"));
        };

        let Some(user) = self.query.find_unclaimed_user(faculty, group, code).await? else {
            info!(chat_id = chat.id, group = %group, "Registration code not matched");
            return Err(not_found(messages::CODE_NOT_FOUND));
        };

        info!(chat_id = chat.id, user_id = user.id, "Registration code matched");
        let scratch = Scratch {
            matched_user_id: Some(user.id),
            ..scratch
        };
        self.sessions
            .set_state(Flow::Registration, chat.id, FlowState::AwaitingPassword, scratch);
        self.bot
            .send_and_track(chat, &OutgoingMessage::text(messages::password_prompt(&user.name)))
            .await?;
        Ok(())
    }

    async fn on_password(&self, chat: &Chat, password: &str, scratch: Scratch) -> Result<()> {
        if password.is_empty() {
            return Err(validation(messages::EMPTY_PASSWORD));
        }
        let Some(user_id) = scratch.matched_user_id else {
            return Err(state_error("password step reached without a matched user"));
        };

        let user = match self.query.find_user_by_id(user_id).await? {
            Some(user) if !user.is_claimed() => user,
            _ => return self.abort_stale(chat).await,
        };

        if !self.query.claim_user(user.id, chat.id, password).await? {
            return self.abort_stale(chat).await;
        }

        self.sessions.clear_state(Flow::Registration, chat.id);
        info!(chat_id = chat.id, user_id = user.id, role = %user.role, "Registration completed");
        self.retract(chat).await;
        self.bot
            .send_text(chat, &messages::registration_done(&user.name))
            .await?;
        Ok(())
    }

    /// The matched record vanished or was claimed by someone else meanwhile.
    async fn abort_stale(&self, chat: &Chat) -> Result<()> {
        info!(chat_id = chat.id, "Matched user no longer claimable; registration aborted");
        self.sessions.clear_state(Flow::Registration, chat.id);
        self.retract(chat).await;
        self.bot
            .send_text(chat, messages::REGISTRATION_STALE)
            .await?;
        Ok(())
    }
}
