//! Schedule views and material pages for a logged-in user, plus their navigation buttons.

use campus_core::{CallbackEvent, Chat, Command, OutgoingMessage, Result, UserRecord};
use chrono::{Local, NaiveDate};
use schedule_format::{
    paginate, parse_date, parse_month, parse_page_callback, render, render_materials, total_pages,
    ViewMode,
};
use tracing::debug;

use super::messages;
use super::{validation, DialogController, Toast};
use crate::query::Audience;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// View requested by `/day`, `/week` or `/month` with its optional date argument.
fn requested_view(command: &Command) -> Result<ViewMode> {
    let arg = command.arg();
    let mode = match command.name.as_str() {
        "day" => match arg {
            Some(raw) => parse_date(raw).map(ViewMode::day),
            None => Some(ViewMode::day(today())),
        },
        "week" => match arg {
            Some(raw) => parse_date(raw).map(ViewMode::week_of),
            None => Some(ViewMode::week_of(today())),
        },
        _ => match arg {
            Some(raw) => parse_month(raw).map(ViewMode::month_of),
            None => Some(ViewMode::month_of(today())),
        },
    };
    mode.ok_or_else(|| {
        let hint = if command.name == "month" {
            messages::MONTH_FORMAT_HINT
        } else {
            messages::DATE_FORMAT_HINT
        };
        validation(hint)
    })
}

impl DialogController {
    async fn current_user(&self, chat: &Chat) -> Result<Option<UserRecord>> {
        Ok(self.query.find_user_by_chat(chat.id).await?)
    }

    async fn render_view(&self, user: &UserRecord, mode: ViewMode) -> Result<OutgoingMessage> {
        let entries = self
            .query
            .schedules(Audience::of(user), Some(mode.range()))
            .await?;
        debug!(user_id = user.id, mode = ?mode, entries = entries.len(), "Rendering schedule view");
        Ok(render(&entries, mode, user.role).to_message())
    }

    /// Page `page` of the user's materials, or `None` when the page does not exist.
    async fn render_materials_page(
        &self,
        user: &UserRecord,
        page: usize,
    ) -> Result<Option<OutgoingMessage>> {
        let materials = self.query.materials(Audience::of(user)).await?;
        let pages = total_pages(materials.len(), self.materials_page_size);
        if page > 0 && page >= pages {
            return Ok(None);
        }
        Ok(Some(render_materials(
            &paginate(&materials, page, self.materials_page_size),
            user.role,
        )))
    }

    pub(super) async fn show_schedule(&self, chat: &Chat, command: &Command) -> Result<()> {
        let mode = requested_view(command)?;
        let Some(user) = self.current_user(chat).await? else {
            self.bot.send_text(chat, messages::NOT_LOGGED_IN).await?;
            return Ok(());
        };
        let message = self.render_view(&user, mode).await?;
        self.bot.send(chat, &message).await?;
        Ok(())
    }

    pub(super) async fn show_materials(&self, chat: &Chat) -> Result<()> {
        let Some(user) = self.current_user(chat).await? else {
            self.bot.send_text(chat, messages::NOT_LOGGED_IN).await?;
            return Ok(());
        };
        if let Some(message) = self.render_materials_page(&user, 0).await? {
            self.bot.send(chat, &message).await?;
        }
        Ok(())
    }

    /// `view:` and `mat:` buttons. Anything else is ignored.
    pub(super) async fn on_navigation(&self, callback: &CallbackEvent) -> Result<Toast> {
        let data = callback.data.as_str();
        let chat = &callback.chat;

        let view = ViewMode::parse_callback(data);
        let page = parse_page_callback(data);
        if view.is_none() && page.is_none() {
            return Ok(None);
        }

        let Some(user) = self.current_user(chat).await? else {
            return Ok(Some(messages::NOT_LOGGED_IN_TOAST));
        };

        let message = match (view, page) {
            (Some(mode), _) => self.render_view(&user, mode).await?,
            (None, Some(page)) => match self.render_materials_page(&user, page).await? {
                Some(message) => message,
                None => return Ok(Some(messages::PAGE_OUT_OF_RANGE)),
            },
            (None, None) => return Ok(None),
        };

        match callback.message_id.as_deref() {
            Some(message_id) => self.bot.edit(chat, message_id, &message).await?,
            None => {
                self.bot.send(chat, &message).await?;
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str) -> Command {
        Command::parse(text).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_requested_view_with_arguments() {
        assert_eq!(
            requested_view(&command("/day 2025-09-03")).unwrap(),
            ViewMode::Day(date(2025, 9, 3))
        );
        assert_eq!(
            requested_view(&command("/week 2025-09-03")).unwrap(),
            ViewMode::Week(date(2025, 9, 1))
        );
        assert_eq!(
            requested_view(&command("/month 2025-09")).unwrap(),
            ViewMode::Month(date(2025, 9, 1))
        );
    }

    #[test]
    fn test_requested_view_defaults_to_today() {
        assert_eq!(
            requested_view(&command("/day")).unwrap(),
            ViewMode::day(today())
        );
    }

    #[test]
    fn test_requested_view_rejects_bad_dates() {
        assert!(requested_view(&command("/day 03.09.2025")).is_err());
        assert!(requested_view(&command("/month 2025-13")).is_err());
    }
}
