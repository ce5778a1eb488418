//! Shared fixtures: a seeded in-memory database behind a switchable store, a recording bot and
//! a dialog controller wired to both.

#![allow(dead_code)]

pub mod flaky_store;
pub mod mock_bot;

use std::sync::Arc;

use campus_bot::{DialogController, QueryService, SessionStore};
use campus_core::{CallbackEvent, Chat, Event, Handler, TextMessage, User};
use campus_storage::{SeedData, UniversityRepository};
use schedule_cache::CacheLayer;

use flaky_store::FlakyStore;
use mock_bot::MockBot;

pub const FACULTY: &str = "Факультет Информатики";
pub const PAGE_SIZE: usize = 2;

pub struct Harness {
    pub bot: Arc<MockBot>,
    pub store: Arc<FlakyStore>,
    pub repo: UniversityRepository,
    pub cache: Arc<CacheLayer>,
    pub sessions: Arc<SessionStore>,
    pub query: Arc<QueryService>,
    pub controller: DialogController,
}

impl Harness {
    /// Seeded demo database in memory.
    pub async fn new() -> Self {
        let repo = UniversityRepository::new("sqlite::memory:").await.unwrap();
        repo.seed(&SeedData::demo()).await.unwrap();

        let store = Arc::new(FlakyStore::new(repo.clone()));
        let cache = Arc::new(CacheLayer::new());
        let query = Arc::new(QueryService::new(store.clone(), cache.clone()));
        let sessions = Arc::new(SessionStore::new());
        let bot = MockBot::new();
        let controller =
            DialogController::new(bot.clone(), sessions.clone(), query.clone(), PAGE_SIZE);

        Self {
            bot,
            store,
            repo,
            cache,
            sessions,
            query,
            controller,
        }
    }

    pub async fn text(&self, chat_id: i64, text: &str) {
        self.controller.handle(&text_event(chat_id, text)).await.unwrap();
    }

    pub async fn press(&self, chat_id: i64, data: &str) {
        self.controller
            .handle(&callback_event(chat_id, None, data))
            .await
            .unwrap();
    }

    pub async fn press_on(&self, chat_id: i64, message_id: &str, data: &str) {
        self.controller
            .handle(&callback_event(chat_id, Some(message_id), data))
            .await
            .unwrap();
    }

    /// Runs the whole registration dialog for the chat.
    pub async fn register(&self, chat_id: i64, group: &str, code: &str, password: &str) {
        self.text(chat_id, "/register").await;
        self.press(chat_id, &format!("faculty:{}", FACULTY)).await;
        self.press(chat_id, &format!("group:{}", group)).await;
        self.text(chat_id, code).await;
        self.text(chat_id, password).await;
    }
}

fn user(id: i64) -> User {
    User {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

pub fn text_event(chat_id: i64, text: &str) -> Event {
    Event::Text(TextMessage::new(
        format!("m{}", chat_id),
        user(chat_id),
        Chat::private(chat_id),
        text,
    ))
}

pub fn callback_event(chat_id: i64, message_id: Option<&str>, data: &str) -> Event {
    Event::Callback(CallbackEvent {
        id: format!("cb-{}-{}", chat_id, data),
        user: user(chat_id),
        chat: Chat::private(chat_id),
        message_id: message_id.map(str::to_string),
        data: data.to_string(),
    })
}
