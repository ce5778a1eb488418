//! Query service: the dialog's only path to the relational store, cache-first where data is cacheable.
//!
//! "No rows" comes back as `Ok(None)` or an empty vector; store failures come back as
//! [`DialogError::Store`] so the dialog can tell them apart.

use std::sync::Arc;

use campus_core::{DateRange, DialogError, Material, Role, Schedule, UserRecord};
use campus_storage::{StorageError, UniversityStore};
use schedule_cache::CacheLayer;
use tracing::{debug, instrument};

pub type QueryResult<T> = std::result::Result<T, DialogError>;

fn store_error(e: StorageError) -> DialogError {
    DialogError::Store(e.to_string())
}

/// Whose schedule or materials to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience<'a> {
    Group(&'a str),
    Teacher(&'a str),
}

impl<'a> Audience<'a> {
    /// Teachers see their own lessons; everyone else sees their group's.
    pub fn of(user: &'a UserRecord) -> Self {
        match user.role {
            Role::Teacher => Audience::Teacher(&user.registration_code),
            Role::Student | Role::Admin => Audience::Group(&user.group_name),
        }
    }

    fn key(&self) -> &'a str {
        match *self {
            Audience::Group(key) | Audience::Teacher(key) => key,
        }
    }
}

pub struct QueryService {
    store: Arc<dyn UniversityStore>,
    cache: Arc<CacheLayer>,
}

impl QueryService {
    pub fn new(store: Arc<dyn UniversityStore>, cache: Arc<CacheLayer>) -> Self {
        Self { store, cache }
    }

    pub async fn find_unclaimed_user(
        &self,
        faculty: &str,
        group: &str,
        code: &str,
    ) -> QueryResult<Option<UserRecord>> {
        self.store
            .find_unclaimed_user(faculty, group, code)
            .await
            .map_err(store_error)
    }

    pub async fn find_claimed_user_by_code(&self, code: &str) -> QueryResult<Option<UserRecord>> {
        self.store
            .find_claimed_user_by_code(code)
            .await
            .map_err(store_error)
    }

    pub async fn find_user_by_id(&self, id: i64) -> QueryResult<Option<UserRecord>> {
        self.store.find_user_by_id(id).await.map_err(store_error)
    }

    pub async fn find_user_by_chat(&self, chat_id: i64) -> QueryResult<Option<UserRecord>> {
        self.store.find_user_by_chat(chat_id).await.map_err(store_error)
    }

    /// False when the record was claimed in the meantime.
    pub async fn claim_user(&self, id: i64, chat_id: i64, password: &str) -> QueryResult<bool> {
        self.store
            .claim_user(id, chat_id, password)
            .await
            .map_err(store_error)
    }

    pub async fn bind_chat(&self, id: i64, chat_id: i64) -> QueryResult<bool> {
        self.store.bind_chat(id, chat_id).await.map_err(store_error)
    }

    #[instrument(skip(self))]
    pub async fn list_faculties(&self) -> QueryResult<Arc<Vec<String>>> {
        if let Some(faculties) = self.cache.get_faculties() {
            debug!("Faculty list from cache");
            return Ok(faculties);
        }
        let faculties = self.store.list_faculties().await.map_err(store_error)?;
        Ok(self.cache.set_faculties(faculties))
    }

    #[instrument(skip(self))]
    pub async fn list_groups(&self, faculty: &str) -> QueryResult<Arc<Vec<String>>> {
        if let Some(groups) = self.cache.get_groups(faculty) {
            debug!(faculty = %faculty, "Group list from cache");
            return Ok(groups);
        }
        let groups = self.store.list_groups(faculty).await.map_err(store_error)?;
        Ok(self.cache.set_groups(faculty, groups))
    }

    pub async fn schedules_for_group(
        &self,
        group: &str,
        range: Option<DateRange>,
    ) -> QueryResult<Vec<Schedule>> {
        self.schedules(Audience::Group(group), range).await
    }

    pub async fn schedules_for_teacher(
        &self,
        reg_code: &str,
        range: Option<DateRange>,
    ) -> QueryResult<Vec<Schedule>> {
        self.schedules(Audience::Teacher(reg_code), range).await
    }

    /// Start-time ordered schedule, optionally restricted to the calendar dates of `range` (inclusive).
    #[instrument(skip(self))]
    pub async fn schedules(
        &self,
        audience: Audience<'_>,
        range: Option<DateRange>,
    ) -> QueryResult<Vec<Schedule>> {
        let key = audience.key();
        let snapshot = match self.cache.get_schedule(key) {
            Some(snapshot) => {
                debug!(key = %key, "Schedule cache hit");
                snapshot
            }
            None => {
                debug!(key = %key, "Schedule cache miss");
                let fresh = match audience {
                    Audience::Group(group) => self.store.schedules_for_group(group).await,
                    Audience::Teacher(code) => self.store.schedules_for_teacher(code).await,
                }
                .map_err(store_error)?;
                self.cache.put_schedule(key, fresh)
            }
        };

        Ok(match range {
            Some(range) => snapshot
                .iter()
                .filter(|s| range.contains(s.date()))
                .cloned()
                .collect(),
            None => snapshot.as_ref().clone(),
        })
    }

    pub async fn materials_for_group(&self, group: &str) -> QueryResult<Vec<Material>> {
        self.store.materials_for_group(group).await.map_err(store_error)
    }

    pub async fn materials_for_teacher(&self, reg_code: &str) -> QueryResult<Vec<Material>> {
        self.store
            .materials_for_teacher(reg_code)
            .await
            .map_err(store_error)
    }

    pub async fn materials(&self, audience: Audience<'_>) -> QueryResult<Vec<Material>> {
        match audience {
            Audience::Group(group) => self.materials_for_group(group).await,
            Audience::Teacher(code) => self.materials_for_teacher(code).await,
        }
    }
}
