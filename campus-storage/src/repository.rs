use async_trait::async_trait;
use campus_core::{Material, Schedule, UserRecord};

use crate::error::StorageError;

/// Relational store as seen by the bot. `Ok(None)` / empty vectors mean "no rows";
/// `Err` is reserved for connectivity, driver and decoding failures.
#[async_trait]
pub trait UniversityStore: Send + Sync {
    /// Unclaimed (`telegram_id = 0`) user matching faculty, group and registration code exactly.
    async fn find_unclaimed_user(
        &self,
        faculty: &str,
        group: &str,
        code: &str,
    ) -> Result<Option<UserRecord>, StorageError>;

    /// Already-claimed user owning the registration code.
    async fn find_claimed_user_by_code(&self, code: &str)
        -> Result<Option<UserRecord>, StorageError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<UserRecord>, StorageError>;

    /// User linked to the chat identity.
    async fn find_user_by_chat(&self, chat_id: i64) -> Result<Option<UserRecord>, StorageError>;

    /// Sets chat identity and password only if the record is still unclaimed. Returns false otherwise.
    async fn claim_user(&self, id: i64, chat_id: i64, password: &str)
        -> Result<bool, StorageError>;

    /// Re-links an account to a chat identity. Returns false when the user does not exist.
    async fn bind_chat(&self, id: i64, chat_id: i64) -> Result<bool, StorageError>;

    async fn list_faculties(&self) -> Result<Vec<String>, StorageError>;

    async fn list_groups(&self, faculty: &str) -> Result<Vec<String>, StorageError>;

    /// Ordered by start time ascending.
    async fn schedules_for_group(&self, group: &str) -> Result<Vec<Schedule>, StorageError>;

    /// Ordered by start time ascending.
    async fn schedules_for_teacher(&self, reg_code: &str) -> Result<Vec<Schedule>, StorageError>;

    async fn materials_for_group(&self, group: &str) -> Result<Vec<Material>, StorageError>;

    async fn materials_for_teacher(&self, reg_code: &str) -> Result<Vec<Material>, StorageError>;
}
