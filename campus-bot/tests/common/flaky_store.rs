//! [`UniversityStore`] wrapper whose every call can be switched to fail with a database error.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use campus_core::{Material, Schedule, UserRecord};
use campus_storage::{StorageError, UniversityRepository, UniversityStore};

pub struct FlakyStore {
    inner: UniversityRepository,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: UniversityRepository) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Calls that reached the store (cache hits do not count).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Database("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UniversityStore for FlakyStore {
    async fn find_unclaimed_user(
        &self,
        faculty: &str,
        group: &str,
        code: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        self.check()?;
        self.inner.find_unclaimed_user(faculty, group, code).await
    }

    async fn find_claimed_user_by_code(
        &self,
        code: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        self.check()?;
        self.inner.find_claimed_user_by_code(code).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<UserRecord>, StorageError> {
        self.check()?;
        self.inner.find_user_by_id(id).await
    }

    async fn find_user_by_chat(&self, chat_id: i64) -> Result<Option<UserRecord>, StorageError> {
        self.check()?;
        self.inner.find_user_by_chat(chat_id).await
    }

    async fn claim_user(
        &self,
        id: i64,
        chat_id: i64,
        password: &str,
    ) -> Result<bool, StorageError> {
        self.check()?;
        self.inner.claim_user(id, chat_id, password).await
    }

    async fn bind_chat(&self, id: i64, chat_id: i64) -> Result<bool, StorageError> {
        self.check()?;
        self.inner.bind_chat(id, chat_id).await
    }

    async fn list_faculties(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        self.inner.list_faculties().await
    }

    async fn list_groups(&self, faculty: &str) -> Result<Vec<String>, StorageError> {
        self.check()?;
        self.inner.list_groups(faculty).await
    }

    async fn schedules_for_group(&self, group: &str) -> Result<Vec<Schedule>, StorageError> {
        self.check()?;
        self.inner.schedules_for_group(group).await
    }

    async fn schedules_for_teacher(&self, reg_code: &str) -> Result<Vec<Schedule>, StorageError> {
        self.check()?;
        self.inner.schedules_for_teacher(reg_code).await
    }

    async fn materials_for_group(&self, group: &str) -> Result<Vec<Material>, StorageError> {
        self.check()?;
        self.inner.materials_for_group(group).await
    }

    async fn materials_for_teacher(&self, reg_code: &str) -> Result<Vec<Material>, StorageError> {
        self.check()?;
        self.inner.materials_for_teacher(reg_code).await
    }
}
