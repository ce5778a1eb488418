//! University repository: users, reference lists, schedules and materials over SQLite.
//!
//! Uses SqlitePoolManager and the per-entity decoders. Callers go through the [`UniversityStore`] trait.

use async_trait::async_trait;
use campus_core::{Material, Schedule, UserRecord};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, instrument};

use crate::decode::{
    decode_material, decode_schedule, decode_user, MATERIAL_COLUMNS, SCHEDULE_COLUMNS,
    USER_COLUMNS,
};
use crate::error::StorageError;
use crate::repository::UniversityStore;
use crate::schema;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct UniversityRepository {
    pool_manager: SqlitePoolManager,
}

impl UniversityRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");
        let pool = self.pool();
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(pool).await?;
        }
        info!("Database tables created successfully");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        self.pool_manager.pool()
    }

    async fn fetch_user(&self, sql: &str, binds: &[UserBind<'_>]) -> Result<Option<UserRecord>, StorageError> {
        let mut query = sqlx::query(sql);
        for bind in binds {
            query = match bind {
                UserBind::Text(v) => query.bind(*v),
                UserBind::Int(v) => query.bind(*v),
            };
        }
        let row = query.fetch_optional(self.pool()).await?;
        Ok(row.as_ref().map(decode_user).transpose()?)
    }

    async fn fetch_schedules(&self, filter: &str, key: &str) -> Result<Vec<Schedule>, StorageError> {
        let sql = format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules s \
             LEFT JOIN courses c ON c.id = s.course_id \
             LEFT JOIN users t ON t.registration_code = s.teacher_reg_code \
             WHERE {filter} = ? ORDER BY s.schedule_time ASC, s.id ASC"
        );
        let rows = sqlx::query(&sql).bind(key).fetch_all(self.pool()).await?;
        let schedules = decode_all(&rows, decode_schedule)?;
        debug!(key = %key, count = schedules.len(), "Loaded schedules");
        Ok(schedules)
    }

    async fn fetch_materials(&self, filter: &str, key: &str) -> Result<Vec<Material>, StorageError> {
        let sql = format!(
            "SELECT {MATERIAL_COLUMNS} FROM materials m \
             LEFT JOIN courses c ON c.id = m.course_id \
             WHERE {filter} = ? ORDER BY m.id ASC"
        );
        let rows = sqlx::query(&sql).bind(key).fetch_all(self.pool()).await?;
        let materials = decode_all(&rows, decode_material)?;
        debug!(key = %key, count = materials.len(), "Loaded materials");
        Ok(materials)
    }
}

enum UserBind<'a> {
    Text(&'a str),
    Int(i64),
}

fn decode_all<T, E>(rows: &[SqliteRow], decode: fn(&SqliteRow) -> Result<T, E>) -> Result<Vec<T>, StorageError>
where
    StorageError: From<E>,
{
    rows.iter()
        .map(|row| decode(row).map_err(StorageError::from))
        .collect()
}

#[async_trait]
impl UniversityStore for UniversityRepository {
    #[instrument(skip(self, code))]
    async fn find_unclaimed_user(
        &self,
        faculty: &str,
        group: &str,
        code: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE faculty = ? AND group_name = ? AND registration_code = ? AND telegram_id = 0"
        );
        self.fetch_user(
            &sql,
            &[
                UserBind::Text(faculty),
                UserBind::Text(group),
                UserBind::Text(code),
            ],
        )
        .await
    }

    #[instrument(skip(self, code))]
    async fn find_claimed_user_by_code(
        &self,
        code: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE registration_code = ? AND telegram_id != 0"
        );
        self.fetch_user(&sql, &[UserBind::Text(code)]).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<UserRecord>, StorageError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        self.fetch_user(&sql, &[UserBind::Int(id)]).await
    }

    async fn find_user_by_chat(&self, chat_id: i64) -> Result<Option<UserRecord>, StorageError> {
        if chat_id == 0 {
            return Ok(None);
        }
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE telegram_id = ? ORDER BY id LIMIT 1");
        self.fetch_user(&sql, &[UserBind::Int(chat_id)]).await
    }

    #[instrument(skip(self, password))]
    async fn claim_user(
        &self,
        id: i64,
        chat_id: i64,
        password: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE users SET telegram_id = ?, password = ? WHERE id = ? AND telegram_id = 0",
        )
        .bind(chat_id)
        .bind(password)
        .bind(id)
        .execute(self.pool())
        .await?;
        let claimed = result.rows_affected() == 1;
        info!(user_id = id, chat_id = chat_id, claimed = claimed, "Claim user");
        Ok(claimed)
    }

    #[instrument(skip(self))]
    async fn bind_chat(&self, id: i64, chat_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE users SET telegram_id = ? WHERE id = ?")
            .bind(chat_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_faculties(&self) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query("SELECT DISTINCT faculty FROM faculty_groups ORDER BY faculty")
            .fetch_all(self.pool())
            .await?;
        Ok(rows
            .iter()
            .map(|row| row.try_get::<String, _>(0))
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn list_groups(&self, faculty: &str) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query(
            "SELECT group_name FROM faculty_groups WHERE faculty = ? ORDER BY group_name",
        )
        .bind(faculty)
        .fetch_all(self.pool())
        .await?;
        Ok(rows
            .iter()
            .map(|row| row.try_get::<String, _>(0))
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn schedules_for_group(&self, group: &str) -> Result<Vec<Schedule>, StorageError> {
        self.fetch_schedules("s.group_name", group).await
    }

    async fn schedules_for_teacher(&self, reg_code: &str) -> Result<Vec<Schedule>, StorageError> {
        self.fetch_schedules("s.teacher_reg_code", reg_code).await
    }

    async fn materials_for_group(&self, group: &str) -> Result<Vec<Material>, StorageError> {
        self.fetch_materials("m.group_name", group).await
    }

    async fn materials_for_teacher(&self, reg_code: &str) -> Result<Vec<Material>, StorageError> {
        self.fetch_materials("m.teacher_reg_code", reg_code).await
    }
}
