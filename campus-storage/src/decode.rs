//! Structured row decoders, one per entity.
//!
//! Each decoder checks the column count of the SELECT it belongs to and decodes every column by
//! position, so a schema drift surfaces as a typed [`DecodeError`] instead of a silent default.

use campus_core::{LessonType, Material, Role, Schedule, UserRecord};
use chrono::{DateTime, NaiveDateTime};
use sqlx::sqlite::SqliteRow;
use sqlx::{Decode, Row, Sqlite, Type};

use crate::error::DecodeError;

/// Column list decoded by [`decode_user`].
pub(crate) const USER_COLUMNS: &str =
    "id, telegram_id, role, name, faculty, group_name, password, registration_code";

/// Column list decoded by [`decode_schedule`]; expects `s` = schedules, `c` = courses, `t` = teacher users.
pub(crate) const SCHEDULE_COLUMNS: &str = "s.id, s.course_id, COALESCE(c.name, ''), s.group_name, \
     s.teacher_reg_code, t.name, s.schedule_time, s.description, s.auditory, s.lesson_type, s.duration";

/// Column list decoded by [`decode_material`]; expects `m` = materials, `c` = courses.
pub(crate) const MATERIAL_COLUMNS: &str = "m.id, m.course_id, COALESCE(c.name, ''), m.group_name, \
     m.teacher_reg_code, m.title, m.file_url, m.description";

const SCHEDULE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Longest lesson accepted from the store, in minutes (one day).
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Lesson length in minutes; negative or longer than a day is a malformed row.
pub fn check_duration(minutes: i64) -> Result<i64, DecodeError> {
    if (0..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(DecodeError::Duration(minutes))
    }
}

fn expect_columns(row: &SqliteRow, entity: &'static str, expected: usize) -> Result<(), DecodeError> {
    let actual = row.len();
    if actual != expected {
        return Err(DecodeError::ColumnCount {
            entity,
            expected,
            actual,
        });
    }
    Ok(())
}

fn column<'r, T>(
    row: &'r SqliteRow,
    entity: &'static str,
    index: usize,
    column: &'static str,
) -> Result<T, DecodeError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get::<T, _>(index).map_err(|e| DecodeError::Column {
        entity,
        column,
        message: e.to_string(),
    })
}

/// Parses an ISO-8601 `schedule_time`. Offsets are dropped: times are wall-clock local to the campus.
pub fn parse_schedule_time(raw: &str) -> Result<NaiveDateTime, DecodeError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    SCHEDULE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| DecodeError::Timestamp(raw.to_string()))
}

pub fn decode_user(row: &SqliteRow) -> Result<UserRecord, DecodeError> {
    const ENTITY: &str = "users";
    expect_columns(row, ENTITY, 8)?;
    let role_raw: String = column(row, ENTITY, 2, "role")?;
    let role = role_raw
        .parse::<Role>()
        .map_err(|_| DecodeError::Role(role_raw.clone()))?;
    Ok(UserRecord {
        id: column(row, ENTITY, 0, "id")?,
        telegram_id: column(row, ENTITY, 1, "telegram_id")?,
        role,
        name: column(row, ENTITY, 3, "name")?,
        faculty: column(row, ENTITY, 4, "faculty")?,
        group_name: column(row, ENTITY, 5, "group_name")?,
        password: column(row, ENTITY, 6, "password")?,
        registration_code: column(row, ENTITY, 7, "registration_code")?,
    })
}

pub fn decode_schedule(row: &SqliteRow) -> Result<Schedule, DecodeError> {
    const ENTITY: &str = "schedules";
    expect_columns(row, ENTITY, 11)?;
    let time_raw: String = column(row, ENTITY, 6, "schedule_time")?;
    let lesson_raw: String = column(row, ENTITY, 9, "lesson_type")?;
    let lesson_type = lesson_raw
        .parse::<LessonType>()
        .map_err(|_| DecodeError::LessonType(lesson_raw.clone()))?;
    Ok(Schedule {
        id: column(row, ENTITY, 0, "id")?,
        course_id: column(row, ENTITY, 1, "course_id")?,
        course_name: column(row, ENTITY, 2, "course_name")?,
        group_name: column(row, ENTITY, 3, "group_name")?,
        teacher_reg_code: column(row, ENTITY, 4, "teacher_reg_code")?,
        teacher_name: column(row, ENTITY, 5, "teacher_name")?,
        start: parse_schedule_time(&time_raw)?,
        description: column(row, ENTITY, 7, "description")?,
        room: column(row, ENTITY, 8, "auditory")?,
        lesson_type,
        duration_minutes: check_duration(column(row, ENTITY, 10, "duration")?)?,
    })
}

pub fn decode_material(row: &SqliteRow) -> Result<Material, DecodeError> {
    const ENTITY: &str = "materials";
    expect_columns(row, ENTITY, 8)?;
    Ok(Material {
        id: column(row, ENTITY, 0, "id")?,
        course_id: column(row, ENTITY, 1, "course_id")?,
        course_name: column(row, ENTITY, 2, "course_name")?,
        group_name: column(row, ENTITY, 3, "group_name")?,
        teacher_reg_code: column(row, ENTITY, 4, "teacher_reg_code")?,
        title: column(row, ENTITY, 5, "title")?,
        file_url: column(row, ENTITY, 6, "file_url")?,
        description: column(row, ENTITY, 7, "description")?,
    })
}
