//! University domain models shared by storage, cache, formatting and dialog.
//!
//! Maps to the `users`, `schedules` and `materials` tables; decoding from rows lives in campus-storage.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role stored in `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of `users`. `telegram_id == 0` means the record is unclaimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub telegram_id: i64,
    pub role: Role,
    pub name: String,
    pub faculty: String,
    pub group_name: String,
    pub password: String,
    pub registration_code: String,
}

impl UserRecord {
    pub fn is_claimed(&self) -> bool {
        self.telegram_id != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonType {
    Lecture,
    Practical,
    Lab,
    Seminar,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Lecture => "Lecture",
            LessonType::Practical => "Practical",
            LessonType::Lab => "Lab",
            LessonType::Seminar => "Seminar",
        }
    }

    /// Label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            LessonType::Lecture => "Лекция",
            LessonType::Practical => "Практика",
            LessonType::Lab => "Лабораторная",
            LessonType::Seminar => "Семинар",
        }
    }
}

impl FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecture" => Ok(LessonType::Lecture),
            "practical" | "practice" => Ok(LessonType::Practical),
            "lab" | "laboratory" => Ok(LessonType::Lab),
            "seminar" => Ok(LessonType::Seminar),
            other => Err(format!("unknown lesson type: {}", other)),
        }
    }
}

/// One class occurrence. Course and teacher names are joined in by the store for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub group_name: String,
    pub teacher_reg_code: String,
    pub teacher_name: Option<String>,
    pub start: NaiveDateTime,
    pub description: String,
    pub room: String,
    pub lesson_type: LessonType,
    pub duration_minutes: i64,
}

impl Schedule {
    /// Start plus duration; a duration that does not fit the calendar yields the start.
    pub fn end(&self) -> NaiveDateTime {
        Duration::try_minutes(self.duration_minutes)
            .and_then(|d| self.start.checked_add_signed(d))
            .unwrap_or(self.start)
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Teacher display name, falling back to the registration code.
    pub fn teacher_label(&self) -> &str {
        self.teacher_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.teacher_reg_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub group_name: String,
    pub teacher_reg_code: String,
    pub title: String,
    pub file_url: String,
    pub description: String,
}

/// Inclusive calendar-date range; a schedule matches when its start date falls within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range; reversed bounds are swapped.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_at(start: &str, minutes: i64) -> Schedule {
        Schedule {
            id: 1,
            course_id: 1,
            course_name: "Алгоритмы".to_string(),
            group_name: "AA-25-07".to_string(),
            teacher_reg_code: "TC-123".to_string(),
            teacher_name: None,
            start: NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S").unwrap(),
            description: String::new(),
            room: "101".to_string(),
            lesson_type: LessonType::Lecture,
            duration_minutes: minutes,
        }
    }

    #[test]
    fn test_schedule_end_and_teacher_fallback() {
        let s = schedule_at("2025-01-13T23:30:00", 90);
        assert_eq!(s.end().to_string(), "2025-01-14 01:00:00");
        assert_eq!(s.teacher_label(), "TC-123");
    }

    #[test]
    fn test_schedule_end_with_oversized_duration_is_start() {
        let s = schedule_at("2025-01-13T09:00:00", i64::MAX / 2);
        assert_eq!(s.end(), s.start);
    }

    #[test]
    fn test_date_range_is_inclusive_and_ordered() {
        let a = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();
        let range = DateRange::new(b, a);
        assert_eq!(range.start, a);
        assert!(range.contains(a));
        assert!(range.contains(b));
        assert!(!range.contains(b.succ_opt().unwrap()));
    }

    #[test]
    fn test_role_and_lesson_type_parse() {
        assert_eq!("Teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert!("dean".parse::<Role>().is_err());
        assert_eq!("Practical".parse::<LessonType>().unwrap(), LessonType::Practical);
        assert!("Exam".parse::<LessonType>().is_err());
    }

    #[test]
    fn test_user_claimed_by_chat() {
        let mut user = UserRecord {
            id: 1,
            telegram_id: 0,
            role: Role::Student,
            name: "Иван Иванов".to_string(),
            faculty: "Факультет Информатики".to_string(),
            group_name: "AA-25-07".to_string(),
            password: String::new(),
            registration_code: "ST-456".to_string(),
        };
        assert!(!user.is_claimed());
        user.telegram_id = 100;
        assert!(user.is_claimed());
    }
}
