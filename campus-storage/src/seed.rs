//! Seed data: reference lists, unclaimed users, courses, schedules and materials.
//!
//! Loaded by `campus-bot seed` and by tests. Inserts are idempotent (`INSERT OR IGNORE`) so a
//! dataset can be applied to an existing database without duplicating rows that have explicit keys.

use campus_core::{LessonType, Role};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StorageError;
use crate::university_repo::UniversityRepository;

/// Unclaimed user (`telegram_id = 0`, empty password).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub role: Role,
    pub name: String,
    pub faculty: String,
    pub group_name: String,
    pub registration_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSchedule {
    pub course_id: i64,
    pub group_name: String,
    pub teacher_reg_code: String,
    /// ISO-8601 local time, e.g. `2025-09-01T09:00:00`.
    pub schedule_time: String,
    pub description: String,
    pub room: String,
    pub lesson_type: LessonType,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaterial {
    pub course_id: i64,
    pub group_name: String,
    pub teacher_reg_code: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    pub faculty_groups: Vec<(String, String)>,
    pub courses: Vec<(i64, String)>,
    pub users: Vec<NewUser>,
    /// (teacher_reg_code, course_id, group_name)
    pub teacher_course_groups: Vec<(String, i64, String)>,
    pub schedules: Vec<NewSchedule>,
    pub materials: Vec<NewMaterial>,
}

const FACULTY: &str = "Факультет Информатики";

fn student(name: &str, group: &str, code: &str) -> NewUser {
    NewUser {
        role: Role::Student,
        name: name.to_string(),
        faculty: FACULTY.to_string(),
        group_name: group.to_string(),
        registration_code: code.to_string(),
    }
}

fn lesson(
    course_id: i64,
    group: &str,
    time: &str,
    room: &str,
    lesson_type: LessonType,
    duration_minutes: i64,
) -> NewSchedule {
    NewSchedule {
        course_id,
        group_name: group.to_string(),
        teacher_reg_code: "TC-123".to_string(),
        schedule_time: time.to_string(),
        description: String::new(),
        room: room.to_string(),
        lesson_type,
        duration_minutes,
    }
}

impl SeedData {
    /// Small demo dataset: one faculty, two groups, two students, one teacher, the first week of September 2025.
    pub fn demo() -> Self {
        Self {
            faculty_groups: vec![
                (FACULTY.to_string(), "AA-25-07".to_string()),
                (FACULTY.to_string(), "AA-25-08".to_string()),
            ],
            courses: vec![(1, "Алгоритмы".to_string()), (2, "Базы данных".to_string())],
            users: vec![
                student("Иван Иванов", "AA-25-07", "ST-456"),
                student("Пётр Петров", "AA-25-08", "ST-789"),
                NewUser {
                    role: Role::Teacher,
                    name: "Анна Смирнова".to_string(),
                    faculty: FACULTY.to_string(),
                    // Curated group; registration matches on it like for students.
                    group_name: "AA-25-07".to_string(),
                    registration_code: "TC-123".to_string(),
                },
            ],
            teacher_course_groups: vec![
                ("TC-123".to_string(), 1, "AA-25-07".to_string()),
                ("TC-123".to_string(), 2, "AA-25-07".to_string()),
                ("TC-123".to_string(), 1, "AA-25-08".to_string()),
            ],
            schedules: vec![
                lesson(1, "AA-25-07", "2025-09-01T09:00:00", "101", LessonType::Lecture, 90),
                lesson(2, "AA-25-07", "2025-09-01T10:45:00", "202", LessonType::Practical, 90),
                lesson(1, "AA-25-08", "2025-09-02T09:00:00", "101", LessonType::Lecture, 90),
                lesson(1, "AA-25-07", "2025-09-03T13:00:00", "Lab-3", LessonType::Lab, 120),
                lesson(2, "AA-25-07", "2025-09-05T09:00:00", "305", LessonType::Seminar, 90),
            ],
            materials: vec![
                NewMaterial {
                    course_id: 1,
                    group_name: "AA-25-07".to_string(),
                    teacher_reg_code: "TC-123".to_string(),
                    title: "Лекция 1: сложность".to_string(),
                    description: "Асимптотика и O-нотация".to_string(),
                    file_url: "https://files.example.edu/algo/lecture1.pdf".to_string(),
                },
                NewMaterial {
                    course_id: 1,
                    group_name: "AA-25-07".to_string(),
                    teacher_reg_code: "TC-123".to_string(),
                    title: "Лекция 2: сортировки".to_string(),
                    description: String::new(),
                    file_url: "https://files.example.edu/algo/lecture2.pdf".to_string(),
                },
                NewMaterial {
                    course_id: 2,
                    group_name: "AA-25-07".to_string(),
                    teacher_reg_code: "TC-123".to_string(),
                    title: "SQL практикум".to_string(),
                    description: "Задания к практике".to_string(),
                    file_url: "https://files.example.edu/db/practice.pdf".to_string(),
                },
            ],
        }
    }
}

impl UniversityRepository {
    /// Applies a dataset inside one transaction.
    pub async fn seed(&self, data: &SeedData) -> Result<(), StorageError> {
        let mut tx = self.pool().begin().await?;

        for (faculty, group) in &data.faculty_groups {
            sqlx::query("INSERT OR IGNORE INTO faculty_groups (faculty, group_name) VALUES (?, ?)")
                .bind(faculty)
                .bind(group)
                .execute(&mut *tx)
                .await?;
        }

        for (id, name) in &data.courses {
            sqlx::query("INSERT OR IGNORE INTO courses (id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        for user in &data.users {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO users (telegram_id, role, name, faculty, group_name, password, registration_code)
                VALUES (0, ?, ?, ?, ?, '', ?)
                "#,
            )
            .bind(user.role.as_str())
            .bind(&user.name)
            .bind(&user.faculty)
            .bind(&user.group_name)
            .bind(&user.registration_code)
            .execute(&mut *tx)
            .await?;
        }

        for (code, course_id, group) in &data.teacher_course_groups {
            sqlx::query(
                "INSERT OR IGNORE INTO teacher_course_groups (teacher_reg_code, course_id, group_name) VALUES (?, ?, ?)",
            )
            .bind(code)
            .bind(course_id)
            .bind(group)
            .execute(&mut *tx)
            .await?;
        }

        for s in &data.schedules {
            sqlx::query(
                r#"
                INSERT INTO schedules (course_id, group_name, teacher_reg_code, schedule_time, description, auditory, lesson_type, duration)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(s.course_id)
            .bind(&s.group_name)
            .bind(&s.teacher_reg_code)
            .bind(&s.schedule_time)
            .bind(&s.description)
            .bind(&s.room)
            .bind(s.lesson_type.as_str())
            .bind(s.duration_minutes)
            .execute(&mut *tx)
            .await?;
        }

        for m in &data.materials {
            sqlx::query(
                r#"
                INSERT INTO materials (course_id, group_name, teacher_reg_code, title, description, file_url)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(m.course_id)
            .bind(&m.group_name)
            .bind(&m.teacher_reg_code)
            .bind(&m.title)
            .bind(&m.description)
            .bind(&m.file_url)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            users = data.users.len(),
            schedules = data.schedules.len(),
            materials = data.materials.len(),
            "Seed data applied"
        );
        Ok(())
    }
}
