//! Table definitions for the university store. Applied idempotently on repository startup.

pub(crate) const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        telegram_id INTEGER NOT NULL DEFAULT 0,
        role TEXT NOT NULL,
        name TEXT NOT NULL,
        faculty TEXT NOT NULL DEFAULT '',
        group_name TEXT NOT NULL DEFAULT '',
        password TEXT NOT NULL DEFAULT '',
        registration_code TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS faculty_groups (
        faculty TEXT NOT NULL,
        group_name TEXT NOT NULL,
        PRIMARY KEY (faculty, group_name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teacher_course_groups (
        teacher_reg_code TEXT NOT NULL,
        course_id INTEGER NOT NULL REFERENCES courses(id),
        group_name TEXT NOT NULL,
        PRIMARY KEY (teacher_reg_code, course_id, group_name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS schedules (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_id INTEGER NOT NULL REFERENCES courses(id),
        group_name TEXT NOT NULL,
        teacher_reg_code TEXT NOT NULL,
        schedule_time TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        auditory TEXT NOT NULL DEFAULT '',
        lesson_type TEXT NOT NULL,
        duration INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS materials (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_id INTEGER NOT NULL REFERENCES courses(id),
        group_name TEXT NOT NULL,
        teacher_reg_code TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        file_url TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_users_telegram_id ON users(telegram_id)",
    "CREATE INDEX IF NOT EXISTS idx_schedules_group_name ON schedules(group_name)",
    "CREATE INDEX IF NOT EXISTS idx_schedules_teacher ON schedules(teacher_reg_code)",
    "CREATE INDEX IF NOT EXISTS idx_materials_group_name ON materials(group_name)",
    "CREATE INDEX IF NOT EXISTS idx_materials_teacher ON materials(teacher_reg_code)",
];
