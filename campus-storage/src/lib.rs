//! Storage crate: the university relational store and its repository abstraction.
//!
//! ## Modules
//!
//! - [`error`] – StorageError and typed row DecodeError
//! - [`decode`] – one structured decoder per entity (users, schedules, materials)
//! - [`repository`] – UniversityStore trait consumed by the bot's query service
//! - [`university_repo`] – UniversityRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`seed`] – demo dataset loader

mod decode;
mod error;
mod repository;
mod schema;
mod seed;
mod sqlite_pool;
mod university_repo;

pub use decode::{
    check_duration, decode_material, decode_schedule, decode_user, parse_schedule_time,
    MAX_DURATION_MINUTES,
};
pub use error::{DecodeError, StorageError};
pub use repository::UniversityStore;
pub use seed::{NewMaterial, NewSchedule, NewUser, SeedData};
pub use sqlite_pool::SqlitePoolManager;
pub use university_repo::UniversityRepository;
