//! # Schedule cache
//!
//! In-memory read cache in front of the university store.
//!
//! - Schedule snapshots keyed by group name or teacher registration code. A snapshot older than
//!   the TTL (default 5 minutes) reads as absent; expiry is checked on read, there is no sweeper.
//! - Reference lists (faculties, groups by faculty) with no expiry; replaced only by an explicit set.
//!
//! ## Thread Safety
//!
//! Keyed entries live in [`DashMap`]s (sharded locks, so unrelated keys do not serialize) and are
//! stored as `Arc` snapshots: a write swaps the whole `Arc`, readers clone it and release the lock
//! immediately, so a reader never observes a partially written entry and never holds a lock
//! across I/O.

use campus_core::Schedule;
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// Schedule snapshot TTL.
pub const DEFAULT_SCHEDULE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cached schedule list plus the instant it was stored.
#[derive(Debug)]
struct ScheduleSnapshot {
    entries: Arc<Vec<Schedule>>,
    updated_at: Instant,
}

#[derive(Debug)]
pub struct CacheLayer {
    ttl: Duration,
    schedules: DashMap<String, Arc<ScheduleSnapshot>>,
    faculties: RwLock<Option<Arc<Vec<String>>>>,
    groups: DashMap<String, Arc<Vec<String>>>,
}

impl CacheLayer {
    /// Cache with the default 5 minute schedule TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SCHEDULE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            schedules: DashMap::new(),
            faculties: RwLock::new(None),
            groups: DashMap::new(),
        }
    }

    /// Fresh snapshot for `key`, or `None` when absent or stale. A miss has no side effect.
    pub fn get_schedule(&self, key: &str) -> Option<Arc<Vec<Schedule>>> {
        self.get_schedule_at(key, Instant::now())
    }

    /// [`get_schedule`](Self::get_schedule) evaluated at a given instant.
    pub fn get_schedule_at(&self, key: &str, now: Instant) -> Option<Arc<Vec<Schedule>>> {
        let snapshot = self.schedules.get(key).map(|entry| Arc::clone(entry.value()))?;
        let age = now.saturating_duration_since(snapshot.updated_at);
        if age > self.ttl {
            debug!(key = %key, age_ms = age.as_millis() as u64, "schedule cache stale");
            return None;
        }
        debug!(key = %key, count = snapshot.entries.len(), "schedule cache hit");
        Some(Arc::clone(&snapshot.entries))
    }

    /// Stores `entries` under `key`, stamped with the current instant. Unconditional overwrite.
    pub fn put_schedule(&self, key: &str, entries: Vec<Schedule>) -> Arc<Vec<Schedule>> {
        self.put_schedule_at(key, entries, Instant::now())
    }

    /// [`put_schedule`](Self::put_schedule) stamped with a given instant.
    pub fn put_schedule_at(
        &self,
        key: &str,
        entries: Vec<Schedule>,
        now: Instant,
    ) -> Arc<Vec<Schedule>> {
        let entries = Arc::new(entries);
        let snapshot = Arc::new(ScheduleSnapshot {
            entries: Arc::clone(&entries),
            updated_at: now,
        });
        self.schedules.insert(key.to_string(), snapshot);
        entries
    }

    /// Drops the snapshot for `key`. Returns whether one existed.
    pub fn invalidate_schedule(&self, key: &str) -> bool {
        self.schedules.remove(key).is_some()
    }

    pub fn get_faculties(&self) -> Option<Arc<Vec<String>>> {
        self.faculties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_faculties(&self, faculties: Vec<String>) -> Arc<Vec<String>> {
        let faculties = Arc::new(faculties);
        *self
            .faculties
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&faculties));
        faculties
    }

    pub fn get_groups(&self, faculty: &str) -> Option<Arc<Vec<String>>> {
        self.groups.get(faculty).map(|entry| Arc::clone(entry.value()))
    }

    pub fn set_groups(&self, faculty: &str, groups: Vec<String>) -> Arc<Vec<String>> {
        let groups = Arc::new(groups);
        self.groups.insert(faculty.to_string(), Arc::clone(&groups));
        groups
    }
}

impl Default for CacheLayer {
    fn default() -> Self {
        Self::new()
    }
}
