//! Dialog tuning: schedule cache TTL and material page size.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DialogSettings {
    /// SCHEDULE_CACHE_TTL_SECS
    pub schedule_cache_ttl_secs: u64,
    /// MATERIALS_PAGE_SIZE
    pub materials_page_size: usize,
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            schedule_cache_ttl_secs: 300,
            materials_page_size: 5,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl DialogSettings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            schedule_cache_ttl_secs: parse_var(
                "SCHEDULE_CACHE_TTL_SECS",
                defaults.schedule_cache_ttl_secs,
            )?,
            materials_page_size: parse_var("MATERIALS_PAGE_SIZE", defaults.materials_page_size)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.schedule_cache_ttl_secs == 0 {
            anyhow::bail!("SCHEDULE_CACHE_TTL_SECS must be greater than 0");
        }
        if self.materials_page_size == 0 {
            anyhow::bail!("MATERIALS_PAGE_SIZE must be greater than 0");
        }
        Ok(())
    }

    pub fn schedule_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.schedule_cache_ttl_secs)
    }
}
