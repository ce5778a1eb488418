//! Config tests.

use crate::config::BotConfig;
use serial_test::serial;
use std::env;

fn clear_env() {
    for var in [
        "BOT_TOKEN",
        "DATABASE_URL",
        "LOG_FILE",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "SCHEDULE_CACHE_TTL_SECS",
        "MATERIALS_PAGE_SIZE",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.database_url(), "sqlite://campus.db");
    assert_eq!(config.log_file(), "logs/campus-bot.log");
    assert_eq!(config.schedule_cache_ttl().as_secs(), 300);
    assert_eq!(config.materials_page_size(), 5);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");
    env::set_var("SCHEDULE_CACHE_TTL_SECS", "60");
    env::set_var("MATERIALS_PAGE_SIZE", "3");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "custom_token");
    assert_eq!(config.database_url(), "sqlite::memory:");
    assert_eq!(config.telegram_api_url(), Some("http://127.0.0.1:8081"));
    assert_eq!(config.schedule_cache_ttl().as_secs(), 60);
    assert_eq!(config.materials_page_size(), 3);
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "override_token");
}

#[test]
#[serial]
fn test_missing_token_is_error() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::remove_var("TELEGRAM_API_URL");
}

#[test]
#[serial]
fn test_zero_page_size_rejected() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("MATERIALS_PAGE_SIZE", "0");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::remove_var("MATERIALS_PAGE_SIZE");
}

#[test]
#[serial]
fn test_non_numeric_ttl_rejected_at_load() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("SCHEDULE_CACHE_TTL_SECS", "five minutes");

    assert!(BotConfig::load(None).is_err());

    env::remove_var("SCHEDULE_CACHE_TTL_SECS");
}
