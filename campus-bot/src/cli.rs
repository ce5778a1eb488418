//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "campus-bot")]
#[command(about = "University schedule Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Create the schema and load the demo dataset (DATABASE_URL unless overridden).
    Seed {
        #[arg(short, long)]
        database_url: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["campus-bot", "run", "--token", "abc"]).unwrap();
        match cli.command {
            Commands::Run { token } => assert_eq!(token.as_deref(), Some("abc")),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_seed_with_database_url() {
        let cli =
            Cli::try_parse_from(["campus-bot", "seed", "--database-url", "sqlite::memory:"]).unwrap();
        match cli.command {
            Commands::Seed { database_url } => {
                assert_eq!(database_url.as_deref(), Some("sqlite::memory:"))
            }
            _ => panic!("expected seed"),
        }
    }
}
