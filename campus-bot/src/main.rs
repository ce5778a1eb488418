//! campus-bot binary: `run` starts the bot, `seed` loads the demo dataset.

use anyhow::Result;
use campus_bot::config::database_url_from_env;
use campus_bot::{load_config, run_bot, run_seed, Cli, Commands};
use campus_core::init_console_tracing;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Seed { database_url } => {
            init_console_tracing()?;

            let database_url = database_url.unwrap_or_else(database_url_from_env);
            run_seed(&database_url).await?;
            println!("Demo data loaded into {}", database_url);
            Ok(())
        }
    }
}
