//! # Campus bot
//!
//! University schedule bot: registration and login dialogs, schedule views and course materials.
//! Wires campus-storage, schedule-cache, schedule-format and handler-chain behind a Telegram
//! dispatcher. Loads config from env.
//!
//! - [`session`] – per-chat registration/login state
//! - [`query`] – cache-first access to the university store
//! - [`dialog`] – the state machine that answers every event
//! - [`telegram`] – teloxide adapters, Bot implementation and dispatcher

pub mod cli;
pub mod components;
pub mod config;
pub mod dialog;
pub mod logging;
pub mod query;
pub mod runner;
pub mod session;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BotConfig, DialogSettings};
pub use dialog::DialogController;
pub use logging::LoggingHandler;
pub use query::{Audience, QueryService};
pub use runner::{run_bot, run_seed};
pub use session::{Flow, FlowState, Scratch, Session, SessionStore};
