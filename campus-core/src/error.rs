use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Dialog error: {0}")]
    Dialog(#[from] DialogError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Outcome taxonomy of a dialog step. Only the dialog controller turns these into user-visible text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// No matching row; the user can correct the input and retry.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store connectivity or driver failure; the flow state is left as it was.
    #[error("Store error: {0}")]
    Store(String),

    /// Malformed user input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal inconsistency; the flow is aborted.
    #[error("State error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
