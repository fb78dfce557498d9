//! Unified error type for the bot.
//!
//! Validation failures of the economy (bad bets, missing funds, daily cooldown)
//! live next to infrastructure errors so every layer can use `?`. Command
//! handlers use [`Error::is_user_facing`] to decide whether an error becomes a
//! friendly reply or is handed to the framework's error hook.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// All errors produced by the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Error returned by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error (config file, database directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The bet amount is malformed, not positive, or "all" of an empty balance
    #[error("Invalid bet '{input}': {reason}")]
    InvalidBet {
        /// Raw amount the user typed
        input: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A bet or withdrawal exceeds the account balance
    #[error("Insufficient funds: balance is {current}, {required} required")]
    InsufficientFunds {
        /// Balance at the time of the request
        current: i64,
        /// Amount that would have been taken
        required: i64,
    },

    /// The daily reward was already claimed within the cooldown window
    #[error("Daily reward already claimed, next claim available at {available_at}")]
    CooldownActive {
        /// Earliest moment the next claim succeeds
        available_at: DateTime<Utc>,
    },

    /// Applying a delta would overflow the balance
    #[error("Balance overflow")]
    BalanceOverflow,

    /// An account row vanished between insert and read
    #[error("Account not found: {user_id}")]
    AccountNotFound {
        /// Discord user ID of the account
        user_id: String,
    },

    /// Error raised by serenity or poise
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Returns true for validation errors that should be shown to the user
    /// as a normal reply rather than logged as failures.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidBet { .. } | Self::InsufficientFunds { .. } | Self::CooldownActive { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
