//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases, ledgers, and deterministic
//! dice so tests can force specific roll outcomes.

#![allow(clippy::expect_used)]

use crate::{
    config::economy::EconomyConfig,
    core::{
        ledger::Ledger,
        wager::{DiceRange, DiceSource},
    },
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectOptions, DatabaseConnection};
use std::collections::VecDeque;

/// Creates an in-memory `SQLite` database with all tables initialized.
///
/// The pool is capped at one connection because every in-memory connection
/// is its own database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a ledger backed by a fresh in-memory database.
pub async fn setup_test_ledger() -> Result<Ledger> {
    Ok(Ledger::new(setup_test_db().await?))
}

/// Economy settings used by tests: reward 100, 24h cooldown, six-sided dice.
#[must_use]
pub fn test_economy_config() -> EconomyConfig {
    EconomyConfig {
        daily_reward: 100,
        ..EconomyConfig::default()
    }
}

/// A fixed point in time so cooldown tests don't depend on the clock.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Dice that return a scripted sequence of faces, in order.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
}

impl ScriptedDice {
    /// Creates dice that will produce `faces` one after another.
    #[must_use]
    pub fn new(faces: &[u8]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
        }
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, _range: DiceRange) -> u8 {
        self.faces.pop_front().expect("scripted dice ran out of faces")
    }
}
