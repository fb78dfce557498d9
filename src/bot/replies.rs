//! Reply text for economy commands.
//!
//! Kept apart from the command handlers so the wording can be tested without
//! a Discord context.

use crate::{
    config::economy::EconomyConfig,
    core::{ledger::RollReceipt, wager::RollResult},
    entities::AccountModel,
    errors::Error,
};
use chrono::{DateTime, TimeDelta, Utc};

/// Formats an amount with the currency symbol, e.g. `100 🌿`.
#[must_use]
pub fn format_amount(amount: i64, economy: &EconomyConfig) -> String {
    format!("{amount} {}", economy.currency_symbol)
}

/// Formats a wait as hours and minutes, rounding up to the next minute.
#[must_use]
pub fn format_wait(remaining: TimeDelta) -> String {
    let seconds = remaining.num_seconds().max(0);
    let minutes = (seconds + 59) / 60;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Reply for a successful `/daily`.
#[must_use]
pub fn daily_claimed(account: &AccountModel, economy: &EconomyConfig) -> String {
    format!(
        "🌿 Got Tegridy! Here's your daily {} {}!\nCurrent balance: {}",
        format_amount(economy.daily_reward, economy),
        economy.currency_name,
        format_amount(account.balance, economy)
    )
}

/// Reply for `/balance`.
#[must_use]
pub fn balance(account: &AccountModel, economy: &EconomyConfig) -> String {
    format!(
        "Your balance: {} {}\nEarned from dailies so far: {}",
        format_amount(account.balance, economy),
        economy.currency_name,
        format_amount(account.total_earned, economy)
    )
}

/// Reply for a settled `/roll`.
#[must_use]
pub fn roll_result(receipt: &RollReceipt, economy: &EconomyConfig) -> String {
    let outcome = &receipt.outcome;
    let verdict = match outcome.result {
        RollResult::Win => format!("You won {}!", format_amount(receipt.bet, economy)),
        RollResult::Loss => format!("You lost {}!", format_amount(receipt.bet, economy)),
        RollResult::Push => "It's a tie! Your bet has been returned.".to_string(),
    };

    format!(
        "🎲 You rolled: {}\n🤖 Bot rolled: {}\n\n{verdict}\nNew balance: {}",
        outcome.user_roll,
        outcome.bot_roll,
        format_amount(receipt.account.balance, economy)
    )
}

/// Reply for a validation error, or None if the error is not meant for users.
#[must_use]
pub fn rejection(error: &Error, economy: &EconomyConfig, now: DateTime<Utc>) -> Option<String> {
    let message = match error {
        Error::InvalidBet { reason, .. } => format!("❌ Invalid bet: {reason}."),
        Error::InsufficientFunds { current, .. } => format!(
            "❌ You don't have enough {}! Your balance is {}.",
            economy.currency_name,
            format_amount(*current, economy)
        ),
        Error::CooldownActive { available_at } => format!(
            "Hey hey hey, you need to wait {} before getting more Tegridy!",
            format_wait(*available_at - now)
        ),
        _ => return None,
    };
    Some(message)
}
