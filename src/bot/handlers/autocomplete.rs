//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests bet amounts for `/roll` based on the caller's balance.

use crate::{bot::Context, core::wager::ALL_IN};
use tracing::warn;

/// Discord shows at most 25 autocomplete choices
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for the `/roll` amount.
///
/// Offers `all` plus a quarter, half, and all of the caller's balance. Looking
/// up the balance never creates an account.
pub async fn autocomplete_bet_amount(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let user_id = ctx.author().id.to_string();

    let balance = match ctx.data().ledger.find(&user_id).await {
        Ok(account) => account.map_or(0, |a| a.balance),
        Err(e) => {
            warn!("Failed to look up balance for autocomplete: {}", e);
            0
        }
    };

    bet_suggestions(balance, partial)
}

/// Builds the suggestion list for a balance, keeping entries that start with
/// what the user typed so far.
#[must_use]
pub fn bet_suggestions(balance: i64, partial: &str) -> Vec<String> {
    let mut suggestions = vec![ALL_IN.to_string()];

    if balance > 0 {
        let mut amounts = vec![balance / 4, balance / 2, balance];
        amounts.retain(|amount| *amount > 0);
        amounts.dedup();
        suggestions.extend(amounts.into_iter().map(|amount| amount.to_string()));
    }

    let partial_lower = partial.trim().to_lowercase();
    suggestions
        .into_iter()
        .filter(|s| s.starts_with(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}
