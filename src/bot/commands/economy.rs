//! Economy Discord commands - `daily`, `balance`, and `roll`.
//!
//! Each command resolves the calling user, calls into the ledger, and replies.
//! Validation errors (bad bet, missing funds, cooldown) become normal replies;
//! anything else is returned to the framework's error handler.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete, replies},
        errors::Result,
    };
    use chrono::Utc;
    use rand::{SeedableRng, rngs::StdRng};

    /// Claim your daily Tegridy reward.
    #[poise::command(slash_command)]
    pub async fn daily(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let economy = &data.economy;
        let user_id = ctx.author().id.to_string();
        let now = Utc::now();

        let reply = match data
            .ledger
            .apply_daily(
                &user_id,
                economy.daily_reward,
                economy.daily_cooldown(),
                now,
            )
            .await
        {
            Ok(account) => replies::daily_claimed(&account, economy),
            Err(e) => replies::rejection(&e, economy, now).ok_or(e)?,
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Check your Tegridy balance.
    #[poise::command(slash_command)]
    pub async fn balance(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();

        let account = data.ledger.get_or_create(&user_id).await?;

        ctx.say(replies::balance(&account, &data.economy)).await?;
        Ok(())
    }

    /// Roll dice and bet your Tegridy Bucks.
    #[poise::command(slash_command)]
    pub async fn roll(
        ctx: Context<'_>,
        #[description = "Amount to bet (use 'all' for all your Tegridy)"]
        #[autocomplete = "autocomplete::autocomplete_bet_amount"]
        amount: String,
    ) -> Result<()> {
        let data = ctx.data();
        let economy = &data.economy;
        let user_id = ctx.author().id.to_string();

        // Fresh entropy per roll, no generator is shared between commands
        let mut rng = StdRng::from_entropy();

        let reply = match data
            .ledger
            .roll(&user_id, &amount, economy.dice_range(), &mut rng)
            .await
        {
            Ok(receipt) => replies::roll_result(&receipt, economy),
            Err(e) => replies::rejection(&e, economy, Utc::now()).ok_or(e)?,
        };

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
