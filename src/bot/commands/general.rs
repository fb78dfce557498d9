//! General Discord commands - ping and help.
//! These commands don't touch the ledger.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Shows the available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let economy = &ctx.data().economy;
        let help_text = format!(
            "**Tegridy Help**\n\
            • `/daily` - Claim your daily {reward} {symbol}.\n\
            • `/balance` - Check how many {name} you have.\n\
            • `/roll <amount|all>` - Bet against the bot. Higher roll wins the bet, a tie returns it.\n\
            • `/ping` - Checks if the bot is responsive.\n\
            • `/help` - Shows this help message.",
            reward = economy.daily_reward,
            symbol = economy.currency_symbol,
            name = economy.currency_name,
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
