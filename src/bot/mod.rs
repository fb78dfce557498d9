//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the bot: slash commands,
//! autocomplete handlers, reply rendering, and the poise framework setup.

/// Discord command implementations (economy, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Reply text for economy commands
pub mod replies;

use crate::{
    config::{discord::DiscordConfig, economy::EconomyConfig},
    core::ledger::Ledger,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Account store for all balance operations
    pub ledger: Ledger,
    /// Economy settings, fixed for the lifetime of the process
    pub economy: Arc<EconomyConfig>,
}

impl BotData {
    /// Creates the shared command context from a ledger and economy settings.
    #[must_use]
    pub const fn new(ledger: Ledger, economy: Arc<EconomyConfig>) -> Self {
        Self { ledger, economy }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

pub use commands::*;
pub use handlers::*;

/// All commands the bot registers.
#[must_use]
pub fn command_list() -> Vec<poise::Command<BotData, Error>> {
    vec![daily(), balance(), roll(), ping(), help()]
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx
                .say("❌ Something went wrong, please try again later.")
                .await
            {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Renames the bot account. Discord rate-limits renames, so failures are
/// only logged.
async fn rename_bot(ctx: &serenity::Context, ready: &serenity::Ready, username: &str) {
    if ready.user.name == username {
        return;
    }

    let mut current_user = ready.user.clone();
    match current_user
        .edit(ctx, serenity::EditProfile::new().username(username))
        .await
    {
        Ok(()) => info!("Renamed bot to {}", username),
        Err(e) => warn!("Could not rename bot to {}: {}", username, e),
    }
}

/// Connects to Discord, registers the commands, and runs until the client stops.
#[instrument(skip(discord, data))]
pub async fn run_bot(discord: DiscordConfig, data: BotData) -> Result<()> {
    let dev_guild_id = discord.dev_guild_id;
    let username = discord.username.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: command_list(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);

                if let Some(name) = username {
                    rename_bot(ctx, ready, &name).await;
                }

                let commands = &framework.options().commands;
                if let Some(guild_id) = dev_guild_id {
                    poise::builtins::register_in_guild(
                        ctx,
                        commands,
                        serenity::GuildId::new(guild_id),
                    )
                    .await?;
                    info!("Registered {} commands in guild {}", commands.len(), guild_id);
                } else {
                    poise::builtins::register_globally(ctx, commands).await?;
                    info!("Registered {} commands globally", commands.len());
                }

                Ok(data)
            })
        })
        .build();

    // Slash commands need no privileged intents
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&discord.token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    Ok(())
}
