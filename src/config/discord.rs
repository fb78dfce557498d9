//! Discord connection settings read from environment variables.

use crate::errors::{Error, Result};
use tracing::error;

/// Settings needed to log in and register commands.
#[derive(Clone)]
pub struct DiscordConfig {
    /// Bot token from `DISCORD_TOKEN`
    pub token: String,
    /// Guild to register commands in instead of globally (`DEV_GUILD_ID`)
    pub dev_guild_id: Option<u64>,
    /// Username the bot gives itself on startup (`BOT_USERNAME`)
    pub username: Option<String>,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .field("dev_guild_id", &self.dev_guild_id)
            .field("username", &self.username)
            .finish()
    }
}

impl DiscordConfig {
    /// Builds the settings from a variable lookup, usually the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::EnvVar(std::env::VarError::NotPresent))
            .inspect_err(|_| error!("DISCORD_TOKEN not found in the environment"))?;

        let dev_guild_id = lookup("DEV_GUILD_ID")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| Error::Config {
                    message: format!("Invalid DEV_GUILD_ID '{raw}': {e}"),
                })
            })
            .transpose()?;

        let username = lookup("BOT_USERNAME").filter(|name| !name.trim().is_empty());

        Ok(Self {
            token,
            dev_guild_id,
            username,
        })
    }

    /// Builds the settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
