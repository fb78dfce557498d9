use dotenvy::dotenv;
use std::sync::Arc;
use tegridy_bot::{
    bot::{self, BotData},
    config::{database, discord::DiscordConfig, economy},
    core::ledger::Ledger,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since variables can be set externally
    if dotenv().is_ok() {
        info!("Loaded .env file.");
    }

    // 3. Load settings
    let economy_config = economy::load_default_economy_config()
        .inspect_err(|e| error!("Failed to load economy configuration: {}", e))?;
    let discord_config = DiscordConfig::from_env()?;

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Run the bot
    let data = BotData::new(Ledger::new(db), Arc::new(economy_config));
    bot::run_bot(discord_config, data).await
}
