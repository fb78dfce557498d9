/// Database configuration and connection management
pub mod database;

/// Discord token and registration settings from environment variables
pub mod discord;

/// Economy settings from config.toml and environment overrides
pub mod economy;
