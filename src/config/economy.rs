//! Economy settings: daily reward, claim cooldown, dice range, currency naming.
//!
//! Settings come from the optional `[economy]` table of `config.toml` and can be
//! overridden per field with environment variables. Every field has a default,
//! so the bot runs with no configuration file at all.

use crate::core::wager::DiceRange;
use crate::errors::{Error, Result};
use chrono::TimeDelta;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Longest accepted daily cooldown: one leap year.
pub const MAX_DAILY_COOLDOWN_SECS: i64 = 366 * 24 * 60 * 60;

/// Immutable economy settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Amount granted by `/daily`
    pub daily_reward: i64,
    /// Minimum time between two daily claims, in seconds
    pub daily_cooldown_secs: i64,
    /// Lowest face of the die
    pub dice_min: u8,
    /// Highest face of the die
    pub dice_max: u8,
    /// Display name of the currency
    pub currency_name: String,
    /// Symbol appended to amounts
    pub currency_symbol: String,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            daily_reward: 1000,
            daily_cooldown_secs: 24 * 60 * 60,
            dice_min: 1,
            dice_max: 6,
            currency_name: "Tegridy Bucks".to_string(),
            currency_symbol: "🌿".to_string(),
        }
    }
}

/// Shape of `config.toml`
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    economy: EconomyConfig,
}

impl EconomyConfig {
    /// Cooldown between daily claims.
    #[must_use]
    pub fn daily_cooldown(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.daily_cooldown_secs).unwrap_or(TimeDelta::MAX)
    }

    /// Inclusive range of die faces.
    #[must_use]
    pub const fn dice_range(&self) -> DiceRange {
        DiceRange::new(self.dice_min, self.dice_max)
    }

    /// Parses the `[economy]` table out of a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })?;
        Ok(file.economy)
    }

    /// Applies per-field overrides. `lookup` returns the raw value of a
    /// variable, usually from the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("DAILY_REWARD") {
            self.daily_reward = parse_override("DAILY_REWARD", &raw)?;
        }
        if let Some(raw) = lookup("DAILY_COOLDOWN_SECS") {
            self.daily_cooldown_secs = parse_override("DAILY_COOLDOWN_SECS", &raw)?;
        }
        if let Some(raw) = lookup("DICE_MIN") {
            self.dice_min = parse_override("DICE_MIN", &raw)?;
        }
        if let Some(raw) = lookup("DICE_MAX") {
            self.dice_max = parse_override("DICE_MAX", &raw)?;
        }
        if let Some(name) = lookup("CURRENCY_NAME") {
            self.currency_name = name;
        }
        if let Some(symbol) = lookup("CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
        Ok(())
    }

    /// Checks that the settings describe a playable economy.
    pub fn validate(&self) -> Result<()> {
        if self.daily_reward <= 0 {
            return Err(Error::Config {
                message: format!("daily_reward must be positive, got {}", self.daily_reward),
            });
        }
        if self.daily_cooldown_secs <= 0 || self.daily_cooldown_secs > MAX_DAILY_COOLDOWN_SECS {
            return Err(Error::Config {
                message: format!(
                    "daily_cooldown_secs must be between 1 and {MAX_DAILY_COOLDOWN_SECS}, got {}",
                    self.daily_cooldown_secs
                ),
            });
        }
        if self.dice_min == 0 || self.dice_min > self.dice_max {
            return Err(Error::Config {
                message: format!(
                    "dice range {}..={} is invalid, faces start at 1 and min must not exceed max",
                    self.dice_min, self.dice_max
                ),
            });
        }
        Ok(())
    }
}

fn parse_override<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid value '{raw}' for {key}: {e}"),
    })
}

/// Loads economy settings from a TOML file if it exists, then applies
/// environment overrides and validates the result.
pub fn load_economy_config<P: AsRef<Path>>(path: P) -> Result<EconomyConfig> {
    let path_ref = path.as_ref();
    let mut config = if path_ref.exists() {
        debug!("Loading economy configuration from {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
            message: format!("Failed to read config file {path_ref:?}: {e}"),
        })?;
        EconomyConfig::from_toml_str(&contents)?
    } else {
        debug!("No config file at {:?}, using defaults", path_ref);
        EconomyConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;

    info!(
        "Economy: daily reward {} {}, cooldown {}s, dice {}..={}",
        config.daily_reward,
        config.currency_symbol,
        config.daily_cooldown_secs,
        config.dice_min,
        config.dice_max
    );
    Ok(config)
}

/// Loads economy settings from `CONFIG_PATH`, or `config.toml` by default.
pub fn load_default_economy_config() -> Result<EconomyConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_economy_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EconomyConfig::default();
        assert_eq!(config.daily_reward, 1000);
        assert_eq!(config.daily_cooldown(), TimeDelta::hours(24));
        assert_eq!(config.dice_range(), DiceRange::new(1, 6));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_economy_table() {
        let toml_str = r#"
            [economy]
            daily_reward = 250
            dice_min = 1
            dice_max = 20
            currency_name = "Gold"
        "#;

        let config = EconomyConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.daily_reward, 250);
        assert_eq!(config.dice_max, 20);
        assert_eq!(config.currency_name, "Gold");
        // Unset fields keep their defaults
        assert_eq!(config.daily_cooldown_secs, 86_400);
        assert_eq!(config.currency_symbol, "🌿");
    }

    #[test]
    fn test_missing_economy_table_uses_defaults() {
        let config = EconomyConfig::from_toml_str("").unwrap();
        assert_eq!(config, EconomyConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = EconomyConfig::from_toml_str("[economy]\ndaily_reward = \"lots\"");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_overrides() {
        let mut config = EconomyConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("DAILY_REWARD", "100"),
                ("DAILY_COOLDOWN_SECS", "60"),
                ("CURRENCY_SYMBOL", "$"),
            ]))
            .unwrap();

        assert_eq!(config.daily_reward, 100);
        assert_eq!(config.daily_cooldown(), TimeDelta::seconds(60));
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.currency_name, "Tegridy Bucks");
    }

    #[test]
    fn test_out_of_range_cooldown_does_not_panic() {
        let config = EconomyConfig {
            daily_cooldown_secs: 9_300_000_000_000_000,
            ..EconomyConfig::default()
        };
        assert_eq!(config.daily_cooldown(), TimeDelta::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparsable_override_is_rejected() {
        let mut config = EconomyConfig::default();
        let result = config.apply_overrides(lookup_from(&[("DICE_MAX", "six")]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let zero_reward = EconomyConfig {
            daily_reward: 0,
            ..EconomyConfig::default()
        };
        assert!(zero_reward.validate().is_err());

        let no_cooldown = EconomyConfig {
            daily_cooldown_secs: 0,
            ..EconomyConfig::default()
        };
        assert!(no_cooldown.validate().is_err());

        let huge_cooldown = EconomyConfig {
            daily_cooldown_secs: 10_000_000_000_000,
            ..EconomyConfig::default()
        };
        assert!(huge_cooldown.validate().is_err());

        let longest = EconomyConfig {
            daily_cooldown_secs: MAX_DAILY_COOLDOWN_SECS,
            ..EconomyConfig::default()
        };
        assert!(longest.validate().is_ok());

        let inverted_dice = EconomyConfig {
            dice_min: 6,
            dice_max: 1,
            ..EconomyConfig::default()
        };
        assert!(inverted_dice.validate().is_err());

        let zero_face = EconomyConfig {
            dice_min: 0,
            ..EconomyConfig::default()
        };
        assert!(zero_face.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = load_economy_config("definitely/not/here/config.toml").unwrap();
        assert!(config.daily_reward > 0);
    }
}
